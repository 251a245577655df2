//! Thread-safe in-memory [`CredentialStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	store::{CredentialStore, StoreError, StoreFuture},
};

type SecretMap = Arc<RwLock<HashMap<String, TokenSecret>>>;

/// Thread-safe storage backend that keeps secrets in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(SecretMap);
impl MemoryStore {
	fn get_now(map: SecretMap, name: String) -> Option<TokenSecret> {
		map.read().get(&name).cloned()
	}

	fn set_now(map: SecretMap, name: String, value: TokenSecret) -> Result<(), StoreError> {
		map.write().insert(name, value);

		Ok(())
	}

	fn delete_now(map: SecretMap, name: String) -> Result<(), StoreError> {
		map.write().remove(&name);

		Ok(())
	}
}
impl CredentialStore for MemoryStore {
	fn get<'a>(&'a self, name: &'a str) -> StoreFuture<'a, Option<TokenSecret>> {
		let map = self.0.clone();
		let name = name.to_owned();

		Box::pin(async move { Ok(Self::get_now(map, name)) })
	}

	fn set<'a>(&'a self, name: &'a str, value: TokenSecret) -> StoreFuture<'a, ()> {
		let map = self.0.clone();
		let name = name.to_owned();

		Box::pin(async move { Self::set_now(map, name, value) })
	}

	fn delete<'a>(&'a self, name: &'a str) -> StoreFuture<'a, ()> {
		let map = self.0.clone();
		let name = name.to_owned();

		Box::pin(async move { Self::delete_now(map, name) })
	}
}
