//! Secure credential storage contracts and built-in backends.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Boxed future returned by [`CredentialStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Secure key-value capability hiding the platform credential vault.
///
/// The contract deliberately mirrors what every platform keystore offers—fetch, replace,
/// delete by name—so a keychain, a secret service, or a test map can all sit behind it.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Fetches the secret stored under `name`, if present.
	fn get<'a>(&'a self, name: &'a str) -> StoreFuture<'a, Option<TokenSecret>>;

	/// Persists or replaces the secret stored under `name`.
	fn set<'a>(&'a self, name: &'a str, value: TokenSecret) -> StoreFuture<'a, ()>;

	/// Removes the secret stored under `name`; missing entries are not an error.
	fn delete<'a>(&'a self, name: &'a str) -> StoreFuture<'a, ()>;
}

/// Error type produced by [`CredentialStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::Error;

	#[test]
	fn store_error_converts_into_client_error_with_source() {
		let store_error = StoreError::Backend { message: "keystore locked".into() };
		let client_error: Error = store_error.clone().into();

		assert!(matches!(client_error, Error::Store(_)));
		assert!(client_error.to_string().contains("keystore locked"));

		let source = StdError::source(&client_error)
			.expect("Client error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}
}
