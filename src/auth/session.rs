//! Session-level token provider backed by an injected secure store.

// self
use crate::{
	_prelude::*,
	auth::{credential::Credential, secret::TokenSecret},
	error::ConfigError,
	store::CredentialStore,
};

/// Store entry name under which the access secret is persisted.
pub const ACCESS_SECRET_NAME: &str = "quotehub.access-token";
/// Store entry name under which the refresh secret is persisted.
pub const REFRESH_SECRET_NAME: &str = "quotehub.refresh-token";

/// Supplies bearer credentials for authorized calls and owns the renewal lifecycle.
///
/// The session keeps an in-memory copy of the persisted credential so request paths never
/// touch the secure store, and serializes renewals through a singleflight guard: when
/// several calls observe a 401 concurrently, exactly one exchange reaches the server and
/// the rest reuse its result.
pub struct AuthSession {
	store: Arc<dyn CredentialStore>,
	cached: RwLock<Option<Credential>>,
	renew_guard: AsyncMutex<()>,
}
impl AuthSession {
	/// Creates a session on top of the provided secure store; call
	/// [`bootstrap`](Self::bootstrap) to load persisted secrets.
	pub fn new(store: Arc<dyn CredentialStore>) -> Self {
		Self { store, cached: RwLock::new(None), renew_guard: AsyncMutex::new(()) }
	}

	/// Loads persisted secrets into the in-memory cache, returning whether a complete
	/// credential pair was found.
	///
	/// A partial pair (access without refresh, or vice versa) is treated as signed out;
	/// renewal is impossible without the refresh secret, so half a credential is useless.
	pub async fn bootstrap(&self) -> Result<bool> {
		let access = self.store.get(ACCESS_SECRET_NAME).await?;
		let refresh = self.store.get(REFRESH_SECRET_NAME).await?;

		match (access, refresh) {
			(Some(access), Some(refresh)) => {
				*self.cached.write() = Some(Credential {
					access,
					refresh,
					issued_at: OffsetDateTime::now_utc(),
				});

				Ok(true)
			},
			_ => {
				*self.cached.write() = None;

				Ok(false)
			},
		}
	}

	/// Installs a credential pair, persisting it for future sessions.
	pub async fn install(&self, credential: Credential) -> Result<()> {
		self.store.set(ACCESS_SECRET_NAME, credential.access.clone()).await?;
		self.store.set(REFRESH_SECRET_NAME, credential.refresh.clone()).await?;

		*self.cached.write() = Some(credential);

		Ok(())
	}

	/// Signs the session out, deleting persisted secrets.
	pub async fn clear(&self) -> Result<()> {
		self.store.delete(ACCESS_SECRET_NAME).await?;
		self.store.delete(REFRESH_SECRET_NAME).await?;

		*self.cached.write() = None;

		Ok(())
	}

	/// Returns `true` while a credential is installed.
	pub fn is_signed_in(&self) -> bool {
		self.cached.read().is_some()
	}

	/// Returns the current access secret, if signed in.
	pub fn access_token(&self) -> Option<TokenSecret> {
		self.cached.read().as_ref().map(|credential| credential.access.clone())
	}

	/// Returns the current refresh secret, if signed in.
	pub fn refresh_token(&self) -> Option<TokenSecret> {
		self.cached.read().as_ref().map(|credential| credential.refresh.clone())
	}

	/// Replaces the access secret after a successful renewal, persisting the rotation.
	pub(crate) async fn rotate_access(&self, access: TokenSecret) -> Result<TokenSecret> {
		let rotated = {
			let cached = self.cached.read();
			let credential = cached.as_ref().ok_or(ConfigError::SignedOut)?;

			credential.rotated(access, OffsetDateTime::now_utc())
		};

		self.store.set(ACCESS_SECRET_NAME, rotated.access.clone()).await?;

		let fresh = rotated.access.clone();

		*self.cached.write() = Some(rotated);

		Ok(fresh)
	}

	/// Runs `renew` under the singleflight guard, skipping the exchange entirely when
	/// another caller already rotated past `stale`.
	///
	/// `stale` is the access secret the caller presented when the server signaled expiry.
	/// After acquiring the guard the current secret is compared against it: a mismatch
	/// means a concurrent renewal already finished and its result is returned without a
	/// network call (the same re-check the store fetch performs in refresh flows).
	pub(crate) async fn renew_with<F, Fut>(&self, stale: &TokenSecret, renew: F) -> Result<TokenSecret>
	where
		F: FnOnce(TokenSecret) -> Fut,
		Fut: Future<Output = Result<TokenSecret>>,
	{
		let _singleflight = self.renew_guard.lock().await;
		let current = self.access_token().ok_or(ConfigError::SignedOut)?;

		if current.expose() != stale.expose() {
			return Ok(current);
		}

		let refresh = self.refresh_token().ok_or(ConfigError::SignedOut)?;
		let replacement = renew(refresh).await?;

		self.rotate_access(replacement).await
	}
}
impl Debug for AuthSession {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthSession").field("signed_in", &self.is_signed_in()).finish()
	}
}
