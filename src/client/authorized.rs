//! Renew-once replay for authorized API calls.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	client::ApiClient,
	error::ConfigError,
	http::ApiTransport,
};

impl<T> ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Runs `op` with the current access secret, renewing at most once when the server
	/// signals expiry.
	///
	/// On [`Error::Unauthorized`] the session renews exactly once and `op` is replayed
	/// exactly once with the fresh secret; the replay's outcome is final, whatever it is.
	/// When renewal itself fails the result is [`Error::RenewalFailed`] and `op` is not
	/// replayed, so a persistently invalid credential can never loop. Non-authorization
	/// failures are returned untouched and never retried.
	pub async fn authorized<F, Fut, D>(&self, op: F) -> Result<D>
	where
		F: Fn(TokenSecret) -> Fut,
		Fut: Future<Output = Result<D>>,
	{
		let access = self.session.access_token().ok_or(ConfigError::SignedOut)?;

		match op(access.clone()).await {
			Err(error) if error.is_unauthorized() => {},
			outcome => return outcome,
		}

		let fresh = match self.renew_access(&access).await {
			Ok(secret) => secret,
			Err(renew_error) => return Err(Error::renewal_failed(renew_error)),
		};

		op(fresh).await
	}
}
