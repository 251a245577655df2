//! Access-secret renewal with singleflight guards and rotation metrics.
//!
//! The client exposes [`ApiClient::renew_access`] so the authorized-call wrapper can
//! recover from a credential-expiry signal without each call site reimplementing the
//! exchange. Every renewal funnels through the session's singleflight guard: concurrent
//! 401s collapse into one `POST` against the renewal endpoint, and late arrivals reuse
//! the rotated secret.

mod metrics;

pub use metrics::RenewMetrics;

// self
use crate::{
	_prelude::*,
	api::envelope::decode_json,
	auth::TokenSecret,
	client::ApiClient,
	http::{ApiRequest, ApiTransport, HttpMethod},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

impl<T> ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Exchanges the refresh secret for a fresh access secret, rotating the session
	/// credential.
	///
	/// `stale` is the access secret the server rejected. When another caller already
	/// rotated past it, the cached secret is returned without contacting the server.
	pub async fn renew_access(&self, stale: &TokenSecret) -> Result<TokenSecret> {
		const KIND: CallKind = CallKind::Renew;

		let span = CallSpan::new(KIND, "renew_access");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				self.renew_metrics.record_attempt();

				let outcome = self
					.session
					.renew_with(stale, |refresh| self.exchange_refresh(refresh))
					.await;

				match &outcome {
					Ok(_) => self.renew_metrics.record_success(),
					Err(_) => self.renew_metrics.record_failure(),
				}

				outcome
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	async fn exchange_refresh(&self, refresh: TokenSecret) -> Result<TokenSecret> {
		let url = self.config.renew_endpoint()?;
		let request = ApiRequest::new(HttpMethod::Post, url).with_bearer(refresh);
		let response = self.transport.execute(request).await.map_err(Error::from)?;

		if response.is_unauthorized() {
			return Err(Error::Unauthorized { reason: "Refresh credential was rejected".into() });
		}
		if !response.is_success() {
			return Err(Error::api(
				format!("Renewal failed with status {}", response.status),
				Some(response.status),
			));
		}

		let payload: RenewedAccess = decode_json(&response.body, Some(response.status))?;

		Ok(TokenSecret::new(payload.access_token))
	}
}

// Renewal endpoint payload: `{"accessToken": "..."}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenewedAccess {
	access_token: String,
}
