//! High-level API client orchestrating transports, sessions, and envelopes.

pub mod follows;
pub mod renew;
pub mod stories;
pub mod themes;

mod authorized;

pub use renew::RenewMetrics;
pub use stories::StoryDraft;
pub use themes::ThemeDraft;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	api::envelope::{DataEnvelope, Page, PageEnvelope, decode_json},
	auth::AuthSession,
	config::ApiConfig,
	http::{ApiRequest, ApiTransport, HttpMethod, RawResponse},
	obs::{self, CallKind, CallOutcome, CallSpan},
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestTransport, store::CredentialStore};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestApiClient = ApiClient<ReqwestTransport>;

/// Coordinates QuoteHub API calls for a single signed-in session.
///
/// The client owns the transport, the endpoint configuration, and the session-level token
/// provider so endpoint services can focus on their wire shapes. Every authorized call
/// funnels through [`ApiClient::authorized`], which is the single place the renew-once
/// replay contract lives.
#[derive(Clone)]
pub struct ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Transport used for every outbound request.
	pub transport: Arc<T>,
	/// Endpoint configuration (API root, renewal path, page sizing).
	pub config: ApiConfig,
	/// Session-level token provider.
	pub session: Arc<AuthSession>,
	/// Shared metrics recorder for renewal outcomes.
	pub renew_metrics: Arc<RenewMetrics>,
}
impl<T> ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		transport: impl Into<Arc<T>>,
		config: ApiConfig,
		session: impl Into<Arc<AuthSession>>,
	) -> Self {
		Self {
			transport: transport.into(),
			config,
			session: session.into(),
			renew_metrics: Default::default(),
		}
	}

	/// Joins a relative endpoint path onto the configured base URL.
	pub fn endpoint(&self, path: &str) -> Result<Url> {
		self.config.endpoint(path).map_err(Error::from)
	}

	/// Fetches one page of a collection endpoint, appending the standard pagination query.
	pub(crate) async fn fetch_page<D>(&self, url: Url, page: u32, page_size: u32) -> Result<Page<D>>
	where
		D: DeserializeOwned,
	{
		const KIND: CallKind = CallKind::Page;

		let span = CallSpan::new(KIND, "fetch_page");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let mut target = url;

				target
					.query_pairs_mut()
					.append_pair("page", &page.to_string())
					.append_pair("pageSize", &page_size.to_string());

				self.authorized(|access| {
					let request =
						ApiRequest::new(HttpMethod::Get, target.clone()).with_bearer(access);

					async move {
						let response =
							self.transport.execute(request).await.map_err(Error::from)?;
						let status = response.status;
						let envelope: PageEnvelope<D> = Self::decode_response(response)?;

						envelope.into_page(Some(status))
					}
				})
				.await
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Fetches a single entity from an authorized endpoint.
	pub(crate) async fn fetch_entity<D>(&self, url: Url) -> Result<D>
	where
		D: DeserializeOwned,
	{
		self.authorized(|access| {
			let request = ApiRequest::new(HttpMethod::Get, url.clone()).with_bearer(access);

			async move {
				let response = self.transport.execute(request).await.map_err(Error::from)?;
				let status = response.status;
				let envelope: DataEnvelope<D> = Self::decode_response(response)?;

				envelope.into_result(Some(status))
			}
		})
		.await
	}

	/// Executes a mutation, returning the affected entity from the response envelope.
	pub(crate) async fn send_mutation<D>(&self, request: ApiRequest) -> Result<D>
	where
		D: DeserializeOwned,
	{
		const KIND: CallKind = CallKind::Mutation;

		let span = CallSpan::new(KIND, "send_mutation");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				self.authorized(|access| {
					let request = request.clone().with_bearer(access);

					async move {
						let response =
							self.transport.execute(request).await.map_err(Error::from)?;
						let status = response.status;
						let envelope: DataEnvelope<D> = Self::decode_response(response)?;

						envelope.into_result(Some(status))
					}
				})
				.await
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Executes a mutation whose response carries only the success flag.
	pub(crate) async fn send_ack(&self, request: ApiRequest) -> Result<()> {
		const KIND: CallKind = CallKind::Mutation;

		let span = CallSpan::new(KIND, "send_ack");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				self.authorized(|access| {
					let request = request.clone().with_bearer(access);

					async move {
						let response =
							self.transport.execute(request).await.map_err(Error::from)?;
						let status = response.status;
						let envelope: DataEnvelope<serde_json::Value> =
							Self::decode_response(response)?;

						envelope.into_ack(Some(status))
					}
				})
				.await
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Classifies a raw response: 401 becomes the authorization-expired signal, other
	/// non-2xx statuses become business errors with the server message, and 2xx bodies are
	/// decoded into `D`.
	pub(crate) fn decode_response<D>(response: RawResponse) -> Result<D>
	where
		D: DeserializeOwned,
	{
		if response.is_unauthorized() {
			return Err(Error::Unauthorized {
				reason: Self::failure_message(&response)
					.unwrap_or_else(|| "Bearer credential was rejected".into()),
			});
		}
		if !response.is_success() {
			return Err(Error::api(
				Self::failure_message(&response)
					.unwrap_or_else(|| format!("API request failed with status {}", response.status)),
				Some(response.status),
			));
		}

		decode_json(&response.body, Some(response.status)).map_err(Error::from)
	}

	/// Best-effort extraction of the server message from a failure body.
	fn failure_message(response: &RawResponse) -> Option<String> {
		#[derive(Deserialize)]
		struct FailureBody {
			message: Option<String>,
		}

		serde_json::from_slice::<FailureBody>(&response.body).ok().and_then(|body| body.message)
	}

	/// Serializes a draft payload into a JSON request body.
	pub(crate) fn json_body<B>(body: &B) -> Result<serde_json::Value>
	where
		B: Serialize,
	{
		serde_json::to_value(body)
			.map_err(|e| crate::error::ConfigError::RequestBody { message: e.to_string() }.into())
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestTransport> {
	/// Creates a new client for the provided configuration and credential store.
	///
	/// The client provisions its own reqwest-backed transport so callers do not need to
	/// pass HTTP handles explicitly; the session starts signed out until
	/// [`AuthSession::bootstrap`] or [`AuthSession::install`] runs.
	pub fn new(config: ApiConfig, store: Arc<dyn CredentialStore>) -> Self {
		Self::with_transport(ReqwestTransport::default(), config, AuthSession::new(store))
	}
}
impl<T> Debug for ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("base_url", &self.config.base_url().as_str())
			.field("signed_in", &self.session.is_signed_in())
			.finish()
	}
}
