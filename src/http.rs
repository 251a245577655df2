//! Transport primitives for QuoteHub API calls.
//!
//! The module exposes [`ApiTransport`] alongside [`ApiRequest`] and [`RawResponse`] so
//! downstream crates can integrate custom HTTP clients. A transport only moves bytes:
//! envelope decoding, error classification, and the renew-once replay all happen above
//! this seam, so implementations stay small and testable.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, auth::TokenSecret, error::TransportError};

/// Boxed future returned by [`ApiTransport::execute`].
pub type TransportFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, TransportError>> + 'a + Send>>;

/// HTTP verb subset used by the QuoteHub API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
	/// Collection and entity reads.
	Get,
	/// Entity creation, sign-in, renewal.
	Post,
	/// Entity updates.
	Put,
	/// Entity removal.
	Delete,
}
impl HttpMethod {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Delete => "DELETE",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outbound request descriptor handed to transports.
///
/// The bearer secret is attached as an `Authorization: Bearer` header by the transport;
/// it is kept as a [`TokenSecret`] until the last moment so request logging never leaks
/// credential material.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP verb for the call.
	pub method: HttpMethod,
	/// Absolute endpoint URL, query included.
	pub url: Url,
	/// Bearer secret for authenticated calls.
	pub bearer: Option<TokenSecret>,
	/// JSON body for mutation calls.
	pub body: Option<serde_json::Value>,
}
impl ApiRequest {
	/// Creates a bare request for the provided verb + URL.
	pub fn new(method: HttpMethod, url: Url) -> Self {
		Self { method, url, bearer: None, body: None }
	}

	/// Attaches a bearer secret.
	pub fn with_bearer(mut self, secret: TokenSecret) -> Self {
		self.bearer = Some(secret);

		self
	}

	/// Attaches a JSON body.
	pub fn with_body(mut self, body: serde_json::Value) -> Self {
		self.body = Some(body);

		self
	}
}

/// Raw response surfaced by transports before envelope decoding.
#[derive(Clone, Debug)]
pub struct RawResponse {
	/// HTTP status code returned by the endpoint.
	pub status: u16,
	/// Response body bytes, possibly empty.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Returns `true` for the distinguished credential-expiry status.
	pub fn is_unauthorized(&self) -> bool {
		self.status == 401
	}
}

/// Abstraction over HTTP stacks capable of executing QuoteHub API calls.
///
/// The trait is the crate's only dependency on an HTTP stack. Callers provide an
/// implementation (typically behind `Arc<T>` where `T: ApiTransport`) and every layer
/// above—session renewal, the authorized-call wrapper, paged loaders—works against this
/// seam. Implementations must be `Send + Sync + 'static` so they can be shared across
/// client instances, and the futures they return must be `Send` so callers can box
/// async blocks without worrying about borrowed transports.
pub trait ApiTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes the request and resolves with the raw status + body.
	///
	/// Implementations map connection-level failures into [`TransportError::Network`] and
	/// must not interpret status codes; classification happens in the client layer.
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_, RawResponse>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// The API never redirects between hosts, so callers supplying a custom client should
/// leave redirect following at the reqwest default.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiTransport for ReqwestTransport {
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_, RawResponse> {
		let client = self.0.clone();

		Box::pin(async move {
			let mut builder = match request.method {
				HttpMethod::Get => client.get(request.url),
				HttpMethod::Post => client.post(request.url),
				HttpMethod::Put => client.put(request.url),
				HttpMethod::Delete => client.delete(request.url),
			};

			if let Some(bearer) = &request.bearer {
				builder = builder.bearer_auth(bearer.expose());
			}
			if let Some(body) = &request.body {
				builder = builder.json(body);
			}

			let response = builder.send().await.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(RawResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_classification_matches_the_wire_contract() {
		let ok = RawResponse { status: 200, body: Vec::new() };
		let created = RawResponse { status: 201, body: Vec::new() };
		let expired = RawResponse { status: 401, body: Vec::new() };
		let rejected = RawResponse { status: 400, body: Vec::new() };

		assert!(ok.is_success());
		assert!(created.is_success());
		assert!(!expired.is_success());
		assert!(expired.is_unauthorized());
		assert!(!rejected.is_unauthorized());
	}

	#[test]
	fn request_debug_redacts_bearer_material() {
		let url = Url::parse("https://api.quotehub.io/v1/bookstories")
			.expect("Request URL fixture should parse.");
		let request = ApiRequest::new(HttpMethod::Get, url)
			.with_bearer(TokenSecret::new("very-secret-bearer"));
		let rendered = format!("{request:?}");

		assert!(!rendered.contains("very-secret-bearer"));
		assert!(rendered.contains("<redacted>"));
	}
}
