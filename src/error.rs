//! Client-level error types shared across sessions, loaders, and stores.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Credential-store failure.
	#[error("{0}")]
	Store(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, malformed payloads).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Server signaled that the bearer credential expired; eligible for exactly one renewal.
	#[error("Authorization expired: {reason}.")]
	Unauthorized {
		/// Server- or client-supplied reason string.
		reason: String,
	},
	/// Credential renewal itself failed; callers must sign in again.
	#[error("Credential renewal failed; a fresh sign-in is required.")]
	RenewalFailed {
		/// Failure that ended the renewal attempt.
		#[source]
		source: Box<Error>,
	},
	/// Server reported a business failure; the message is surfaced verbatim.
	#[error("Server reported a failure: {message}.")]
	Api {
		/// Server-supplied message describing the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}
impl Error {
	/// Returns `true` for the distinguished authorization-expired signal that triggers the
	/// renew-once replay contract.
	pub fn is_unauthorized(&self) -> bool {
		matches!(self, Self::Unauthorized { .. })
	}

	pub(crate) fn renewal_failed(source: Error) -> Self {
		Self::RenewalFailed { source: Box::new(source) }
	}

	pub(crate) fn api(message: impl Into<String>, status: Option<u16>) -> Self {
		Self::Api { message: message.into(), status }
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Base URL cannot serve as a root for endpoint joining.
	#[error("Base URL cannot be used as an API root: {reason}.")]
	InvalidBaseUrl {
		/// Human-readable validation failure.
		reason: String,
	},
	/// Endpoint path cannot be joined onto the base URL.
	#[error("Endpoint path `{path}` cannot be joined onto the base URL.")]
	InvalidEndpoint {
		/// Offending relative path.
		path: String,
	},
	/// Page size must be greater than zero.
	#[error("Page size must be greater than zero.")]
	NonPositivePageSize,
	/// Request body could not be serialized into JSON.
	#[error("Request body could not be serialized: {message}.")]
	RequestBody {
		/// Human-readable serialization failure.
		message: String,
	},
	/// No credential is installed in the session.
	#[error("No credential is installed; sign in first.")]
	SignedOut,
}

/// Transport-level failures (network, IO, malformed payloads).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
	/// Response body could not be decoded into the expected envelope. Treated as a
	/// transport-class failure: malformed payloads are never retried or surfaced as business
	/// errors.
	#[error("API returned a malformed response body.")]
	Decode {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
