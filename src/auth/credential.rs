//! Bearer credential pair issued at sign-in and rotated on renewal.

// self
use crate::{_prelude::*, auth::secret::TokenSecret};

/// Access + refresh secret pair carried by a signed-in session.
///
/// The access secret is short-lived and presented on every authorized call; the refresh
/// secret is longer-lived and exchanged for a replacement access secret when the server
/// signals expiry. An access secret is never replayed after that signal without exactly
/// one renewal attempt in between; [`crate::auth::AuthSession`] and the authorized-call
/// wrapper enforce the ordering.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Credential {
	/// Short-lived access secret presented on authorized calls.
	pub access: TokenSecret,
	/// Longer-lived refresh secret exchanged during renewal.
	pub refresh: TokenSecret,
	/// Instant the pair was issued or the access secret last rotated.
	pub issued_at: OffsetDateTime,
}
impl Credential {
	/// Creates a credential pair stamped with the current clock.
	pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
		Self {
			access: TokenSecret::new(access),
			refresh: TokenSecret::new(refresh),
			issued_at: OffsetDateTime::now_utc(),
		}
	}

	/// Overrides the issue instant.
	pub fn with_issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = instant;

		self
	}

	/// Returns a copy holding a freshly rotated access secret; the refresh secret is kept.
	pub fn rotated(&self, access: TokenSecret, instant: OffsetDateTime) -> Self {
		Self { access, refresh: self.refresh.clone(), issued_at: instant }
	}
}
