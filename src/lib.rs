//! Async client toolkit for the QuoteHub book-quote API—renew-once bearer sessions, paged
//! collection loaders, and typed change feeds in one crate built for production.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod http;
pub mod loader;
pub mod obs;
pub mod store;
#[cfg(feature = "reqwest")]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests. Not part of the stable
	//! API surface; production code should build its clients through [`client::ApiClient`].

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{AuthSession, Credential},
		client::ApiClient,
		config::ApiConfig,
		http::ReqwestTransport,
		store::{CredentialStore, MemoryStore},
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = ApiClient<ReqwestTransport>;

	/// Access secret every test session starts out with.
	pub const TEST_ACCESS_SECRET: &str = "access-seed";
	/// Refresh secret every test session starts out with.
	pub const TEST_REFRESH_SECRET: &str = "refresh-seed";

	/// Constructs an [`ApiClient`] backed by an in-memory store and a signed-in session so
	/// integration tests can exercise authorized endpoints immediately.
	pub async fn build_reqwest_test_client(base_url: Url) -> (ReqwestTestClient, Arc<MemoryStore>) {
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn CredentialStore> = store_backend.clone();
		let session = AuthSession::new(store);

		session
			.install(Credential::new(TEST_ACCESS_SECRET, TEST_REFRESH_SECRET))
			.await
			.expect("Installing the seed credential should succeed in tests.");

		let config = ApiConfig::builder(base_url)
			.build()
			.expect("Test endpoint configuration should be valid.");
		let client = ApiClient::with_transport(ReqwestTransport::default(), config, session);

		(client, store_backend)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use httpmock as _;
