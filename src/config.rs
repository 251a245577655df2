//! Endpoint configuration shared by every client instance.

// self
use crate::{_prelude::*, error::ConfigError};

const DEFAULT_RENEW_PATH: &str = "/auth/renew-token";
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Validated endpoint configuration: API root, renewal path, and page sizing.
#[derive(Clone, Debug)]
pub struct ApiConfig {
	base_url: Url,
	renew_path: String,
	default_page_size: u32,
}
impl ApiConfig {
	/// Returns a builder rooted at the provided base URL.
	pub fn builder(base_url: Url) -> ApiConfigBuilder {
		ApiConfigBuilder {
			base_url,
			renew_path: DEFAULT_RENEW_PATH.into(),
			default_page_size: DEFAULT_PAGE_SIZE,
		}
	}

	/// Returns the API root every endpoint is joined onto.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Returns the page size loaders use unless overridden per loader.
	pub fn default_page_size(&self) -> u32 {
		self.default_page_size
	}

	/// Joins a relative endpoint path onto the base URL.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		self.base_url
			.join(path.trim_start_matches('/'))
			.map_err(|_| ConfigError::InvalidEndpoint { path: path.into() })
	}

	/// Returns the absolute URL of the credential renewal endpoint.
	pub fn renew_endpoint(&self) -> Result<Url, ConfigError> {
		let path = self.renew_path.clone();

		self.endpoint(&path)
	}
}

/// Builder for [`ApiConfig`] applying validation at build time.
#[derive(Clone, Debug)]
pub struct ApiConfigBuilder {
	base_url: Url,
	renew_path: String,
	default_page_size: u32,
}
impl ApiConfigBuilder {
	/// Overrides the credential renewal path (defaults to `/auth/renew-token`).
	pub fn renew_path(mut self, path: impl Into<String>) -> Self {
		self.renew_path = path.into();

		self
	}

	/// Overrides the default page size (defaults to 10; must be greater than zero).
	pub fn default_page_size(mut self, size: u32) -> Self {
		self.default_page_size = size;

		self
	}

	/// Consumes the builder and produces a validated [`ApiConfig`].
	pub fn build(self) -> Result<ApiConfig, ConfigError> {
		if self.base_url.cannot_be_a_base() {
			return Err(ConfigError::InvalidBaseUrl {
				reason: "URL cannot carry relative endpoint paths".into(),
			});
		}
		if self.default_page_size == 0 {
			return Err(ConfigError::NonPositivePageSize);
		}

		let mut base_url = self.base_url;

		// Url::join drops the last path segment unless the base ends with a slash.
		if !base_url.path().ends_with('/') {
			let rooted = format!("{}/", base_url.path());

			base_url.set_path(&rooted);
		}

		Ok(ApiConfig { base_url, renew_path: self.renew_path, default_page_size: self.default_page_size })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn build_config(base: &str) -> ApiConfig {
		let url = Url::parse(base).expect("Base URL fixture should parse successfully.");

		ApiConfig::builder(url).build().expect("Config fixture should build successfully.")
	}

	#[test]
	fn endpoint_joins_preserve_the_base_path() {
		let config = build_config("https://api.quotehub.io/v1");
		let endpoint = config
			.endpoint("/bookstories/42")
			.expect("Endpoint join should succeed for a valid path.");

		assert_eq!(endpoint.as_str(), "https://api.quotehub.io/v1/bookstories/42");
	}

	#[test]
	fn renew_endpoint_uses_the_configured_path() {
		let url = Url::parse("https://api.quotehub.io").expect("Base URL should parse.");
		let config = ApiConfig::builder(url)
			.renew_path("/auth/rotate")
			.build()
			.expect("Config with custom renew path should build.");

		assert_eq!(
			config.renew_endpoint().expect("Renew endpoint should join.").as_str(),
			"https://api.quotehub.io/auth/rotate"
		);
	}

	#[test]
	fn zero_page_size_is_rejected() {
		let url = Url::parse("https://api.quotehub.io").expect("Base URL should parse.");
		let result = ApiConfig::builder(url).default_page_size(0).build();

		assert!(matches!(result, Err(ConfigError::NonPositivePageSize)));
	}

	#[test]
	fn opaque_base_urls_are_rejected() {
		let url = Url::parse("mailto:dev@quotehub.io").expect("Opaque URL should parse.");
		let result = ApiConfig::builder(url).build();

		assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
	}
}
