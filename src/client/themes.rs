//! Theme endpoints: paged lists and CRUD.

// self
use crate::{
	_prelude::*,
	api::{Page, Theme, ThemeId},
	client::ApiClient,
	http::{ApiRequest, ApiTransport, HttpMethod},
	loader::{PageFuture, PageSource, PagedLoader},
};

impl<T> ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Fetches one page of the session user's themes.
	pub async fn themes_page(&self, page: u32, page_size: u32) -> Result<Page<Theme>> {
		let url = self.endpoint("themes/my")?;

		self.fetch_page(url, page, page_size).await
	}

	/// Creates a theme, returning the server-assigned entity.
	pub async fn create_theme(&self, draft: &ThemeDraft) -> Result<Theme> {
		let url = self.endpoint("themes")?;
		let body = Self::json_body(draft)?;

		self.send_mutation(ApiRequest::new(HttpMethod::Post, url).with_body(body)).await
	}

	/// Updates a theme, returning the edited entity.
	pub async fn update_theme(&self, theme: &ThemeId, draft: &ThemeDraft) -> Result<Theme> {
		let url = self.endpoint(&format!("themes/{theme}"))?;
		let body = Self::json_body(draft)?;

		self.send_mutation(ApiRequest::new(HttpMethod::Put, url).with_body(body)).await
	}

	/// Deletes a theme. Stories filed under it survive; only the grouping disappears.
	pub async fn delete_theme(&self, theme: &ThemeId) -> Result<()> {
		let url = self.endpoint(&format!("themes/{theme}"))?;

		self.send_ack(ApiRequest::new(HttpMethod::Delete, url)).await
	}

	/// Builds a loader streaming the session user's themes.
	pub fn themes_loader(self: Arc<Self>) -> PagedLoader<Theme> {
		let page_size = self.config.default_page_size();

		PagedLoader::new(ThemesSource { client: self }, page_size)
	}
}

/// Page source streaming the session user's themes.
pub struct ThemesSource<T>
where
	T: ?Sized + ApiTransport,
{
	client: Arc<ApiClient<T>>,
}
impl<T> PageSource<Theme> for ThemesSource<T>
where
	T: ?Sized + ApiTransport,
{
	fn fetch(&self, page: u32, page_size: u32) -> PageFuture<'_, Theme> {
		Box::pin(async move { self.client.themes_page(page, page_size).await })
	}
}

/// Draft payload for creating or updating a theme.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDraft {
	/// Theme title shown in the library.
	pub name: String,
	/// Optional description of what belongs in the theme.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Whether the theme should be visible to other users.
	pub is_public: bool,
}
impl ThemeDraft {
	/// Creates a draft with the provided title and visibility.
	pub fn new(name: impl Into<String>, is_public: bool) -> Self {
		Self { name: name.into(), description: None, is_public }
	}

	/// Attaches a description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}
}
