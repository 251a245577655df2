//! Book-story endpoints: paged lists, single fetches, and CRUD.
//!
//! Mutations return the affected entity so callers can broadcast it on a
//! [`crate::events::ChangeFeed`] and let every attached loader reconcile.

// self
use crate::{
	_prelude::*,
	api::{Page, Quote, Story, StoryId, ThemeId},
	client::ApiClient,
	http::{ApiRequest, ApiTransport, HttpMethod},
	loader::{PageFuture, PageSource, PagedLoader},
};

impl<T> ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Fetches one page of the session user's stories.
	pub async fn stories_page(&self, page: u32, page_size: u32) -> Result<Page<Story>> {
		let url = self.endpoint("bookstories")?;

		self.fetch_page(url, page, page_size).await
	}

	/// Fetches one page of the session user's stories filed under `theme`.
	pub async fn theme_stories_page(
		&self,
		theme: &ThemeId,
		page: u32,
		page_size: u32,
	) -> Result<Page<Story>> {
		let url = self.endpoint(&format!("bookstories/theme/{theme}"))?;

		self.fetch_page(url, page, page_size).await
	}

	/// Fetches a single story by identity.
	pub async fn story(&self, story: &StoryId) -> Result<Story> {
		let url = self.endpoint(&format!("bookstories/{story}"))?;

		self.fetch_entity(url).await
	}

	/// Creates a story, returning the server-assigned entity.
	pub async fn create_story(&self, draft: &StoryDraft) -> Result<Story> {
		let url = self.endpoint("bookstories")?;
		let body = Self::json_body(draft)?;

		self.send_mutation(ApiRequest::new(HttpMethod::Post, url).with_body(body)).await
	}

	/// Updates a story, returning the edited entity.
	pub async fn update_story(&self, story: &StoryId, draft: &StoryDraft) -> Result<Story> {
		let url = self.endpoint(&format!("bookstories/{story}"))?;
		let body = Self::json_body(draft)?;

		self.send_mutation(ApiRequest::new(HttpMethod::Put, url).with_body(body)).await
	}

	/// Deletes a story.
	pub async fn delete_story(&self, story: &StoryId) -> Result<()> {
		let url = self.endpoint(&format!("bookstories/{story}"))?;

		self.send_ack(ApiRequest::new(HttpMethod::Delete, url)).await
	}

	/// Builds a loader streaming the session user's stories.
	pub fn stories_loader(self: Arc<Self>) -> PagedLoader<Story> {
		let page_size = self.config.default_page_size();

		PagedLoader::new(StoriesSource { client: self }, page_size)
	}

	/// Builds a loader streaming the stories filed under `theme`.
	///
	/// The loader reconciles with theme membership as its predicate: an edit that removes
	/// the story from `theme` drops it from this list, and one that adds it prepends it.
	pub fn theme_stories_loader(self: Arc<Self>, theme: ThemeId) -> PagedLoader<Story> {
		let page_size = self.config.default_page_size();
		let membership = theme.clone();

		PagedLoader::new(ThemeStoriesSource { client: self, theme }, page_size)
			.with_filter(move |story: &Story| story.in_theme(&membership))
	}
}

/// Page source streaming the session user's stories.
pub struct StoriesSource<T>
where
	T: ?Sized + ApiTransport,
{
	client: Arc<ApiClient<T>>,
}
impl<T> PageSource<Story> for StoriesSource<T>
where
	T: ?Sized + ApiTransport,
{
	fn fetch(&self, page: u32, page_size: u32) -> PageFuture<'_, Story> {
		Box::pin(async move { self.client.stories_page(page, page_size).await })
	}
}

/// Page source streaming the stories filed under one theme.
pub struct ThemeStoriesSource<T>
where
	T: ?Sized + ApiTransport,
{
	client: Arc<ApiClient<T>>,
	theme: ThemeId,
}
impl<T> PageSource<Story> for ThemeStoriesSource<T>
where
	T: ?Sized + ApiTransport,
{
	fn fetch(&self, page: u32, page_size: u32) -> PageFuture<'_, Story> {
		Box::pin(async move { self.client.theme_stories_page(&self.theme, page, page_size).await })
	}
}

/// Draft payload for creating or updating a story.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryDraft {
	/// Catalogue identifier of the quoted book.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub book_id: Option<String>,
	/// Quoted passages, in author order.
	pub quotes: Vec<Quote>,
	/// Author commentary accompanying the quotes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub content: Option<String>,
	/// Whether the story should be visible to other users.
	pub is_public: bool,
	/// Search keywords to attach.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub keywords: Vec<String>,
	/// Themes to file the story under.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub theme_ids: Vec<ThemeId>,
}
impl StoryDraft {
	/// Creates a draft with the provided quotes and visibility.
	pub fn new(quotes: Vec<Quote>, is_public: bool) -> Self {
		Self {
			book_id: None,
			quotes,
			content: None,
			is_public,
			keywords: Vec::new(),
			theme_ids: Vec::new(),
		}
	}

	/// Attaches the quoted book's catalogue identifier.
	pub fn with_book(mut self, book_id: impl Into<String>) -> Self {
		self.book_id = Some(book_id.into());

		self
	}

	/// Attaches author commentary.
	pub fn with_content(mut self, content: impl Into<String>) -> Self {
		self.content = Some(content.into());

		self
	}

	/// Attaches search keywords.
	pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
		self.keywords = keywords;

		self
	}

	/// Files the story under the provided themes.
	pub fn with_themes(mut self, themes: Vec<ThemeId>) -> Self {
		self.theme_ids = themes;

		self
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn drafts_omit_unset_optional_fields() {
		let draft = StoryDraft::new(
			vec![Quote { quote: "It was the best of times.".into(), page: Some(1) }],
			true,
		);
		let body = serde_json::to_value(&draft).expect("Draft should serialize to JSON.");
		let object = body.as_object().expect("Draft should serialize to an object.");

		assert!(!object.contains_key("bookId"));
		assert!(!object.contains_key("content"));
		assert!(!object.contains_key("keywords"));
		assert!(object.contains_key("quotes"));
		assert_eq!(object.get("isPublic"), Some(&serde_json::Value::Bool(true)));
	}

	#[test]
	fn draft_builders_fill_the_wire_shape() {
		let theme = ThemeId::new("theme-1").expect("Theme identifier fixture should be valid.");
		let draft = StoryDraft::new(Vec::new(), false)
			.with_book("book-42")
			.with_content("Margin notes.")
			.with_keywords(vec!["dickens".into()])
			.with_themes(vec![theme]);
		let body = serde_json::to_value(&draft).expect("Draft should serialize to JSON.");

		assert_eq!(body["bookId"], "book-42");
		assert_eq!(body["content"], "Margin notes.");
		assert_eq!(body["keywords"][0], "dickens");
		assert_eq!(body["themeIds"][0], "theme-1");
	}
}
