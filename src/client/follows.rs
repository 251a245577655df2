//! Follow-relationship endpoints: paged lists, tallies, status, follow/unfollow.

// self
use crate::{
	_prelude::*,
	api::{FollowCounts, FollowStatus, Page, User, UserId},
	client::ApiClient,
	http::{ApiRequest, ApiTransport, HttpMethod},
	loader::{PageFuture, PageSource, PagedLoader},
};

impl<T> ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Fetches one page of the accounts following `user`.
	pub async fn followers_page(
		&self,
		user: &UserId,
		page: u32,
		page_size: u32,
	) -> Result<Page<User>> {
		let url = self.endpoint(&format!("follow/followers/{user}"))?;

		self.fetch_page(url, page, page_size).await
	}

	/// Fetches one page of the accounts `user` follows.
	pub async fn following_page(
		&self,
		user: &UserId,
		page: u32,
		page_size: u32,
	) -> Result<Page<User>> {
		let url = self.endpoint(&format!("follow/following/{user}"))?;

		self.fetch_page(url, page, page_size).await
	}

	/// Follows `user`, returning the followed account.
	pub async fn follow(&self, user: &UserId) -> Result<User> {
		let url = self.endpoint(&format!("follow/{user}"))?;

		self.send_mutation(ApiRequest::new(HttpMethod::Post, url)).await
	}

	/// Unfollows `user`.
	pub async fn unfollow(&self, user: &UserId) -> Result<()> {
		let url = self.endpoint(&format!("follow/{user}"))?;

		self.send_ack(ApiRequest::new(HttpMethod::Delete, url)).await
	}

	/// Fetches follower/following tallies for `user`.
	pub async fn follow_counts(&self, user: &UserId) -> Result<FollowCounts> {
		let url = self.endpoint(&format!("follow/counts/{user}"))?;

		self.fetch_entity(url).await
	}

	/// Fetches the relationship state between the session user and `user`.
	pub async fn follow_status(&self, user: &UserId) -> Result<FollowStatus> {
		let url = self.endpoint(&format!("follow/status/{user}"))?;

		self.fetch_entity(url).await
	}

	/// Builds a loader streaming the followers of `user`.
	pub fn followers_loader(self: Arc<Self>, user: UserId) -> PagedLoader<User> {
		let page_size = self.config.default_page_size();

		PagedLoader::new(FollowersSource { client: self, user }, page_size)
	}

	/// Builds a loader streaming the accounts `user` follows.
	pub fn following_loader(self: Arc<Self>, user: UserId) -> PagedLoader<User> {
		let page_size = self.config.default_page_size();

		PagedLoader::new(FollowingSource { client: self, user }, page_size)
	}
}

/// Page source streaming the followers of a user.
pub struct FollowersSource<T>
where
	T: ?Sized + ApiTransport,
{
	client: Arc<ApiClient<T>>,
	user: UserId,
}
impl<T> PageSource<User> for FollowersSource<T>
where
	T: ?Sized + ApiTransport,
{
	fn fetch(&self, page: u32, page_size: u32) -> PageFuture<'_, User> {
		Box::pin(async move { self.client.followers_page(&self.user, page, page_size).await })
	}
}

/// Page source streaming the accounts a user follows.
pub struct FollowingSource<T>
where
	T: ?Sized + ApiTransport,
{
	client: Arc<ApiClient<T>>,
	user: UserId,
}
impl<T> PageSource<User> for FollowingSource<T>
where
	T: ?Sized + ApiTransport,
{
	fn fetch(&self, page: u32, page_size: u32) -> PageFuture<'_, User> {
		Box::pin(async move { self.client.following_page(&self.user, page, page_size).await })
	}
}
