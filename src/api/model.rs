//! Domain entities returned by the QuoteHub API.

// self
use crate::{
	_prelude::*,
	api::id::{StoryId, ThemeId, UserId},
};

/// Identity contract linking domain entities to loaders and change feeds.
///
/// Reconciliation compares entities exclusively through this key, so replacing or
/// removing an item never depends on full structural equality.
pub trait Entity {
	/// Identity key type compared during reconciliation.
	type Id: 'static + Clone + Debug + PartialEq + Send + Sync;

	/// Returns the entity's identity key.
	fn id(&self) -> &Self::Id;
}

/// A QuoteHub account as it appears in follow lists and profiles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	/// Server-assigned identifier.
	#[serde(rename = "_id")]
	pub id: UserId,
	/// Display name; unique across the service.
	pub nickname: String,
	/// Avatar URL, when the user uploaded one.
	#[serde(default)]
	pub profile_image: Option<String>,
	/// Free-form status line shown on the profile.
	#[serde(default)]
	pub status_message: Option<String>,
	/// Reading goal the user set for the current month.
	#[serde(default)]
	pub monthly_reading_goal: Option<u32>,
}
impl Entity for User {
	type Id = UserId;

	fn id(&self) -> &UserId {
		&self.id
	}
}

/// A single quoted passage inside a story.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
	/// Quoted text.
	pub quote: String,
	/// Page number the passage was taken from.
	#[serde(default)]
	pub page: Option<u32>,
}

/// A book story: quotes plus commentary, optionally grouped into themes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
	/// Server-assigned identifier.
	#[serde(rename = "_id")]
	pub id: StoryId,
	/// Quoted passages, in author order.
	#[serde(default)]
	pub quotes: Vec<Quote>,
	/// Author commentary accompanying the quotes.
	#[serde(default)]
	pub content: Option<String>,
	/// Whether the story is visible to other users.
	pub is_public: bool,
	/// Search keywords attached by the author.
	#[serde(default)]
	pub keywords: Vec<String>,
	/// Themes the story is filed under.
	#[serde(default)]
	pub theme_ids: Vec<ThemeId>,
	/// Creation instant reported by the server.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
}
impl Story {
	/// Returns `true` when the story is filed under the provided theme.
	pub fn in_theme(&self, theme: &ThemeId) -> bool {
		self.theme_ids.contains(theme)
	}
}
impl Entity for Story {
	type Id = StoryId;

	fn id(&self) -> &StoryId {
		&self.id
	}
}

/// A named grouping of stories.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
	/// Server-assigned identifier.
	#[serde(rename = "_id")]
	pub id: ThemeId,
	/// Theme title shown in the library.
	pub name: String,
	/// Optional description of what belongs in the theme.
	#[serde(default)]
	pub description: Option<String>,
	/// Whether the theme is visible to other users.
	pub is_public: bool,
}
impl Entity for Theme {
	type Id = ThemeId;

	fn id(&self) -> &ThemeId {
		&self.id
	}
}

/// Follower/following tallies for a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowCounts {
	/// Number of accounts following the user.
	pub followers_count: u64,
	/// Number of accounts the user follows.
	pub following_count: u64,
}

/// Relationship state between the session user and another account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowStatus {
	/// Whether the session user follows the account.
	pub is_following: bool,
	/// Whether either side has blocked the other.
	#[serde(default)]
	pub is_blocked: bool,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn story_decodes_mongo_style_documents() {
		let body = br#"{
			"_id": "6568a1f2c3d4e5f6a7b8c9d0",
			"quotes": [{"quote": "We are all in the gutter.", "page": 12}],
			"content": "Favourite line so far.",
			"isPublic": true,
			"keywords": ["wilde"],
			"themeIds": ["theme-classics"],
			"createdAt": "2025-11-02T09:30:00Z"
		}"#;
		let story: Story =
			serde_json::from_slice(body).expect("Documented story shape should decode.");

		assert_eq!(story.id.as_ref(), "6568a1f2c3d4e5f6a7b8c9d0");
		assert_eq!(story.quotes.len(), 1);
		assert!(story.in_theme(
			&ThemeId::new("theme-classics").expect("Theme identifier fixture should be valid.")
		));
		assert!(story.created_at.is_some());
	}

	#[test]
	fn user_tolerates_missing_optional_fields() {
		let body = br#"{"_id": "user-1", "nickname": "bookworm"}"#;
		let user: User = serde_json::from_slice(body).expect("Minimal user shape should decode.");

		assert_eq!(user.nickname, "bookworm");
		assert!(user.profile_image.is_none());
		assert!(user.monthly_reading_goal.is_none());
	}

	#[test]
	fn follow_status_defaults_the_block_flag() {
		let status: FollowStatus = serde_json::from_slice(br#"{"isFollowing": true}"#)
			.expect("Follow status without block flag should decode.");

		assert!(status.is_following);
		assert!(!status.is_blocked);
	}
}
