#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use quotehub_client::{
	_preludet::*,
	api::{Story, StoryId, ThemeId},
	events::{ChangeFeed, ListEvent},
};

fn story(id: &str, themes: &[&str]) -> Story {
	Story {
		id: StoryId::new(id).expect("Story identifier fixture should be valid."),
		quotes: Vec::new(),
		content: None,
		is_public: true,
		keywords: Vec::new(),
		theme_ids: themes
			.iter()
			.map(|theme| ThemeId::new(theme).expect("Theme identifier fixture should be valid."))
			.collect(),
		created_at: None,
	}
}

fn story_json(id: &str, themes: &[&str]) -> String {
	let theme_list: Vec<String> = themes.iter().map(|theme| format!("\"{theme}\"")).collect();

	format!(r#"{{"_id":"{id}","isPublic":true,"themeIds":[{}]}}"#, theme_list.join(","))
}

fn page_of(stories: &[String]) -> String {
	format!(
		r#"{{"success":true,"data":[{}],"currentPage":1,"totalPages":1,"pageSize":10,"totalItems":{}}}"#,
		stories.join(","),
		stories.len(),
	)
}

fn ids(loader: &quotehub_client::loader::PagedLoader<Story>) -> Vec<String> {
	loader.items().iter().map(|story| story.id.to_string()).collect()
}

#[tokio::test]
async fn deletion_reaches_every_attached_loader_regardless_of_position() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_reqwest_test_client(
		Url::parse(&server.base_url()).expect("Mock server base URL should parse successfully."),
	)
	.await;
	let client = Arc::new(client);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/bookstories");
			then.status(200).header("content-type", "application/json").body(page_of(&[
				story_json("s1", &["classics"]),
				story_json("s2", &[]),
				story_json("s3", &["classics"]),
			]));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/bookstories/theme/classics");
			then.status(200).header("content-type", "application/json").body(page_of(&[
				story_json("s1", &["classics"]),
				story_json("s3", &["classics"]),
			]));
		})
		.await;

	let classics = ThemeId::new("classics").expect("Theme identifier fixture should be valid.");
	let all_stories = Arc::new(client.clone().stories_loader());
	let theme_stories = Arc::new(client.clone().theme_stories_loader(classics));

	all_stories.load_next().await.expect("Story page should load.");
	theme_stories.load_next().await.expect("Theme story page should load.");

	let feed = ChangeFeed::<Story>::new();
	let _all_guard = feed.attach(&all_stories);
	let _theme_guard = feed.attach(&theme_stories);

	feed.publish(ListEvent::Deleted(
		StoryId::new("s3").expect("Story identifier fixture should be valid."),
	));

	assert_eq!(ids(&all_stories), vec!["s1", "s2"], "deletion must remove a tail item");
	assert_eq!(ids(&theme_stories), vec!["s1"], "deletion must reach every attached loader");

	feed.publish(ListEvent::Deleted(
		StoryId::new("s1").expect("Story identifier fixture should be valid."),
	));

	assert_eq!(ids(&all_stories), vec!["s2"], "deletion must remove a head item");
	assert!(theme_stories.is_empty());
}

#[tokio::test]
async fn updates_follow_the_membership_predicate() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_reqwest_test_client(
		Url::parse(&server.base_url()).expect("Mock server base URL should parse successfully."),
	)
	.await;
	let client = Arc::new(client);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/bookstories/theme/classics");
			then.status(200)
				.header("content-type", "application/json")
				.body(page_of(&[story_json("s1", &["classics"])]));
		})
		.await;

	let classics = ThemeId::new("classics").expect("Theme identifier fixture should be valid.");
	let theme_stories = Arc::new(client.clone().theme_stories_loader(classics));

	theme_stories.load_next().await.expect("Theme story page should load.");

	let feed = ChangeFeed::<Story>::new();
	let _guard = feed.attach(&theme_stories);

	// Edited out of the theme: the loader drops its copy.
	feed.publish(ListEvent::Updated(story("s1", &[])));

	assert!(theme_stories.is_empty());

	// Edited into the theme: the loader prepends the story it never fetched.
	feed.publish(ListEvent::Updated(story("s2", &["classics"])));

	assert_eq!(ids(&theme_stories), vec!["s2"]);

	// Created into the theme: prepended ahead of older items.
	feed.publish(ListEvent::Created(story("s3", &["classics"])));

	assert_eq!(ids(&theme_stories), vec!["s3", "s2"]);

	// Created outside the theme: ignored.
	feed.publish(ListEvent::Created(story("s4", &["poetry"])));

	assert_eq!(theme_stories.len(), 2);
}

#[tokio::test]
async fn dropped_loaders_fall_out_of_the_feed() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_reqwest_test_client(
		Url::parse(&server.base_url()).expect("Mock server base URL should parse successfully."),
	)
	.await;
	let client = Arc::new(client);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/bookstories");
			then.status(200)
				.header("content-type", "application/json")
				.body(page_of(&[story_json("s1", &[])]));
		})
		.await;

	let loader = Arc::new(client.clone().stories_loader());

	loader.load_next().await.expect("Story page should load.");

	let feed = ChangeFeed::<Story>::new();
	let _guard = feed.attach(&loader);

	drop(loader);

	// Publishing after the owning screen dropped its loader must not panic or leak.
	feed.publish(ListEvent::Created(story("s2", &[])));

	assert_eq!(feed.subscriber_count(), 1, "the weak subscription stays until its guard drops");
}
