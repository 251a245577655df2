//! Generic paged collection loading with cooperative in-flight guarding.
//!
//! A [`PagedLoader`] owns the accumulated items of one collection endpoint: it fetches
//! pages through a [`PageSource`], appends results in arrival order, and tracks the
//! server-reported pagination state in a [`PageCursor`]. One logical fetch may be in
//! flight per loader at a time—re-entrant calls are no-ops, not queued work—and a reset
//! supersedes whatever is still in flight so cancelled fetches can never mutate state.
//! Independent loaders share nothing and may fetch concurrently.

pub mod cursor;

pub use cursor::PageCursor;

// self
use crate::{
	_prelude::*,
	api::{Entity, Page},
	events::ListEvent,
};

/// Boxed future returned by [`PageSource::fetch`].
pub type PageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<Page<T>>> + 'a + Send>>;

/// Source of collection pages consumed by [`PagedLoader`].
///
/// The typed endpoint services implement this for their collection endpoints; tests
/// implement it over scripted page sequences. The seam keeps loaders decoupled from any
/// particular client or transport.
pub trait PageSource<T>
where
	Self: Send + Sync,
{
	/// Fetches the requested page.
	fn fetch(&self, page: u32, page_size: u32) -> PageFuture<'_, T>;
}

/// Outcome of a [`PagedLoader::load_next`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
	/// A page was fetched and its items appended.
	Loaded {
		/// Number of items appended by this fetch.
		appended: usize,
		/// Whether the server reported this page as the final one.
		last_page: bool,
	},
	/// The server already reported the final page; no request was made.
	EndOfList,
	/// Another fetch owns the in-flight guard; no request was made.
	InFlight,
	/// The loader was reset while the fetch was in flight; its results were discarded.
	Superseded,
}

type FilterFn<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

struct LoaderState<T> {
	items: Vec<T>,
	cursor: PageCursor,
	epoch: u64,
}

/// Paged collection controller accumulating items in arrival order.
pub struct PagedLoader<T>
where
	T: Entity,
{
	source: Box<dyn PageSource<T>>,
	state: Mutex<LoaderState<T>>,
	in_flight: AsyncMutex<()>,
	filter: Option<FilterFn<T>>,
}
impl<T> PagedLoader<T>
where
	T: Clone + Entity,
{
	/// Creates a loader over the provided source, positioned at page 1.
	pub fn new(source: impl PageSource<T> + 'static, page_size: u32) -> Self {
		Self {
			source: Box::new(source),
			state: Mutex::new(LoaderState {
				items: Vec::new(),
				cursor: PageCursor::new(page_size),
				epoch: 0,
			}),
			in_flight: AsyncMutex::new(()),
			filter: None,
		}
	}

	/// Restricts reconciliation to entities matching `predicate` (e.g. theme membership).
	///
	/// The predicate only affects [`apply`](Self::apply); fetched pages are appended as
	/// the server returned them.
	pub fn with_filter(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
		self.filter = Some(Box::new(predicate));

		self
	}

	/// Fetches the next page and appends its items.
	///
	/// No-ops without a network call once the server reported the final page
	/// ([`LoadOutcome::EndOfList`]) or while another fetch is in flight
	/// ([`LoadOutcome::InFlight`]). On failure the accumulated list and cursor are left
	/// untouched and the error is surfaced to the caller.
	pub async fn load_next(&self) -> Result<LoadOutcome> {
		let Some(_in_flight) = self.in_flight.try_lock() else {
			return Ok(LoadOutcome::InFlight);
		};
		let (page, page_size, epoch) = {
			let state = self.state.lock();

			if state.cursor.is_last_page() {
				return Ok(LoadOutcome::EndOfList);
			}

			(state.cursor.next_page(), state.cursor.page_size(), state.epoch)
		};
		let fetched = self.source.fetch(page, page_size).await?;
		let mut state = self.state.lock();

		if state.epoch != epoch {
			return Ok(LoadOutcome::Superseded);
		}

		let appended = fetched.items.len();

		state.items.extend(fetched.items);
		state.cursor.advance(fetched.current_page, fetched.total_pages);

		Ok(LoadOutcome::Loaded { appended, last_page: state.cursor.is_last_page() })
	}

	/// Clears the accumulated list and restores the cursor to page 1.
	///
	/// Any fetch still in flight is superseded: when it completes it observes the epoch
	/// bump and discards its results without touching list or cursor.
	pub fn reset(&self) {
		let mut state = self.state.lock();

		state.items.clear();
		state.cursor.reset();
		state.epoch += 1;
	}

	/// Resets the loader and fetches the first page, reproducing a fresh loader's state.
	///
	/// Callers refreshing while a fetch is in flight should drop that fetch's future
	/// first; otherwise the reload reports [`LoadOutcome::InFlight`] until the superseded
	/// fetch resolves.
	pub async fn refresh(&self) -> Result<LoadOutcome> {
		self.reset();

		self.load_next().await
	}

	/// Returns a snapshot of the accumulated items, in arrival order.
	pub fn items(&self) -> Vec<T> {
		self.state.lock().items.clone()
	}

	/// Returns the number of accumulated items.
	pub fn len(&self) -> usize {
		self.state.lock().items.len()
	}

	/// Returns `true` while no items have been accumulated.
	pub fn is_empty(&self) -> bool {
		self.state.lock().items.is_empty()
	}

	/// Returns `true` once the server reported the final page.
	pub fn is_last_page(&self) -> bool {
		self.state.lock().cursor.is_last_page()
	}

	/// Reconciles the accumulated list against an entity mutation that happened elsewhere
	/// in the process.
	///
	/// Created entities are prepended when they match the filter predicate. Updated
	/// entities are replaced in place, prepended, or removed depending on whether they
	/// were present and whether they still match. Deleted entities are removed by
	/// identity wherever they sit.
	pub fn apply(&self, event: &ListEvent<T>) {
		match event {
			ListEvent::Created(item) =>
				if self.matches(item) {
					self.state.lock().items.insert(0, item.clone());
				},
			ListEvent::Updated(item) => {
				let should_hold = self.matches(item);
				let mut state = self.state.lock();
				let position =
					state.items.iter().position(|existing| existing.id() == item.id());

				match (position, should_hold) {
					(Some(index), true) => state.items[index] = item.clone(),
					(None, true) => state.items.insert(0, item.clone()),
					(Some(index), false) => {
						state.items.remove(index);
					},
					(None, false) => {},
				}
			},
			ListEvent::Deleted(id) => {
				self.state.lock().items.retain(|existing| existing.id() != id);
			},
		}
	}

	fn matches(&self, item: &T) -> bool {
		self.filter.as_ref().is_none_or(|predicate| predicate(item))
	}
}
impl<T> Debug for PagedLoader<T>
where
	T: Entity,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let state = self.state.lock();

		f.debug_struct("PagedLoader")
			.field("items", &state.items.len())
			.field("cursor", &state.cursor)
			.field("filtered", &self.filter.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{
		collections::VecDeque,
		sync::atomic::{AtomicU32, Ordering},
	};
	// self
	use super::*;

	#[derive(Clone, Debug, PartialEq)]
	struct Marble {
		id: u32,
		shade: &'static str,
	}
	impl Entity for Marble {
		type Id = u32;

		fn id(&self) -> &u32 {
			&self.id
		}
	}

	fn marble(id: u32) -> Marble {
		Marble { id, shade: "agate" }
	}

	fn page(ids: &[u32], current_page: u32, total_pages: u32) -> Page<Marble> {
		Page {
			items: ids.iter().copied().map(marble).collect(),
			current_page,
			total_pages,
			page_size: ids.len() as u32,
			total_items: 0,
		}
	}

	/// Scripted source popping pre-baked results; counts fetches so no-op paths can prove
	/// they never reached the network.
	struct ScriptedSource {
		pages: Mutex<VecDeque<Result<Page<Marble>>>>,
		calls: AtomicU32,
	}
	impl ScriptedSource {
		fn new(pages: Vec<Result<Page<Marble>>>) -> Self {
			Self { pages: Mutex::new(pages.into()), calls: AtomicU32::new(0) }
		}

		fn calls(&self) -> u32 {
			self.calls.load(Ordering::SeqCst)
		}
	}
	impl PageSource<Marble> for Arc<ScriptedSource> {
		fn fetch(&self, _page: u32, _page_size: u32) -> PageFuture<'_, Marble> {
			self.calls.fetch_add(1, Ordering::SeqCst);

			let next = self
				.pages
				.lock()
				.pop_front()
				.expect("Scripted source ran out of pages; the loader over-fetched.");

			Box::pin(async move { next })
		}
	}

	#[tokio::test]
	async fn accumulation_preserves_arrival_order_across_pages() {
		let source = Arc::new(ScriptedSource::new(vec![
			Ok(page(&[1, 2], 1, 3)),
			Ok(page(&[3, 4], 2, 3)),
			Ok(page(&[5], 3, 3)),
		]));
		let loader = PagedLoader::new(source.clone(), 2);

		assert_eq!(
			loader.load_next().await.expect("First page should load."),
			LoadOutcome::Loaded { appended: 2, last_page: false }
		);
		assert_eq!(
			loader.load_next().await.expect("Second page should load."),
			LoadOutcome::Loaded { appended: 2, last_page: false }
		);
		assert_eq!(
			loader.load_next().await.expect("Third page should load."),
			LoadOutcome::Loaded { appended: 1, last_page: true }
		);

		let ids: Vec<u32> = loader.items().iter().map(|item| item.id).collect();

		assert_eq!(ids, vec![1, 2, 3, 4, 5]);
		assert_eq!(loader.len(), 5);
	}

	#[tokio::test]
	async fn end_of_list_is_a_no_op_without_a_network_call() {
		let source = Arc::new(ScriptedSource::new(vec![Ok(page(&[1], 1, 1))]));
		let loader = PagedLoader::new(source.clone(), 10);

		loader.load_next().await.expect("Single page should load.");

		assert!(loader.is_last_page());
		assert_eq!(
			loader.load_next().await.expect("End-of-list call should succeed."),
			LoadOutcome::EndOfList
		);
		assert_eq!(source.calls(), 1, "no further request may leave the loader");
		assert_eq!(loader.len(), 1);
	}

	#[tokio::test]
	async fn failures_leave_cursor_and_list_untouched() {
		let source = Arc::new(ScriptedSource::new(vec![
			Ok(page(&[1], 1, 2)),
			Err(Error::api("stories are unavailable", Some(500))),
			Ok(page(&[2], 2, 2)),
		]));
		let loader = PagedLoader::new(source.clone(), 1);

		loader.load_next().await.expect("First page should load.");

		let error = loader.load_next().await.expect_err("Scripted failure should surface.");

		assert!(matches!(error, Error::Api { .. }));
		assert_eq!(loader.len(), 1, "a failed fetch must not mutate the list");
		assert!(!loader.is_last_page());

		// The cursor still points at page 2, so the retry resumes where the failure hit.
		loader.load_next().await.expect("Retry should load page 2.");

		let ids: Vec<u32> = loader.items().iter().map(|item| item.id).collect();

		assert_eq!(ids, vec![1, 2]);
	}

	#[tokio::test]
	async fn refresh_reproduces_a_fresh_loader() {
		let source = Arc::new(ScriptedSource::new(vec![
			Ok(page(&[1, 2], 1, 2)),
			Ok(page(&[3], 2, 2)),
			Ok(page(&[1, 2], 1, 2)),
		]));
		let loader = PagedLoader::new(source.clone(), 2);

		loader.load_next().await.expect("First page should load.");
		loader.load_next().await.expect("Second page should load.");
		assert!(loader.is_last_page());

		loader.refresh().await.expect("Refresh should reload the first page.");

		let ids: Vec<u32> = loader.items().iter().map(|item| item.id).collect();

		assert_eq!(ids, vec![1, 2]);
		assert!(!loader.is_last_page());
	}

	#[tokio::test]
	async fn reset_supersedes_an_in_flight_fetch() {
		/// Source that parks every fetch on a gate until the test releases it.
		struct GatedSource {
			gate: Arc<AsyncMutex<()>>,
			started: Arc<AtomicU32>,
		}
		impl PageSource<Marble> for GatedSource {
			fn fetch(&self, _page: u32, _page_size: u32) -> PageFuture<'_, Marble> {
				let gate = self.gate.clone();
				let started = self.started.clone();

				Box::pin(async move {
					started.fetch_add(1, Ordering::SeqCst);

					let _released = gate.lock().await;

					Ok(page(&[7], 1, 1))
				})
			}
		}

		let gate = Arc::new(AsyncMutex::new(()));
		let started = Arc::new(AtomicU32::new(0));
		let loader = Arc::new(PagedLoader::new(
			GatedSource { gate: gate.clone(), started: started.clone() },
			10,
		));
		let held = gate.lock().await;
		let background = tokio::spawn({
			let loader = loader.clone();

			async move { loader.load_next().await }
		});

		while started.load(Ordering::SeqCst) == 0 {
			tokio::task::yield_now().await;
		}

		loader.reset();
		drop(held);

		let outcome = background
			.await
			.expect("Background fetch should not panic.")
			.expect("Background fetch should resolve.");

		assert_eq!(outcome, LoadOutcome::Superseded);
		assert!(loader.is_empty(), "a superseded fetch must not mutate the list");
		assert!(!loader.is_last_page());
	}

	#[test]
	fn update_matrix_follows_presence_and_predicate() {
		let source = Arc::new(ScriptedSource::new(Vec::new()));
		let loader = PagedLoader::new(source, 10).with_filter(|item: &Marble| item.shade == "agate");

		loader.apply(&ListEvent::Created(marble(1)));
		loader.apply(&ListEvent::Created(marble(2)));

		// Present + still matching: replaced in place.
		loader.apply(&ListEvent::Updated(Marble { id: 1, shade: "agate" }));
		assert_eq!(loader.len(), 2);

		// Present + no longer matching: removed.
		loader.apply(&ListEvent::Updated(Marble { id: 1, shade: "onyx" }));
		assert_eq!(loader.items().iter().map(|item| item.id).collect::<Vec<_>>(), vec![2]);

		// Absent + matching: prepended.
		loader.apply(&ListEvent::Updated(marble(3)));
		assert_eq!(loader.items().iter().map(|item| item.id).collect::<Vec<_>>(), vec![3, 2]);

		// Absent + not matching: ignored.
		loader.apply(&ListEvent::Updated(Marble { id: 4, shade: "onyx" }));
		assert_eq!(loader.len(), 2);

		// Created + not matching: ignored.
		loader.apply(&ListEvent::Created(Marble { id: 5, shade: "onyx" }));
		assert_eq!(loader.len(), 2);

		loader.apply(&ListEvent::Deleted(2));
		assert_eq!(loader.items().iter().map(|item| item.id).collect::<Vec<_>>(), vec![3]);
	}
}
