//! Typed in-process change feeds keeping every in-memory list coherent.
//!
//! When one screen of the application creates, edits, or deletes an entity, every loader
//! still holding a copy has to reconcile. The feed is an explicit publish/subscribe
//! channel with typed events—no ambient notification state—so each entity type gets its
//! own [`ChangeFeed`] and subscriptions are plain RAII guards. Fan-out is synchronous:
//! by the time [`ChangeFeed::publish`] returns, every live subscriber has observed the
//! event.

// std
use std::sync::{
	Weak,
	atomic::{AtomicU64, Ordering},
};
// self
use crate::{_prelude::*, api::Entity, loader::PagedLoader};

/// Entity mutation broadcast to all interested loaders.
#[derive(Clone, Debug)]
pub enum ListEvent<T>
where
	T: Entity,
{
	/// A new entity was created elsewhere in the process.
	Created(T),
	/// An existing entity was edited elsewhere in the process.
	Updated(T),
	/// The entity with the carried identity was deleted.
	Deleted(T::Id),
}

type Subscriber<T> = Arc<dyn Fn(&ListEvent<T>) + Send + Sync>;
type SubscriberMap<T> = Arc<RwLock<HashMap<u64, Subscriber<T>>>>;

/// Synchronous publish/subscribe hub for one entity type.
pub struct ChangeFeed<T>
where
	T: Entity,
{
	subscribers: SubscriberMap<T>,
	next_id: Arc<AtomicU64>,
}
impl<T> ChangeFeed<T>
where
	T: Entity,
{
	/// Creates an empty feed.
	pub fn new() -> Self {
		Self { subscribers: Default::default(), next_id: Default::default() }
	}

	/// Registers a subscriber; dropping the returned guard unsubscribes it.
	pub fn subscribe(
		&self,
		callback: impl Fn(&ListEvent<T>) + Send + Sync + 'static,
	) -> Subscription<T> {
		let id = self.next_id.fetch_add(1, Ordering::Relaxed);

		self.subscribers.write().insert(id, Arc::new(callback));

		Subscription { id, subscribers: Arc::downgrade(&self.subscribers) }
	}

	/// Publishes an event to every live subscriber.
	pub fn publish(&self, event: ListEvent<T>) {
		// Snapshot outside the callback loop so a subscriber may subscribe/unsubscribe
		// without deadlocking the feed.
		let snapshot: Vec<Subscriber<T>> = self.subscribers.read().values().cloned().collect();

		for callback in snapshot {
			callback(&event);
		}
	}

	/// Returns the number of live subscriptions.
	pub fn subscriber_count(&self) -> usize {
		self.subscribers.read().len()
	}
}
impl<T> ChangeFeed<T>
where
	T: 'static + Clone + Entity + Send + Sync,
{
	/// Attaches a loader so every future event reconciles its accumulated list.
	///
	/// The feed holds the loader weakly: once the owning screen drops its `Arc`, events
	/// simply stop reaching it. Dropping the returned guard detaches eagerly.
	pub fn attach(&self, loader: &Arc<PagedLoader<T>>) -> Subscription<T> {
		let weak = Arc::downgrade(loader);

		self.subscribe(move |event| {
			if let Some(loader) = weak.upgrade() {
				loader.apply(event);
			}
		})
	}
}
impl<T> Clone for ChangeFeed<T>
where
	T: Entity,
{
	fn clone(&self) -> Self {
		Self { subscribers: self.subscribers.clone(), next_id: self.next_id.clone() }
	}
}
impl<T> Default for ChangeFeed<T>
where
	T: Entity,
{
	fn default() -> Self {
		Self::new()
	}
}
impl<T> Debug for ChangeFeed<T>
where
	T: Entity,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ChangeFeed").field("subscribers", &self.subscriber_count()).finish()
	}
}

/// RAII guard keeping a [`ChangeFeed`] subscription alive.
pub struct Subscription<T>
where
	T: Entity,
{
	id: u64,
	subscribers: Weak<RwLock<HashMap<u64, Subscriber<T>>>>,
}
impl<T> Drop for Subscription<T>
where
	T: Entity,
{
	fn drop(&mut self) {
		if let Some(subscribers) = self.subscribers.upgrade() {
			subscribers.write().remove(&self.id);
		}
	}
}
impl<T> Debug for Subscription<T>
where
	T: Entity,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Subscription").field("id", &self.id).finish()
	}
}
