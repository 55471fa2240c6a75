//! View-Model Cache
//!
//! Holds the last successfully fetched collection per entity kind for
//! the lifetime of one view. Collections are only ever replaced whole;
//! filtering derives a subsequence and never touches the stored items.

mod filter;

pub use filter::{ListFilter, Searchable};

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::aggregate::{BillView, ReservationView, RoomView};
use crate::models::Guest;

/// The most recent full fetch of one entity kind
#[derive(Debug)]
pub struct Collection<T> {
    items: Arc<Vec<T>>,
    fetched_at: Option<DateTime<Utc>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            fetched_at: None,
        }
    }
}

impl<T> Collection<T> {
    /// Swap in a freshly fetched collection
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = Arc::new(items);
        self.fetched_at = Some(Utc::now());
    }

    /// Shared handle to the current items
    ///
    /// A handle taken before a [`replace`](Self::replace) keeps seeing the
    /// old collection.
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        Arc::clone(&self.items)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `None` until the first successful fetch
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn is_loaded(&self) -> bool {
        self.fetched_at.is_some()
    }

    /// Items matching the filter, in fetch order
    pub fn apply_filter(&self, filter: &ListFilter<T::Status>) -> Vec<&T>
    where
        T: Searchable,
    {
        self.items.iter().filter(|item| filter.matches(*item)).collect()
    }
}

/// Per-view store of every listing
#[derive(Debug, Default)]
pub struct ViewStore {
    pub bills: Collection<BillView>,
    pub rooms: Collection<RoomView>,
    pub reservations: Collection<ReservationView>,
    pub guests: Collection<Guest>,
}

impl ViewStore {
    pub fn new() -> Self {
        Self::default()
    }
}
