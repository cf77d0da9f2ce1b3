//! Snapshot-based collection store
//!
//! The store replaces mutable module-level caches as the owner of a
//! collection. Readers take an O(1) structurally-shared snapshot and
//! query that; writers edit or swap the canonical version under the
//! lock. A query therefore never observes a mutation mid-flight, and the
//! pure pipeline stays free of locking entirely.

use std::fmt;

use im::Vector;
use parking_lot::RwLock;

/// Shared owner of one collection.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
pub struct CollectionStore<T> {
    items: RwLock<Vector<T>>,
}

impl<T: Clone> CollectionStore<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vector::new()),
        }
    }

    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: RwLock::new(items.into_iter().collect()),
        }
    }

    /// Immutable snapshot of the current collection. O(1); later writes
    /// are not visible through it.
    pub fn snapshot(&self) -> Vector<T> {
        self.items.read().clone()
    }

    /// Swap in a whole new collection.
    pub fn replace(&self, items: impl IntoIterator<Item = T>) {
        *self.items.write() = items.into_iter().collect();
    }

    /// Append one item.
    pub fn push(&self, item: T) {
        self.items.write().push_back(item);
    }

    /// Edit the canonical collection in place under the write lock.
    pub fn modify(&self, edit: impl FnOnce(&mut Vector<T>)) {
        edit(&mut self.items.write());
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl<T: Clone> Default for CollectionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual `Debug` because `im::Vector` only implements it for `T: Clone + Debug`.
impl<T: Clone> fmt::Debug for CollectionStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionStore")
            .field("len", &self.len())
            .finish()
    }
}
