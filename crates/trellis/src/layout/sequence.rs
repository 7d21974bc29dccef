//! Active window over a container's children.
//!
//! A [`FlowSequence`] owns a container's full child collection and splits it
//! in place into two regions:
//!
//! ```text
//!   [ a0 a1 a2 | i0 i1 ]
//!     active     inactive
//!     (ordered)  (unordered)
//! ```
//!
//! The active prefix holds the elements taking part in flow layout, kept in
//! ascending order of a caller-provided key (the element's position in its
//! parent). Moving an element across the boundary rotates it into place
//! inside the existing buffer, so activation never allocates.

use std::{iter::Rev, slice};

/// An ordered collection partitioned into an active prefix and an inactive suffix.
#[derive(Debug, Clone)]
pub struct FlowSequence<T> {
    items: Vec<T>,
    active: usize,
}

impl<T> Default for FlowSequence<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            active: 0,
        }
    }
}

impl<T> FlowSequence<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements in the active prefix.
    pub fn len_active(&self) -> usize {
        self.active
    }

    /// Number of elements in the whole collection.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The active prefix, in display order.
    pub fn active(&self) -> &[T] {
        &self.items[..self.active]
    }

    /// The inactive suffix. Its order carries no meaning.
    pub fn inactive(&self) -> &[T] {
        &self.items[self.active..]
    }

    /// Every element, active prefix first.
    pub fn all(&self) -> &[T] {
        &self.items
    }

    /// Iterates the active prefix in display order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.active().iter()
    }

    /// Iterates the active prefix from its last element backwards.
    pub fn iter_rev(&self) -> Rev<slice::Iter<'_, T>> {
        self.active().iter().rev()
    }

    /// Whether the element stored at `position` is in the active prefix.
    pub fn is_active(&self, position: usize) -> bool {
        position < self.active
    }

    /// Appends an inactive element.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Inserts an element directly into the active prefix at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is past the end of the active prefix.
    pub fn insert_at(&mut self, position: usize, item: T) {
        assert!(
            position <= self.active,
            "insert position {position} outside active window of {}",
            self.active
        );
        self.items.insert(position, item);
        self.active += 1;
    }

    /// Removes and returns the element stored at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    pub fn remove_at(&mut self, position: usize) -> T {
        let item = self.items.remove(position);
        if position < self.active {
            self.active -= 1;
        }
        item
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.active = 0;
    }

    /// Moves the inactive element at `position` into the active prefix,
    /// keeping the prefix ordered by `key`. Returns the element's new position.
    ///
    /// # Panics
    ///
    /// Panics if `position` does not refer to an inactive element.
    pub fn activate<K, F>(&mut self, position: usize, key: F) -> usize
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        assert!(
            position >= self.active && position < self.items.len(),
            "position {position} is not in the inactive range {}..{}",
            self.active,
            self.items.len()
        );
        self.items.swap(self.active, position);

        let item_key = key(&self.items[self.active]);
        let target = self.items[..self.active].partition_point(|item| key(item) < item_key);
        self.items[target..=self.active].rotate_right(1);
        self.active += 1;
        target
    }

    /// Moves the active element at `position` out of the active prefix,
    /// preserving the order of the remaining active elements.
    ///
    /// # Panics
    ///
    /// Panics if `position` does not refer to an active element.
    pub fn deactivate(&mut self, position: usize) {
        assert!(
            position < self.active,
            "position {position} is not in the active range 0..{}",
            self.active
        );
        self.items[position..self.active].rotate_left(1);
        self.active -= 1;
    }

    /// Rebuilds the partition from scratch: elements matching `predicate`
    /// become the active prefix, ordered by `key`.
    pub fn repartition<K, P, F>(&mut self, predicate: P, key: F)
    where
        K: Ord,
        P: Fn(&T) -> bool,
        F: Fn(&T) -> K,
    {
        self.items.sort_by_key(|item| (!predicate(item), key(item)));
        self.active = self.items.iter().take_while(|item| predicate(item)).count();
    }

    /// Restores the ordering of the active prefix after keys changed.
    pub fn sort_active<K, F>(&mut self, key: F)
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        self.items[..self.active].sort_by_key(key);
    }
}

impl<T: PartialEq> FlowSequence<T> {
    /// Finds where `item` is stored.
    pub fn position(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|candidate| candidate == item)
    }
}
