//! Growable collections of collidables with deferred removal
//!
//! Hits are marked by index while scanning and removed in one batch
//! afterwards, so indices stay valid against the pre-removal contents for
//! the whole scan.

use super::geometry::Segment;
use super::shape::ShapeDescriptor;

#[derive(Debug, Clone)]
pub struct Registry<T> {
    items: Vec<T>,
    /// Indices scheduled for removal (into `items` as it was during the scan)
    pending: Vec<usize>,
}

/// Falling blocks
pub type BlockRegistry = Registry<ShapeDescriptor>;
/// Player-placed trampolines
pub type TrampolineRegistry = Registry<Segment>;

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Schedule `index` for removal at the next [`Registry::remove_marked`]
    pub fn mark(&mut self, index: usize) {
        if index < self.items.len() && !self.pending.contains(&index) {
            self.pending.push(index);
        }
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.pending.contains(&index)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Remove every marked item in one pass, preserving the order of the rest.
    /// Returns how many items were removed.
    pub fn remove_marked(&mut self) -> usize {
        if self.pending.is_empty() {
            return 0;
        }
        self.pending.sort_unstable();

        let before = self.items.len();
        let pending = &self.pending;
        let mut index = 0;
        let mut cursor = 0;
        self.items.retain(|_| {
            let removed = cursor < pending.len() && pending[cursor] == index;
            if removed {
                cursor += 1;
            }
            index += 1;
            !removed
        });
        self.pending.clear();
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.pending.clear();
    }
}

impl<'a, T> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
