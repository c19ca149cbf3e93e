use std::cmp::Ordering;
use std::collections::VecDeque;

/// A queue kept sorted by a caller-supplied ordering.
///
/// Elements that compare equal keep their insertion order, so an ordering
/// that reports every pair as equal degenerates to a plain FIFO.
#[derive(Debug, Clone)]
pub struct OrderedQueue<T> {
    items: VecDeque<T>,
}

impl<T> Default for OrderedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedQueue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Insert `item` before the first element it strictly precedes under
    /// `cmp`, or at the tail. Returns the index it landed at.
    pub fn offer_by<F>(&mut self, item: T, mut cmp: F) -> usize
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let pos = self
            .items
            .iter()
            .position(|queued| cmp(&item, queued) == Ordering::Less)
            .unwrap_or(self.items.len());
        self.items.insert(pos, item);
        pos
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn poll(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn at(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        self.items.remove(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: PartialEq> OrderedQueue<T> {
    /// Remove every entry equal to `item` by identity, ignoring the ordering.
    pub fn remove(&mut self, item: &T) -> usize {
        let before = self.items.len();
        self.items.retain(|queued| queued != item);
        before - self.items.len()
    }
}
