//! Bounded FIFO memory of visited tours.

use std::collections::{HashMap, VecDeque};

/// Fixed-capacity FIFO of tour snapshots with O(1) membership tests.
///
/// The queue keeps insertion order for eviction; a multiplicity map keeps
/// membership correct when the same tour is pushed more than once.
/// A capacity of zero makes the list permanently empty.
#[derive(Debug, Clone, Default)]
pub struct TabuList {
    capacity: usize,
    queue: VecDeque<Vec<usize>>,
    counts: HashMap<Vec<usize>, usize>,
}

impl TabuList {
    /// Creates an empty list holding at most `capacity` tours.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queue: VecDeque::with_capacity(capacity),
            counts: HashMap::with_capacity(capacity),
        }
    }

    /// Returns `true` if `tour` is currently tabu.
    pub fn contains(&self, tour: &[usize]) -> bool {
        self.counts.contains_key(tour)
    }

    /// Records `tour`, evicting the oldest entry when full.
    pub fn push(&mut self, tour: Vec<usize>) {
        if self.capacity == 0 {
            return;
        }
        if self.queue.len() >= self.capacity {
            if let Some(old) = self.queue.pop_front() {
                self.forget(&old);
            }
        }
        *self.counts.entry(tour.clone()).or_insert(0) += 1;
        self.queue.push_back(tour);
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.counts.clear();
    }

    /// Number of stored entries (duplicates included).
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if nothing is tabu.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Maximum number of stored entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn forget(&mut self, tour: &[usize]) {
        if let Some(count) = self.counts.get_mut(tour) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(tour);
            }
        }
    }
}
