//! Bounded history of classified states.
//!
//! History is a side channel for trend display. The classifier never reads
//! it. Storage sits behind [`HistoryStore`] so callers can swap the backend;
//! [`InMemoryHistory`] is the reference implementation and is lost on
//! restart.
//!
//! # Thread Safety
//! Stores are shared as `Arc<dyn HistoryStore>`. `append` performs
//! append-and-evict under one lock acquisition; `recent` returns an owned
//! snapshot so readers never hold the lock while they work.

use std::collections::VecDeque;
use std::fmt::Debug;

use parking_lot::Mutex;

use crate::domain::ConsciousnessState;

pub const DEFAULT_HISTORY_CAPACITY: usize = 150;

/// Append-only store of past states, oldest evicted first.
pub trait HistoryStore: Send + Sync + Debug {
    /// Record a state, evicting the oldest entry when full.
    fn append(&self, state: ConsciousnessState);

    /// Up to `n` most recent states, oldest first.
    fn recent(&self, n: usize) -> Vec<ConsciousnessState>;

    fn len(&self) -> usize;

    fn capacity(&self) -> usize;

    fn clear(&self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every stored state, oldest first.
    fn snapshot(&self) -> Vec<ConsciousnessState> {
        self.recent(self.capacity())
    }
}

/// FIFO ring of states guarded by a single mutex.
#[derive(Debug)]
pub struct InMemoryHistory {
    entries: Mutex<VecDeque<ConsciousnessState>>,
    capacity: usize,
}

impl InMemoryHistory {
    /// A zero capacity is bumped to 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryStore for InMemoryHistory {
    fn append(&self, state: ConsciousnessState) {
        let mut entries = self.entries.lock();
        while entries.len() >= self.capacity {
            if let Some(evicted) = entries.pop_front() {
                log::trace!(
                    "history full ({}), evicting state from ts={}",
                    self.capacity,
                    evicted.timestamp
                );
            }
        }
        entries.push_back(state);
    }

    fn recent(&self, n: usize) -> Vec<ConsciousnessState> {
        let entries = self.entries.lock();
        let skip = entries.len().saturating_sub(n);
        entries.iter().skip(skip).cloned().collect()
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&self) {
        self.entries.lock().clear();
    }
}
