//! Snapshot history for rewind
//!
//! A bounded log of per-tick captures, oldest first. Appending at capacity
//! evicts from the front, so the buffer always holds the most recent
//! window. Lookup is by plain index; the rewind cursor lives in the phase
//! controller, not here.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::HISTORY_CAPACITY;

/// Transient state of one marker at capture time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerSnapshot {
    pub position: Vec2,
    pub angle: f32,
    pub expansion_level: u32,
}

/// All markers' transient state plus the elapsed time at capture,
/// marker order matching creation order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub elapsed: f64,
    pub markers: Vec<MarkerSnapshot>,
}

/// Fixed-capacity snapshot log
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBuffer {
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a snapshot, evicting the oldest entries past capacity
    pub fn append(&mut self, snapshot: Snapshot) {
        self.entries.push_back(snapshot);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Snapshot at a 0-based index, oldest to newest
    pub fn at(&self, index: usize) -> Option<&Snapshot> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the newest entry, if any
    pub fn last_index(&self) -> Option<usize> {
        self.entries.len().checked_sub(1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn snap(elapsed: f64) -> Snapshot {
        Snapshot {
            elapsed,
            markers: Vec::new(),
        }
    }

    #[test]
    fn test_eviction_is_oldest_first() {
        let mut history = HistoryBuffer::new(3);
        for elapsed in [1.0, 2.0, 3.0, 4.0] {
            history.append(snap(elapsed));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.at(0).map(|s| s.elapsed), Some(2.0));
        assert_eq!(history.at(2).map(|s| s.elapsed), Some(4.0));
    }

    #[test]
    fn test_at_out_of_range_is_none() {
        let mut history = HistoryBuffer::new(3);
        assert!(history.at(0).is_none());
        history.append(snap(1.0));
        assert!(history.at(0).is_some());
        assert!(history.at(1).is_none());
    }

    #[test]
    fn test_overflow_by_one_drops_first_entry() {
        let mut history = HistoryBuffer::new(5);
        for i in 0..6 {
            history.append(snap(i as f64));
        }
        assert_eq!(history.len(), 5);
        assert_eq!(history.at(0).map(|s| s.elapsed), Some(1.0));
    }

    #[test]
    fn test_last_index_tracks_len() {
        let mut history = HistoryBuffer::new(3);
        assert_eq!(history.last_index(), None);
        history.append(snap(1.0));
        assert_eq!(history.last_index(), Some(0));
        history.append(snap(2.0));
        history.append(snap(3.0));
        history.append(snap(4.0));
        assert_eq!(history.last_index(), Some(2));
    }

    #[test]
    fn test_clear_empties() {
        let mut history = HistoryBuffer::new(3);
        history.append(snap(1.0));
        history.append(snap(2.0));
        history.clear();
        assert!(history.is_empty());
        assert!(history.at(0).is_none());
        assert_eq!(history.last_index(), None);
    }

    proptest! {
        #[test]
        fn prop_len_never_exceeds_capacity(
            capacity in 1usize..20,
            appends in 0usize..100
        ) {
            let mut history = HistoryBuffer::new(capacity);
            for i in 0..appends {
                history.append(snap(i as f64));
                prop_assert!(history.len() <= capacity);
            }
            // survivors are the newest window in append order
            let expected_first = appends.saturating_sub(capacity);
            for (offset, idx) in (expected_first..appends).enumerate() {
                prop_assert_eq!(history.at(offset).map(|s| s.elapsed), Some(idx as f64));
            }
        }
    }
}
