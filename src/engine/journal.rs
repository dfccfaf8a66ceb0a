//! Bounded undo journal of successful allocations.

use std::collections::VecDeque;

use serde::Serialize;

use crate::domain::request::{Allocation, RequestId};

/// One successful allocation, as remembered for rollback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalEntry {
    pub request_id: RequestId,
    pub vehicle_id: String,
    pub allocation: Allocation,
}

/// LIFO of allocations. When full, pushing discards the oldest entry.
#[derive(Debug, Clone)]
pub struct AllocationJournal {
    entries: VecDeque<JournalEntry>,
    capacity: usize,
}

impl AllocationJournal {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    pub fn push(&mut self, entry: JournalEntry) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity
            && let Some(dropped) = self.entries.pop_front()
        {
            tracing::debug!(
                request_id = %dropped.request_id,
                capacity = self.capacity,
                "Allocation journal full, dropping oldest entry"
            );
        }
        self.entries.push_back(entry);
    }

    pub fn pop(&mut self) -> Option<JournalEntry> {
        self.entries.pop_back()
    }

    pub fn peek(&self) -> Option<&JournalEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::zone::ZoneId;

    fn entry(id: u64) -> JournalEntry {
        JournalEntry {
            request_id: RequestId(id),
            vehicle_id: format!("CAR-{}", id),
            allocation: Allocation {
                zone: ZoneId(1),
                slot: 1,
                cross_zone: false,
            },
        }
    }

    #[test]
    fn test_lifo_order() {
        let mut journal = AllocationJournal::new(10);
        journal.push(entry(1));
        journal.push(entry(2));
        assert_eq!(journal.peek().unwrap().request_id, RequestId(2));
        assert_eq!(journal.pop().unwrap().request_id, RequestId(2));
        assert_eq!(journal.pop().unwrap().request_id, RequestId(1));
        assert!(journal.pop().is_none());
    }

    #[test]
    fn test_oldest_dropped_when_full() {
        let mut journal = AllocationJournal::new(2);
        journal.push(entry(1));
        journal.push(entry(2));
        journal.push(entry(3));
        assert_eq!(journal.len(), 2);
        assert_eq!(journal.pop().unwrap().request_id, RequestId(3));
        assert_eq!(journal.pop().unwrap().request_id, RequestId(2));
        assert!(journal.is_empty());
    }

    #[test]
    fn test_zero_capacity_disables_journal() {
        let mut journal = AllocationJournal::new(0);
        journal.push(entry(1));
        assert!(journal.is_empty());
        assert_eq!(journal.capacity(), 0);
    }
}
