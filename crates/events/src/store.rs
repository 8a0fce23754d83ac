//! Bounded in-memory event store.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::{Error, LogEvent, Result};

/// Default number of retained events.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Fixed-capacity FIFO of retained events.
///
/// Appending to a full store evicts the oldest event and hands it back to the
/// caller. The capacity never changes after construction.
#[derive(Debug)]
pub struct RingStore {
    events: VecDeque<Arc<LogEvent>>,
    capacity: usize,
}

impl RingStore {
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Append an event, returning the evicted one if the store overflowed.
    pub fn add(&mut self, event: Arc<LogEvent>) -> Option<Arc<LogEvent>> {
        self.events.push_back(event);
        if self.events.len() > self.capacity {
            self.events.pop_front()
        } else {
            None
        }
    }

    pub fn count(&self) -> usize {
        self.events.len()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The event admitted longest ago.
    pub fn front(&self) -> Option<&Arc<LogEvent>> {
        self.events.front()
    }

    /// The most recently admitted event.
    pub fn back(&self) -> Option<&Arc<LogEvent>> {
        self.events.back()
    }

    /// Iterate retained events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<LogEvent>> {
        self.events.iter()
    }

    pub fn snapshot(&self) -> Vec<Arc<LogEvent>> {
        self.events.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventId, Level};

    fn event(id: u64) -> Arc<LogEvent> {
        let mut event = LogEvent::new(Level::Info, "Test", format!("event {id}"));
        event.id = EventId(id);
        Arc::new(event)
    }

    fn ids(store: &RingStore) -> Vec<u64> {
        store.iter().map(|e| e.id.0).collect()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            RingStore::with_capacity(0),
            Err(Error::ZeroCapacity)
        ));
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let mut store = RingStore::with_capacity(3).unwrap();
        assert!(store.add(event(1)).is_none());
        assert!(store.add(event(2)).is_none());
        assert!(store.add(event(3)).is_none());

        let evicted = store.add(event(4)).unwrap();
        assert_eq!(evicted.id, EventId(1));
        assert_eq!(ids(&store), vec![2, 3, 4]);
        assert_eq!(store.count(), 3);
    }

    #[test]
    fn test_count_never_exceeds_capacity() {
        let mut store = RingStore::with_capacity(5).unwrap();
        for id in 1..=100 {
            store.add(event(id));
            assert!(store.count() <= store.capacity());
        }
        assert_eq!(ids(&store), vec![96, 97, 98, 99, 100]);
        assert_eq!(store.front().unwrap().id, EventId(96));
        assert_eq!(store.back().unwrap().id, EventId(100));
    }

    #[test]
    fn test_capacity_one_replaces_every_time() {
        let mut store = RingStore::with_capacity(1).unwrap();
        store.add(event(1));
        let evicted = store.add(event(2)).unwrap();
        assert_eq!(evicted.id, EventId(1));
        assert_eq!(ids(&store), vec![2]);
    }
}
