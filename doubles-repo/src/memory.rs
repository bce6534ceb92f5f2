//! Insertion-ordered in-memory keyed store.

use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Record plus the position it was first inserted at.
struct Slot<V> {
    position: u64,
    record: V,
}

/// Concurrent keyed collection that enumerates in insertion order.
///
/// Overwriting a key keeps its original position; deleting and re-inserting
/// moves it to the end. Each call is atomic on its own, nothing spans calls.
pub struct MemoryStore<K, V> {
    entries: DashMap<K, Slot<V>>,
    positions: AtomicU64,
}

impl<K, V> Default for MemoryStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MemoryStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            positions: AtomicU64::new(0),
        }
    }

    fn next_position(&self) -> u64 {
        self.positions.fetch_add(1, Ordering::Relaxed)
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).map(|slot| slot.record.clone())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts or overwrites.
    pub fn put(&self, key: K, record: V) {
        match self.entries.entry(key) {
            Entry::Occupied(mut slot) => slot.get_mut().record = record,
            Entry::Vacant(slot) => {
                slot.insert(Slot {
                    position: self.next_position(),
                    record,
                });
            }
        }
    }

    /// Inserts only if `key` is free. Returns `false` and leaves the stored
    /// record untouched otherwise.
    pub fn insert_new(&self, key: K, record: V) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Slot {
                    position: self.next_position(),
                    record,
                });
                true
            }
        }
    }

    pub fn delete(&self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|(_, slot)| slot.record)
    }

    /// Snapshot of every record, oldest insertion first.
    pub fn list(&self) -> Vec<V> {
        let mut slots: Vec<(u64, V)> = self
            .entries
            .iter()
            .map(|entry| (entry.position, entry.record.clone()))
            .collect();
        slots.sort_by_key(|(position, _)| *position);
        slots.into_iter().map(|(_, record)| record).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
