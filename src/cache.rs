//! Process-wide caches with immutable entries.

use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::hash::Hash;
use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;

/// Concurrent key-value store whose entries never change once written.
///
/// Lookups take a read lock only. When two threads race to fill the same
/// key, the first insert wins and the loser receives the stored value, so
/// every reader of a key observes the same `Arc`.
#[derive(Debug)]
pub struct SharedCache<K, V> {
    entries: RwLock<FxHashMap<K, Arc<V>>>,
}

impl<K, V> Default for SharedCache<K, V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(FxHashMap::default()),
        }
    }
}

impl<K: Eq + Hash, V> SharedCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let entries = self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.get(key).cloned()
    }

    /// Stores `value` unless `key` is already present; returns the stored entry.
    pub fn insert(&self, key: K, value: V) -> Arc<V> {
        self.try_insert(key, value).unwrap_or_else(|existing| existing)
    }

    /// Stores `value` if `key` is absent.
    ///
    /// Returns `Ok` with the new entry, or `Err` with the entry another
    /// writer stored first; `value` is dropped in that case.
    pub fn try_insert(&self, key: K, value: V) -> Result<Arc<V>, Arc<V>> {
        let mut entries = self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        match entries.entry(key) {
            Entry::Occupied(existing) => Err(Arc::clone(existing.get())),
            Entry::Vacant(slot) => Ok(Arc::clone(slot.insert(Arc::new(value)))),
        }
    }

    /// Drops the entry for `key`, if any.
    pub fn remove<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let mut entries = self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_first_insert_wins() {
        let cache: SharedCache<&str, u32> = SharedCache::new();
        let first = cache.insert("k", 1);
        let second = cache.insert("k", 2);
        assert_eq!(*first, 1);
        assert_eq!(*second, 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_try_insert_reports_winner() {
        let cache: SharedCache<String, u32> = SharedCache::new();
        let won = cache.try_insert("key".to_string(), 9).expect("first writer");
        let lost = cache.try_insert("key".to_string(), 10).unwrap_err();
        assert!(Arc::ptr_eq(&won, &lost));
        assert_eq!(*lost, 9);
        assert_eq!(cache.get("key").as_deref(), Some(&9));
    }

    #[test]
    fn test_concurrent_writers_share_one_value() {
        let cache = Arc::new(SharedCache::<u64, usize>::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.try_insert(1, i))
            })
            .collect();

        let outcomes: Vec<Result<Arc<usize>, Arc<usize>>> = handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked"))
            .collect();

        assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), 1);
        let stored = cache.get(&1).expect("entry present");
        assert!(outcomes
            .iter()
            .all(|o| Arc::ptr_eq(o.as_ref().unwrap_or_else(|v| v), &stored)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_remove() {
        let cache: SharedCache<u8, u8> = SharedCache::new();
        cache.insert(1, 1);
        assert!(!cache.is_empty());
        assert_eq!(cache.remove(&1).as_deref(), Some(&1));
        assert!(cache.is_empty());
        assert!(cache.remove(&1).is_none());
    }
}
