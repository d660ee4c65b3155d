//! Ordered key-value state store
//!
//! Backs the registry with an in-memory ordered map and optional sled
//! persistence. The memory map is authoritative for reads; mutations are
//! written through to the sled tree when one is attached.

use std::collections::BTreeMap;
use std::ops::Bound;

use parking_lot::RwLock;

use super::composite::prefix_scan_range;

/// A single staged mutation.
enum BatchOp {
    Put(Vec<u8>, Vec<u8>),
    Delete(Vec<u8>),
}

/// Ordered set of staged mutations, applied in one call.
///
/// Workflows stage every write here and apply only after all their
/// preconditions have passed, so a failed invocation leaves no partial
/// state behind.
#[derive(Default)]
pub struct StateBatch {
    ops: Vec<BatchOp>,
}

impl StateBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a put.
    pub fn put(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        self.ops.push(BatchOp::Put(key.into(), value.into()));
    }

    /// Stage a delete.
    pub fn delete(&mut self, key: impl Into<Vec<u8>>) {
        self.ops.push(BatchOp::Delete(key.into()));
    }

    /// Number of staged operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Ordered key-value store with optional sled persistence
pub struct StateStore {
    /// In-memory state, ordered for range scans
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
    /// Sled tree for persistence (optional)
    db: Option<sled::Tree>,
}

impl StateStore {
    /// Create a new in-memory store
    pub fn new_memory() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            db: None,
        }
    }

    /// Create a persistent store backed by a sled tree
    ///
    /// Existing entries are loaded into memory; later mutations are
    /// written through.
    pub fn new_persistent(db: sled::Tree) -> Self {
        let mut entries = BTreeMap::new();
        for item in db.iter().flatten() {
            let (key, value) = item;
            entries.insert(key.to_vec(), value.to_vec());
        }

        Self {
            entries: RwLock::new(entries),
            db: Some(db),
        }
    }

    /// Point lookup
    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.read().get(key).cloned()
    }

    /// Store a value, overwriting any previous one
    pub fn put(&self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        let (key, value) = (key.into(), value.into());
        if let Some(ref db) = self.db {
            let _ = db.insert(&key[..], &value[..]);
        }
        self.entries.write().insert(key, value);
    }

    /// Delete a key. Returns false if the key was absent.
    pub fn delete(&self, key: &[u8]) -> bool {
        if let Some(ref db) = self.db {
            let _ = db.remove(key);
        }
        self.entries.write().remove(key).is_some()
    }

    /// Half-open lexicographic range scan over `[start, end)`
    pub fn range_scan(&self, start: &[u8], end: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
        let entries = self.entries.read();
        entries
            .range::<[u8], _>((Bound::Included(start), Bound::Excluded(end)))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Scan every key beginning with `prefix`, in key order
    pub fn scan_prefix(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
        let (start, end) = prefix_scan_range(prefix);
        self.range_scan(&start, &end)
    }

    /// Apply a staged batch in order
    pub fn apply(&self, batch: StateBatch) {
        let mut entries = self.entries.write();
        for op in batch.ops {
            match op {
                BatchOp::Put(key, value) => {
                    if let Some(ref db) = self.db {
                        let _ = db.insert(&key[..], &value[..]);
                    }
                    entries.insert(key, value);
                }
                BatchOp::Delete(key) => {
                    if let Some(ref db) = self.db {
                        let _ = db.remove(&key[..]);
                    }
                    entries.remove(&key);
                }
            }
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Flush the sled tree to disk
    pub fn flush(&self) {
        if let Some(ref db) = self.db {
            let _ = db.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_delete() {
        let store = StateStore::new_memory();
        assert_eq!(store.get(b"k"), None);

        store.put(b"k".to_vec(), b"v".to_vec());
        assert_eq!(store.get(b"k"), Some(b"v".to_vec()));

        // Overwrite
        store.put(b"k".to_vec(), b"v2".to_vec());
        assert_eq!(store.get(b"k"), Some(b"v2".to_vec()));

        assert!(store.delete(b"k"));
        assert_eq!(store.get(b"k"), None);
        assert!(!store.delete(b"k"));
    }

    #[test]
    fn test_range_scan_is_half_open_and_ordered() {
        let store = StateStore::new_memory();
        store.put(b"a".to_vec(), b"1".to_vec());
        store.put(b"b".to_vec(), b"2".to_vec());
        store.put(b"c".to_vec(), b"3".to_vec());

        let hits = store.range_scan(b"a", b"c");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].0, b"a");
        assert_eq!(hits[1].0, b"b");
    }

    #[test]
    fn test_scan_prefix_spans_wide_ids() {
        let store = StateStore::new_memory();
        for id in ["5", "50", "500", "5000"] {
            store.put(format!("USER_{}", id).into_bytes(), b"x".to_vec());
        }
        store.put(b"VEHICLE_1".to_vec(), b"x".to_vec());

        let hits = store.scan_prefix(b"USER_");
        assert_eq!(hits.len(), 4);
        assert_eq!(hits[0].0, b"USER_5");
        assert_eq!(hits[3].0, b"USER_5000");
    }

    #[test]
    fn test_batch_is_invisible_until_applied() {
        let store = StateStore::new_memory();
        store.put(b"gone".to_vec(), b"x".to_vec());

        let mut batch = StateBatch::new();
        batch.put(b"new".to_vec(), b"y".to_vec());
        batch.delete(b"gone".to_vec());

        assert_eq!(store.get(b"new"), None);
        assert_eq!(store.get(b"gone"), Some(b"x".to_vec()));

        store.apply(batch);
        assert_eq!(store.get(b"new"), Some(b"y".to_vec()));
        assert_eq!(store.get(b"gone"), None);
    }

    #[test]
    fn test_batch_applies_in_order() {
        let store = StateStore::new_memory();
        let mut batch = StateBatch::new();
        batch.put(b"k".to_vec(), b"first".to_vec());
        batch.delete(b"k".to_vec());
        batch.put(b"k".to_vec(), b"last".to_vec());
        store.apply(batch);
        assert_eq!(store.get(b"k"), Some(b"last".to_vec()));
    }

    #[test]
    fn test_persistent_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let db = sled::open(dir.path()).unwrap();

        {
            let tree = db.open_tree("state").unwrap();
            let store = StateStore::new_persistent(tree);
            store.put(b"USER_0".to_vec(), b"{}".to_vec());
            store.put(b"USER_1".to_vec(), b"{}".to_vec());
            store.delete(b"USER_1");
            store.flush();
        }

        let tree = db.open_tree("state").unwrap();
        let reopened = StateStore::new_persistent(tree);
        assert_eq!(reopened.get(b"USER_0"), Some(b"{}".to_vec()));
        assert_eq!(reopened.get(b"USER_1"), None);
        assert_eq!(reopened.len(), 1);
    }
}
