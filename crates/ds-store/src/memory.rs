use std::collections::HashMap;
use std::sync::RwLock;

use tracing::trace;

use crate::error::{StoreError, StoreResult};
use crate::key::ContentKey;
use crate::traits::Store;

#[derive(Clone)]
struct Blob {
    name: String,
    data: Vec<u8>,
}

/// In-memory, HashMap-based blob store.
///
/// Intended for tests and embedding. Blobs are held behind a `RwLock` and
/// cloned on read.
pub struct MemStore {
    blobs: RwLock<HashMap<ContentKey, Blob>>,
}

impl MemStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }

    /// Sorted list of every stored key.
    pub fn keys(&self) -> Vec<ContentKey> {
        let map = self.blobs.read().expect("lock poisoned");
        let mut keys: Vec<ContentKey> = map.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// The name the blob under `key` was first stored with.
    pub fn name_of(&self, key: &ContentKey) -> Option<String> {
        let map = self.blobs.read().expect("lock poisoned");
        map.get(key).map(|blob| blob.name.clone())
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemStore {
    fn put(&self, name: &str, data: &[u8]) -> StoreResult<ContentKey> {
        let key = ContentKey::for_bytes(data);
        let mut map = self.blobs.write().expect("lock poisoned");
        // First writer wins; identical bytes always map to the same key.
        map.entry(key.clone()).or_insert_with(|| {
            trace!(%key, name, size = data.len(), "stored blob");
            Blob {
                name: name.to_string(),
                data: data.to_vec(),
            }
        });
        Ok(key)
    }

    fn get(&self, key: &ContentKey) -> StoreResult<Vec<u8>> {
        let map = self.blobs.read().expect("lock poisoned");
        let blob = map.get(key).ok_or_else(|| StoreError::NotFound(key.clone()))?;
        if !key.verify(&blob.data) {
            return Err(StoreError::HashMismatch {
                key: key.clone(),
                computed: ContentKey::for_bytes(&blob.data),
            });
        }
        Ok(blob.data.clone())
    }

    fn has(&self, key: &ContentKey) -> StoreResult<bool> {
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.contains_key(key))
    }

    fn delete(&self, key: &ContentKey) -> StoreResult<bool> {
        let mut map = self.blobs.write().expect("lock poisoned");
        Ok(map.remove(key).is_some())
    }
}

impl std::fmt::Debug for MemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemStore")
            .field("blob_count", &self.len())
            .finish()
    }
}
