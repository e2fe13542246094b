use crate::error::StoreResult;
use crate::key::ContentKey;

/// Content-addressable blob store.
///
/// All implementations must satisfy these invariants:
/// - Keys are derived from blob bytes only. The `name` passed to `put` is
///   metadata and never affects the key.
/// - Blobs are immutable once written; putting the same bytes again is a
///   no-op that returns the same key.
/// - A key returned by `put` is immediately readable through `get`.
/// - Concurrent `get` and `put` are safe.
pub trait Store: Send + Sync {
    /// Store `data` and return its content key.
    fn put(&self, name: &str, data: &[u8]) -> StoreResult<ContentKey>;

    /// Read the blob stored under `key`.
    ///
    /// Returns `Err(StoreError::NotFound)` if nothing is stored there.
    fn get(&self, key: &ContentKey) -> StoreResult<Vec<u8>>;

    /// Check whether a blob is stored under `key`.
    fn has(&self, key: &ContentKey) -> StoreResult<bool>;

    /// Delete a blob. Returns `true` if it existed.
    ///
    /// Deleting a blob other documents reference leaves those references
    /// dangling.
    fn delete(&self, key: &ContentKey) -> StoreResult<bool>;
}
