use crate::key::ContentKey;

/// Errors from blob store operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// No blob is stored under the key.
    #[error("blob not found: {0}")]
    NotFound(ContentKey),

    /// Stored bytes no longer hash to their key (data corruption).
    #[error("hash mismatch for {key}: computed {computed}")]
    HashMismatch { key: ContentKey, computed: ContentKey },

    /// The key string is not a valid content key.
    #[error("invalid content key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_names_its_key() {
        let key = ContentKey::for_bytes(b"a");
        let other = ContentKey::for_bytes(b"b");
        let errors = [
            StoreError::NotFound(key.clone()),
            StoreError::HashMismatch {
                key: key.clone(),
                computed: other,
            },
            StoreError::InvalidKey {
                key: key.to_string(),
                reason: "bad".into(),
            },
        ];
        for err in &errors {
            match err {
                StoreError::NotFound(_)
                | StoreError::HashMismatch { .. }
                | StoreError::InvalidKey { .. } => {
                    assert!(err.to_string().contains(key.as_str()), "{err}")
                }
            }
        }
    }
}
