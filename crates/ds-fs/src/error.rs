use ds_model::ModelError;
use ds_store::{ContentKey, StoreError};

/// Errors from saving or loading dataset packages.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// Writing to the store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A document could not be encoded.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Referenced content is missing or unreadable.
    #[error("loading {field} {key}: {source}")]
    Fetch {
        field: &'static str,
        key: ContentKey,
        source: StoreError,
    },

    /// Stored bytes do not decode as the expected document.
    #[error("loading {field} {key}: {source}")]
    Decode {
        field: &'static str,
        key: ContentKey,
        source: ModelError,
    },

    /// A transform resource could not be saved or resolved.
    #[error("resource '{name}': {source}")]
    Resource { name: String, source: Box<FsError> },
}

/// Result alias for persistence operations.
pub type FsResult<T> = Result<T, FsError>;
