use ds_types::Kind;

/// Errors from document operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ModelError {
    /// Signable bytes need a commit timestamp.
    #[error("commit is required")]
    CommitRequired,

    /// Signable bytes need a structure checksum.
    #[error("structure is required")]
    StructureRequired,

    /// A document carries the kind tag of another document kind.
    #[error("invalid {field} 'qri' value: {found} (expected {expected})")]
    KindMismatch {
        field: &'static str,
        expected: Kind,
        found: Kind,
    },

    /// The bytes do not decode as the named document.
    #[error("unmarshaling {field}: {reason}")]
    Decode { field: &'static str, reason: String },

    /// A transform resource entry is neither a document nor a reference.
    #[error("resource '{name}': {reason}")]
    Resource { name: String, reason: String },

    /// Encoding a document failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
