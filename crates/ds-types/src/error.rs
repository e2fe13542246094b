use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("unknown kind tag: {0:?}")]
    UnknownKind(String),

    #[error("invalid data format: `{0}`")]
    InvalidDataFormat(String),

    #[error("invalid compression: `{0}`")]
    InvalidCompression(String),
}
