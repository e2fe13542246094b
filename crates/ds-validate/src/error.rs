use ds_io::IoError;

/// Errors that stop validation from producing a verdict.
///
/// Schema violations are not errors; they come back as
/// [`ValidationFault`](crate::ValidationFault) values.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    /// Reading the body or buffering it failed.
    #[error(transparent)]
    Io(#[from] IoError),

    /// The schema document cannot be compiled.
    #[error("invalid schema at '{path}': {reason}")]
    Schema { path: String, reason: String },

    /// The structure carries no schema to validate against.
    #[error("structure has no schema")]
    MissingSchema,

    /// Buffering produced no bytes to validate.
    #[error("no data was read from the body")]
    EmptyBuffer,
}

pub type ValidateResult<T> = Result<T, ValidateError>;
