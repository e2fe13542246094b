use ds_types::DataFormat;

/// Errors from entry streams.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// No reader or writer exists for the format.
    #[error("unsupported data format: '{0}'")]
    UnsupportedFormat(DataFormat),

    /// I/O failure from the underlying byte stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes of an entry are malformed for the declared format.
    #[error("decoding entry {index}: {reason}")]
    Decode { index: usize, reason: String },

    /// An entry cannot be written in the declared format.
    #[error("encoding entry {index}: {reason}")]
    Encode { index: usize, reason: String },

    /// A single record is larger than the configured ceiling.
    #[error("entry {index} exceeds the maximum record size of {limit} bytes")]
    RecordTooLarge { index: usize, limit: usize },

    /// The stream was used after it was closed.
    #[error("stream is closed")]
    Closed,

    /// Reading from the source stream failed at a record.
    #[error("reading entry {index}: {source}")]
    Read { index: usize, source: Box<IoError> },

    /// Writing to the sink stream failed at a record.
    #[error("writing entry {index}: {source}")]
    Write { index: usize, source: Box<IoError> },
}

/// Result alias for entry stream operations.
pub type IoResult<T> = Result<T, IoError>;
