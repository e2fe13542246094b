//! Format-independent entry streams over dataset bodies.
//!
//! An [`EntryReader`] yields a body one [`Entry`] at a time, whatever its
//! physical encoding; an [`EntryWriter`] is the mirror image for output.
//! Streams compose by wrapping, each layer owning the layer beneath it:
//!
//! ```text
//! PagedReader -> format reader (JSON, NDJSON) -> decompression -> bytes
//! ```
//!
//! End of stream is `Ok(None)`, never an error. Writers must be closed to
//! flush trailing framing, and `close` may be called again or after a fault.

pub mod buffer;
pub mod compression;
pub mod config;
pub mod copy;
pub mod entry;
pub mod error;
pub mod json;
pub mod ndjson;
pub mod paged;
pub mod stream;

pub use buffer::EntryBuffer;
pub use compression::{decompress_reader, CompressWriter};
pub use config::IoConfig;
pub use copy::{copy, each_entry, read_all};
pub use entry::Entry;
pub use error::{IoError, IoResult};
pub use json::{JsonReader, JsonWriter};
pub use ndjson::{NdjsonReader, NdjsonWriter};
pub use paged::PagedReader;
pub use stream::{
    new_entry_reader, new_entry_reader_with_config, new_entry_writer,
    new_entry_writer_with_config, EntryReader, EntryWriter,
};
