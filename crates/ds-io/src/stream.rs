use std::io::{Read, Write};

use ds_model::{DataFormat, Structure};

use crate::config::IoConfig;
use crate::entry::Entry;
use crate::error::{IoError, IoResult};
use crate::json::{JsonReader, JsonWriter};
use crate::ndjson::{NdjsonReader, NdjsonWriter};

/// A forward-only, finite sequence of entries bound to one structure.
///
/// Readers never rewind. `read_entry` returns `Ok(None)` at end of stream.
/// An instance carries private cursor state and must not be shared.
pub trait EntryReader {
    /// The structure this reader decodes.
    fn structure(&self) -> &Structure;

    /// The next entry, or `None` at end of stream.
    fn read_entry(&mut self) -> IoResult<Option<Entry>>;

    /// Release the reader. Idempotent, and safe after a fault.
    fn close(&mut self) -> IoResult<()>;
}

/// The output mirror of [`EntryReader`].
pub trait EntryWriter {
    fn structure(&self) -> &Structure;

    fn write_entry(&mut self, entry: &Entry) -> IoResult<()>;

    /// Write trailing framing and flush. Must be called even if an earlier
    /// step failed; calling it again is a no-op.
    fn close(&mut self) -> IoResult<()>;
}

impl<R: EntryReader + ?Sized> EntryReader for Box<R> {
    fn structure(&self) -> &Structure {
        (**self).structure()
    }

    fn read_entry(&mut self) -> IoResult<Option<Entry>> {
        (**self).read_entry()
    }

    fn close(&mut self) -> IoResult<()> {
        (**self).close()
    }
}

impl<W: EntryWriter + ?Sized> EntryWriter for Box<W> {
    fn structure(&self) -> &Structure {
        (**self).structure()
    }

    fn write_entry(&mut self, entry: &Entry) -> IoResult<()> {
        (**self).write_entry(entry)
    }

    fn close(&mut self) -> IoResult<()> {
        (**self).close()
    }
}

/// A reader for the structure's format and compression.
pub fn new_entry_reader<'a, R: Read + 'a>(
    st: &Structure,
    r: R,
) -> IoResult<Box<dyn EntryReader + 'a>> {
    new_entry_reader_with_config(st, r, &IoConfig::default())
}

pub fn new_entry_reader_with_config<'a, R: Read + 'a>(
    st: &Structure,
    r: R,
    config: &IoConfig,
) -> IoResult<Box<dyn EntryReader + 'a>> {
    Ok(match st.format {
        DataFormat::Json => Box::new(JsonReader::with_config(st, r, config)?),
        DataFormat::Ndjson => Box::new(NdjsonReader::with_config(st, r, config)?),
        other => return Err(IoError::UnsupportedFormat(other)),
    })
}

/// A writer for the structure's format and compression.
pub fn new_entry_writer<'a, W: Write + 'a>(
    st: &Structure,
    w: W,
) -> IoResult<Box<dyn EntryWriter + 'a>> {
    new_entry_writer_with_config(st, w, &IoConfig::default())
}

pub fn new_entry_writer_with_config<'a, W: Write + 'a>(
    st: &Structure,
    w: W,
    config: &IoConfig,
) -> IoResult<Box<dyn EntryWriter + 'a>> {
    Ok(match st.format {
        DataFormat::Json => Box::new(JsonWriter::with_config(st, w, config)?),
        DataFormat::Ndjson => Box::new(NdjsonWriter::with_config(st, w, config)?),
        other => return Err(IoError::UnsupportedFormat(other)),
    })
}
