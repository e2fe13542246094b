//! Newline-delimited JSON: one value per line.

use std::io::{BufRead, Read, Write};

use ds_model::Structure;
use tracing::trace;

use crate::compression::{decompress_reader, CompressWriter};
use crate::config::IoConfig;
use crate::entry::Entry;
use crate::error::{IoError, IoResult};
use crate::stream::{EntryReader, EntryWriter};

pub struct NdjsonReader<'a> {
    st: Structure,
    inner: Box<dyn BufRead + 'a>,
    limit: usize,
    index: usize,
    line: Vec<u8>,
    done: bool,
}

impl<'a> NdjsonReader<'a> {
    pub fn new<R: Read + 'a>(st: &Structure, r: R) -> IoResult<Self> {
        Self::with_config(st, r, &IoConfig::default())
    }

    pub fn with_config<R: Read + 'a>(st: &Structure, r: R, config: &IoConfig) -> IoResult<Self> {
        Ok(Self {
            st: st.clone(),
            inner: decompress_reader(st.compression, r)?,
            limit: config.max_record_size,
            index: 0,
            line: Vec::new(),
            done: false,
        })
    }

    /// Read the next line into the line buffer, growing it as needed.
    /// Returns `false` at end of input.
    fn next_line(&mut self) -> IoResult<bool> {
        self.line.clear();
        let read = (&mut self.inner)
            .take(self.limit as u64 + 1)
            .read_until(b'\n', &mut self.line)?;
        if read == 0 {
            return Ok(false);
        }
        if self.line.last() != Some(&b'\n') && self.line.len() > self.limit {
            return Err(IoError::RecordTooLarge {
                index: self.index,
                limit: self.limit,
            });
        }
        Ok(true)
    }
}

impl EntryReader for NdjsonReader<'_> {
    fn structure(&self) -> &Structure {
        &self.st
    }

    fn read_entry(&mut self) -> IoResult<Option<Entry>> {
        while !self.done {
            if !self.next_line()? {
                self.done = true;
                trace!(entries = self.index, "finished reading NDJSON body");
                break;
            }
            if self.line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            let value = serde_json::from_slice(&self.line).map_err(|e| IoError::Decode {
                index: self.index,
                reason: e.to_string(),
            })?;
            let entry = Entry::indexed(self.index, value);
            self.index += 1;
            return Ok(Some(entry));
        }
        Ok(None)
    }

    fn close(&mut self) -> IoResult<()> {
        self.done = true;
        Ok(())
    }
}

pub struct NdjsonWriter<W: Write> {
    st: Structure,
    out: CompressWriter<W>,
    count: usize,
    closed: bool,
}

impl<W: Write> NdjsonWriter<W> {
    pub fn new(st: &Structure, w: W) -> IoResult<Self> {
        Self::with_config(st, w, &IoConfig::default())
    }

    pub fn with_config(st: &Structure, w: W, config: &IoConfig) -> IoResult<Self> {
        Ok(Self {
            st: st.clone(),
            out: CompressWriter::new(st.compression, w, config.zstd_level)?,
            count: 0,
            closed: false,
        })
    }

    /// The underlying sink. Compressed output is only complete after close.
    pub fn get_ref(&self) -> Option<&W> {
        self.out.get_ref()
    }

    /// Close and return the underlying sink.
    pub fn into_inner(mut self) -> IoResult<W> {
        self.close()?;
        Ok(self.out.into_inner()?)
    }
}

impl<W: Write> EntryWriter for NdjsonWriter<W> {
    fn structure(&self) -> &Structure {
        &self.st
    }

    fn write_entry(&mut self, entry: &Entry) -> IoResult<()> {
        if self.closed {
            return Err(IoError::Closed);
        }
        serde_json::to_writer(&mut self.out, &entry.value).map_err(|e| IoError::Encode {
            index: entry.index,
            reason: e.to_string(),
        })?;
        self.out.write_all(b"\n")?;
        self.count += 1;
        Ok(())
    }

    fn close(&mut self) -> IoResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.out.finish()?;
        trace!(entries = self.count, "closed NDJSON writer");
        Ok(())
    }
}
