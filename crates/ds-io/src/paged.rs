use ds_model::Structure;
use tracing::trace;

use crate::entry::Entry;
use crate::error::IoResult;
use crate::stream::EntryReader;

/// Wraps a reader to yield at most `limit` entries after skipping the
/// first `offset`. A `None` limit reads to the end.
pub struct PagedReader<R: EntryReader> {
    reader: R,
    offset: usize,
    limit: Option<usize>,
    skipped: bool,
    yielded: usize,
}

impl<R: EntryReader> PagedReader<R> {
    pub fn new(reader: R, offset: usize, limit: Option<usize>) -> Self {
        Self {
            reader,
            offset,
            limit,
            skipped: false,
            yielded: 0,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Discard the first `offset` entries. Returns `false` if the stream
    /// ended first.
    fn skip(&mut self) -> IoResult<bool> {
        self.skipped = true;
        for n in 0..self.offset {
            if self.reader.read_entry()?.is_none() {
                trace!(skipped = n, offset = self.offset, "stream ended while skipping");
                return Ok(false);
            }
        }
        trace!(skipped = self.offset, "skipped entries");
        Ok(true)
    }
}

impl<R: EntryReader> EntryReader for PagedReader<R> {
    fn structure(&self) -> &Structure {
        self.reader.structure()
    }

    fn read_entry(&mut self) -> IoResult<Option<Entry>> {
        if self.limit.is_some_and(|limit| self.yielded >= limit) {
            return Ok(None);
        }
        if !self.skipped && !self.skip()? {
            self.limit = Some(0);
            return Ok(None);
        }
        let entry = self.reader.read_entry()?;
        if entry.is_some() {
            self.yielded += 1;
        }
        Ok(entry)
    }

    fn close(&mut self) -> IoResult<()> {
        self.reader.close()
    }
}
