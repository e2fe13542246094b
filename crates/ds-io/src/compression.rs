//! Byte-level compression beneath the format layer.

use std::io::{self, BufRead, BufReader, Read, Write};

use ds_types::Compression;
use zstd::stream::write::Encoder;

use crate::error::IoResult;

/// Wrap `r` so reads yield decompressed bytes.
pub fn decompress_reader<'a, R: Read + 'a>(
    compression: Compression,
    r: R,
) -> IoResult<Box<dyn BufRead + 'a>> {
    Ok(match compression {
        Compression::None => Box::new(BufReader::new(r)),
        Compression::Zstd => Box::new(BufReader::new(zstd::stream::read::Decoder::new(r)?)),
    })
}

enum State<W: Write> {
    Plain(W),
    Zstd(Encoder<'static, W>),
    Finished(W),
    /// Finishing failed; the sink is gone.
    Failed,
}

/// A writer that compresses everything written to it.
///
/// [`CompressWriter::finish`] must be called to complete the compressed
/// frame. It is safe to call more than once.
pub struct CompressWriter<W: Write> {
    state: State<W>,
}

impl<W: Write> CompressWriter<W> {
    pub fn new(compression: Compression, w: W, level: i32) -> IoResult<Self> {
        let state = match compression {
            Compression::None => State::Plain(w),
            Compression::Zstd => State::Zstd(Encoder::new(w, level)?),
        };
        Ok(Self { state })
    }

    /// Flush and complete the compressed frame.
    pub fn finish(&mut self) -> io::Result<()> {
        match std::mem::replace(&mut self.state, State::Failed) {
            State::Plain(mut w) => {
                let flushed = w.flush();
                self.state = State::Finished(w);
                flushed
            }
            State::Zstd(encoder) => {
                self.state = State::Finished(encoder.finish()?);
                Ok(())
            }
            done @ (State::Finished(_) | State::Failed) => {
                self.state = done;
                Ok(())
            }
        }
    }

    /// The underlying sink, unless finishing it failed.
    pub fn get_ref(&self) -> Option<&W> {
        match &self.state {
            State::Plain(w) | State::Finished(w) => Some(w),
            State::Zstd(encoder) => Some(encoder.get_ref()),
            State::Failed => None,
        }
    }

    /// Finish and return the underlying sink.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.finish()?;
        match self.state {
            State::Finished(w) => Ok(w),
            _ => Err(io::Error::new(io::ErrorKind::Other, "compressed stream was lost")),
        }
    }

    fn finished() -> io::Error {
        io::Error::new(io::ErrorKind::BrokenPipe, "write after finish")
    }
}

impl<W: Write> Write for CompressWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.state {
            State::Plain(w) => w.write(buf),
            State::Zstd(encoder) => encoder.write(buf),
            State::Finished(_) | State::Failed => Err(Self::finished()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.state {
            State::Plain(w) => w.flush(),
            State::Zstd(encoder) => encoder.flush(),
            State::Finished(_) | State::Failed => Ok(()),
        }
    }
}
