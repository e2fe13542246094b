//! Helpers that drain readers.

use tracing::debug;

use crate::entry::Entry;
use crate::error::{IoError, IoResult};
use crate::stream::{EntryReader, EntryWriter};

/// Stream every entry of `reader` into `writer`, returning the number of
/// entries copied.
///
/// Neither stream is closed. Read and write faults both carry the position
/// of the failing record within this copy, counted from zero, which differs
/// from [`Entry::index`] when the reader starts mid-stream.
pub fn copy<R, W>(reader: &mut R, writer: &mut W) -> IoResult<usize>
where
    R: EntryReader + ?Sized,
    W: EntryWriter + ?Sized,
{
    let mut count = 0;
    loop {
        let entry = match reader.read_entry() {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                return Err(IoError::Read {
                    index: count,
                    source: Box::new(e),
                })
            }
        };
        writer.write_entry(&entry).map_err(|e| IoError::Write {
            index: count,
            source: Box::new(e),
        })?;
        count += 1;
    }
    debug!(entries = count, "copied entries");
    Ok(count)
}

/// Call `f` with every entry of `reader`, stopping at the first error.
pub fn each_entry<R, F>(reader: &mut R, mut f: F) -> IoResult<()>
where
    R: EntryReader + ?Sized,
    F: FnMut(Entry) -> IoResult<()>,
{
    while let Some(entry) = reader.read_entry()? {
        f(entry)?;
    }
    Ok(())
}

/// Collect the remaining entries of `reader`.
pub fn read_all<R: EntryReader + ?Sized>(reader: &mut R) -> IoResult<Vec<Entry>> {
    let mut entries = Vec::new();
    each_entry(reader, |entry| {
        entries.push(entry);
        Ok(())
    })?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{JsonReader, JsonWriter};
    use crate::ndjson::NdjsonReader;
    use crate::paged::PagedReader;
    use ds_model::{DataFormat, Structure};
    use serde_json::json;

    fn st(format: DataFormat) -> Structure {
        Structure {
            format,
            schema: Some(json!({"type": "array"})),
            ..Default::default()
        }
    }

    // ---- copy ----

    #[test]
    fn copy_counts_entries() {
        let mut r = JsonReader::new(&st(DataFormat::Json), &b"[1,2,3,4]"[..]).unwrap();
        let mut w = JsonWriter::new(&st(DataFormat::Json), Vec::new()).unwrap();
        assert_eq!(copy(&mut r, &mut w).unwrap(), 4);
        assert_eq!(w.into_inner().unwrap(), b"[1,2,3,4]".to_vec());
    }

    #[test]
    fn read_fault_names_record() {
        let mut r = NdjsonReader::new(&st(DataFormat::Ndjson), &b"1\n2\nnope\n"[..]).unwrap();
        let mut w = JsonWriter::new(&st(DataFormat::Json), Vec::new()).unwrap();
        let err = copy(&mut r, &mut w).unwrap_err();
        assert!(matches!(err, IoError::Read { index: 2, .. }), "{err}");
        assert!(err.to_string().starts_with("reading entry 2: "), "{err}");
    }

    #[test]
    fn write_fault_names_record() {
        let object = Structure {
            format: DataFormat::Json,
            schema: Some(json!({"type": "object"})),
            ..Default::default()
        };
        let mut r = JsonReader::new(&st(DataFormat::Json), &b"[true]"[..]).unwrap();
        let mut w = JsonWriter::new(&object, Vec::new()).unwrap();
        let err = copy(&mut r, &mut w).unwrap_err();
        assert!(matches!(err, IoError::Write { index: 0, .. }), "{err}");
    }

    #[test]
    fn faults_count_from_start_of_copy() {
        let object = Structure {
            format: DataFormat::Json,
            schema: Some(json!({"type": "object"})),
            ..Default::default()
        };
        let inner = JsonReader::new(&st(DataFormat::Json), &b"[0,1,2,3]"[..]).unwrap();
        let mut r = PagedReader::new(inner, 2, None);
        let mut w = JsonWriter::new(&object, Vec::new()).unwrap();
        let err = copy(&mut r, &mut w).unwrap_err();
        assert!(matches!(err, IoError::Write { index: 0, .. }), "{err}");

        let inner = NdjsonReader::new(&st(DataFormat::Ndjson), &b"0\n1\n2\nbad\n"[..]).unwrap();
        let mut r = PagedReader::new(inner, 2, None);
        let mut w = JsonWriter::new(&st(DataFormat::Json), Vec::new()).unwrap();
        let err = copy(&mut r, &mut w).unwrap_err();
        assert!(matches!(err, IoError::Read { index: 1, .. }), "{err}");
    }

    #[test]
    fn copy_works_through_trait_objects() {
        let mut r: Box<dyn EntryReader> =
            Box::new(JsonReader::new(&st(DataFormat::Json), &b"[\"x\"]"[..]).unwrap());
        let mut w: Box<dyn EntryWriter> =
            Box::new(JsonWriter::new(&st(DataFormat::Json), Vec::new()).unwrap());
        assert_eq!(copy(&mut r, &mut w).unwrap(), 1);
        w.close().unwrap();
    }

    // ---- each_entry ----

    #[test]
    fn each_entry_stops_at_callback_error() {
        let mut r = JsonReader::new(&st(DataFormat::Json), &b"[1,2,3]"[..]).unwrap();
        let mut seen = Vec::new();
        let err = each_entry(&mut r, |e| {
            if e.index == 1 {
                return Err(IoError::Closed);
            }
            seen.push(e.value);
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, IoError::Closed));
        assert_eq!(seen, vec![json!(1)]);
    }

    #[test]
    fn read_all_on_empty_body() {
        let mut r = JsonReader::new(&st(DataFormat::Json), &b"[]"[..]).unwrap();
        assert!(read_all(&mut r).unwrap().is_empty());
    }
}
