use ds_model::{DataFormat, Structure};

use crate::entry::Entry;
use crate::error::IoResult;
use crate::json::JsonWriter;
use crate::stream::EntryWriter;

/// Collects entries in memory as a JSON body.
///
/// The buffer always writes plain JSON, keeping the schema of the
/// structure it is built from so object bodies stay objects.
pub struct EntryBuffer {
    writer: JsonWriter<Vec<u8>>,
}

impl EntryBuffer {
    pub fn new(st: &Structure) -> IoResult<Self> {
        let st = Structure {
            format: DataFormat::Json,
            schema: st.schema.clone(),
            ..Default::default()
        };
        Ok(Self {
            writer: JsonWriter::new(&st, Vec::new())?,
        })
    }

    /// The bytes written so far. Complete only after `close`.
    pub fn bytes(&self) -> &[u8] {
        self.writer.get_ref().map(Vec::as_slice).unwrap_or_default()
    }
}

impl EntryWriter for EntryBuffer {
    fn structure(&self) -> &Structure {
        self.writer.structure()
    }

    fn write_entry(&mut self, entry: &Entry) -> IoResult<()> {
        self.writer.write_entry(entry)
    }

    fn close(&mut self) -> IoResult<()> {
        self.writer.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_model::Compression;
    use serde_json::json;

    #[test]
    fn buffers_plain_json() {
        let src = Structure {
            format: DataFormat::Ndjson,
            compression: Compression::Zstd,
            schema: Some(json!({"type": "array"})),
            ..Default::default()
        };
        let mut buf = EntryBuffer::new(&src).unwrap();
        assert_eq!(buf.structure().format, DataFormat::Json);
        assert!(buf.structure().compression.is_none());
        buf.write_entry(&Entry::indexed(0, json!("a"))).unwrap();
        buf.write_entry(&Entry::indexed(1, json!(2))).unwrap();
        buf.close().unwrap();
        assert_eq!(buf.bytes(), br#"["a",2]"#);
    }

    #[test]
    fn object_schema_is_kept() {
        let src = Structure {
            format: DataFormat::Json,
            schema: Some(json!({"type": "object"})),
            ..Default::default()
        };
        let mut buf = EntryBuffer::new(&src).unwrap();
        buf.write_entry(&Entry::keyed(0, "a", json!(1))).unwrap();
        buf.close().unwrap();
        assert_eq!(buf.bytes(), br#"{"a":1}"#);
    }

    #[test]
    fn empty_before_any_write() {
        let buf = EntryBuffer::new(&Structure::default()).unwrap();
        assert!(buf.bytes().is_empty());
    }
}
