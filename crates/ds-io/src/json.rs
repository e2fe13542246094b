//! JSON bodies: a single top-level array or object, streamed one element
//! at a time.

use std::io::{self, BufRead, Read, Write};

use ds_model::Structure;
use serde_json::Value;
use tracing::trace;

use crate::compression::{decompress_reader, CompressWriter};
use crate::config::IoConfig;
use crate::entry::Entry;
use crate::error::{IoError, IoResult};
use crate::stream::{EntryReader, EntryWriter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shape {
    Start,
    Array,
    Object,
    Done,
}

/// Reads the elements of a top-level JSON array, or the members of a
/// top-level JSON object, without parsing the whole body at once.
pub struct JsonReader<'a> {
    st: Structure,
    scanner: Scanner<'a>,
    shape: Shape,
    index: usize,
    buf: Vec<u8>,
}

impl<'a> JsonReader<'a> {
    pub fn new<R: Read + 'a>(st: &Structure, r: R) -> IoResult<Self> {
        Self::with_config(st, r, &IoConfig::default())
    }

    pub fn with_config<R: Read + 'a>(st: &Structure, r: R, config: &IoConfig) -> IoResult<Self> {
        Ok(Self {
            st: st.clone(),
            scanner: Scanner {
                inner: decompress_reader(st.compression, r)?,
                limit: config.max_record_size,
            },
            shape: Shape::Start,
            index: 0,
            buf: Vec::new(),
        })
    }

    fn decode_err(&self, reason: impl Into<String>) -> IoError {
        IoError::Decode {
            index: self.index,
            reason: reason.into(),
        }
    }

    fn read_value(&mut self) -> IoResult<Value> {
        self.scanner.skip_ws()?;
        self.scanner.scan_value(self.index, &mut self.buf)?;
        serde_json::from_slice(&self.buf).map_err(|e| self.decode_err(e.to_string()))
    }

    fn read_member(&mut self) -> IoResult<Entry> {
        let key = match self.read_value()? {
            Value::String(key) => key,
            _ => return Err(self.decode_err("object keys must be strings")),
        };
        match self.scanner.skip_ws()? {
            Some(b':') => self.scanner.bump(),
            _ => return Err(self.decode_err("expected ':' after object key")),
        }
        let value = self.read_value()?;
        Ok(Entry::keyed(self.index, key, value))
    }
}

impl EntryReader for JsonReader<'_> {
    fn structure(&self) -> &Structure {
        &self.st
    }

    fn read_entry(&mut self) -> IoResult<Option<Entry>> {
        if self.shape == Shape::Start {
            self.shape = match self.scanner.skip_ws()? {
                None => Shape::Done,
                Some(b'[') => Shape::Array,
                Some(b'{') => Shape::Object,
                Some(_) => return Err(self.decode_err("body must be a JSON array or object")),
            };
            if self.shape != Shape::Done {
                self.scanner.bump();
            }
        }
        let close = match self.shape {
            Shape::Done => return Ok(None),
            Shape::Array => b']',
            _ => b'}',
        };

        match self.scanner.skip_ws()? {
            None => return Err(self.decode_err("unexpected end of input")),
            Some(b) if b == close => {
                self.scanner.bump();
                self.shape = Shape::Done;
                if let Some(b) = self.scanner.skip_ws()? {
                    return Err(self.decode_err(format!(
                        "unexpected '{}' after the end of the body",
                        b as char
                    )));
                }
                trace!(entries = self.index, "finished reading JSON body");
                return Ok(None);
            }
            Some(b',') if self.index > 0 => self.scanner.bump(),
            Some(_) if self.index == 0 => {}
            Some(b) => {
                return Err(self.decode_err(format!(
                    "expected ',' or '{}', found '{}'",
                    close as char, b as char
                )))
            }
        }

        let entry = if self.shape == Shape::Array {
            let value = self.read_value()?;
            Entry::indexed(self.index, value)
        } else {
            self.read_member()?
        };
        self.index += 1;
        Ok(Some(entry))
    }

    fn close(&mut self) -> IoResult<()> {
        self.shape = Shape::Done;
        Ok(())
    }
}

/// Finds the byte extent of one JSON value at a time.
struct Scanner<'a> {
    inner: Box<dyn BufRead + 'a>,
    limit: usize,
}

impl Scanner<'_> {
    fn peek(&mut self) -> io::Result<Option<u8>> {
        Ok(self.inner.fill_buf()?.first().copied())
    }

    fn bump(&mut self) {
        self.inner.consume(1);
    }

    /// Skip whitespace and peek at the next byte.
    fn skip_ws(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.peek()? {
                Some(b) if b.is_ascii_whitespace() => self.bump(),
                other => return Ok(other),
            }
        }
    }

    /// Copy the bytes of the next value into `buf`, growing it as needed.
    ///
    /// Strings and nested containers are tracked so delimiters inside them
    /// do not end the value. Scalars end at the first delimiter or
    /// whitespace, which is left unread.
    fn scan_value(&mut self, index: usize, buf: &mut Vec<u8>) -> IoResult<()> {
        buf.clear();
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;
        loop {
            let Some(b) = self.peek()? else {
                if depth == 0 && !in_string && !buf.is_empty() {
                    return Ok(());
                }
                return Err(IoError::Decode {
                    index,
                    reason: "unexpected end of input".into(),
                });
            };
            let ends_scalar = depth == 0
                && !in_string
                && (b == b',' || b == b']' || b == b'}' || b == b':' || b.is_ascii_whitespace());
            if ends_scalar {
                if buf.is_empty() {
                    return Err(IoError::Decode {
                        index,
                        reason: format!("expected a value, found '{}'", b as char),
                    });
                }
                return Ok(());
            }

            buf.push(b);
            self.bump();
            if buf.len() > self.limit {
                return Err(IoError::RecordTooLarge {
                    index,
                    limit: self.limit,
                });
            }

            if in_string {
                if escaped {
                    escaped = false;
                } else if b == b'\\' {
                    escaped = true;
                } else if b == b'"' {
                    in_string = false;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                continue;
            }
            match b {
                b'"' => in_string = true,
                b'[' | b'{' => depth += 1,
                b']' | b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }
}

/// Writes entries as the elements of one top-level JSON array, or as the
/// members of one object when the schema declares an object body.
///
/// Without a declared top-level type the body takes the shape of the first
/// entry: keyed entries make an object, anything else an array.
pub struct JsonWriter<W: Write> {
    st: Structure,
    out: CompressWriter<W>,
    /// `None` until a schema type or the first entry settles the shape.
    object: Option<bool>,
    count: usize,
    closed: bool,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(st: &Structure, w: W) -> IoResult<Self> {
        Self::with_config(st, w, &IoConfig::default())
    }

    pub fn with_config(st: &Structure, w: W, config: &IoConfig) -> IoResult<Self> {
        Ok(Self {
            st: st.clone(),
            out: CompressWriter::new(st.compression, w, config.zstd_level)?,
            object: st.schema_type().map(|ty| ty == "object"),
            count: 0,
            closed: false,
        })
    }

    /// The underlying sink. Complete only after [`EntryWriter::close`].
    pub fn get_ref(&self) -> Option<&W> {
        self.out.get_ref()
    }

    /// Close and return the underlying sink.
    pub fn into_inner(mut self) -> IoResult<W> {
        self.close()?;
        Ok(self.out.into_inner()?)
    }

    fn open_close(&self) -> (&'static [u8], &'static [u8]) {
        if self.object == Some(true) {
            (b"{", b"}")
        } else {
            (b"[", b"]")
        }
    }
}

impl<W: Write> EntryWriter for JsonWriter<W> {
    fn structure(&self) -> &Structure {
        &self.st
    }

    fn write_entry(&mut self, entry: &Entry) -> IoResult<()> {
        if self.closed {
            return Err(IoError::Closed);
        }
        let encode_err = |e: serde_json::Error| IoError::Encode {
            index: entry.index,
            reason: e.to_string(),
        };
        let object = *self.object.get_or_insert(entry.key.is_some());
        let sep: &[u8] = if self.count == 0 { self.open_close().0 } else { b"," };
        if object {
            let key = entry.key.as_deref().ok_or_else(|| IoError::Encode {
                index: entry.index,
                reason: "entries of an object body need a key".into(),
            })?;
            self.out.write_all(sep)?;
            serde_json::to_writer(&mut self.out, key).map_err(encode_err)?;
            self.out.write_all(b":")?;
        } else {
            self.out.write_all(sep)?;
        }
        serde_json::to_writer(&mut self.out, &entry.value).map_err(encode_err)?;
        self.count += 1;
        Ok(())
    }

    fn close(&mut self) -> IoResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let (open, close) = self.open_close();
        let framing = if self.count == 0 {
            self.out.write_all(open).and_then(|_| self.out.write_all(close))
        } else {
            self.out.write_all(close)
        };
        // Finish the compressed frame even if the framing write failed.
        let finished = self.out.finish();
        framing?;
        finished?;
        trace!(entries = self.count, "closed JSON writer");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copy::read_all;
    use ds_model::DataFormat;
    use serde_json::json;

    fn array_st() -> Structure {
        Structure {
            format: DataFormat::Json,
            schema: Some(json!({"type": "array"})),
            ..Default::default()
        }
    }

    fn object_st() -> Structure {
        Structure {
            format: DataFormat::Json,
            schema: Some(json!({"type": "object"})),
            ..Default::default()
        }
    }

    fn read(st: &Structure, body: &str) -> IoResult<Vec<Entry>> {
        let mut r = JsonReader::new(st, body.as_bytes())?;
        read_all(&mut r)
    }

    // -----------------------------------------------------------------------
    // Reader
    // -----------------------------------------------------------------------

    #[test]
    fn reads_array_elements() {
        let body = r#" [ 1, "two, ]", {"a": [1, {"b": "}"}]}, null, -2.5e3, true ] "#;
        let entries = read(&array_st(), body).unwrap();
        let values: Vec<_> = entries.iter().map(|e| e.value.clone()).collect();
        assert_eq!(
            values,
            vec![
                json!(1),
                json!("two, ]"),
                json!({"a": [1, {"b": "}"}]}),
                json!(null),
                json!(-2500.0),
                json!(true)
            ]
        );
        assert!(entries.iter().all(|e| e.key.is_none()));
        assert_eq!(entries[2].index, 2);
    }

    #[test]
    fn reads_object_members() {
        let entries = read(&object_st(), r#"{"a": 1, "b\"q": [2], "c": {"d": null}}"#).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], Entry::keyed(0, "a", json!(1)));
        assert_eq!(entries[1], Entry::keyed(1, "b\"q", json!([2])));
        assert_eq!(entries[2], Entry::keyed(2, "c", json!({"d": null})));
    }

    #[test]
    fn empty_containers_and_bodies() {
        assert!(read(&array_st(), "[]").unwrap().is_empty());
        assert!(read(&object_st(), " { } ").unwrap().is_empty());
        assert!(read(&array_st(), "").unwrap().is_empty());
    }

    #[test]
    fn end_of_stream_is_sticky() {
        let mut r = JsonReader::new(&array_st(), &b"[1]"[..]).unwrap();
        assert!(r.read_entry().unwrap().is_some());
        assert!(r.read_entry().unwrap().is_none());
        assert!(r.read_entry().unwrap().is_none());
    }

    #[test]
    fn malformed_bodies_name_the_entry() {
        for (body, index) in [("[1, 2", 2), ("[1 2]", 1), ("[1,]", 1), ("[tru]", 0), ("5", 0)] {
            match read(&array_st(), body) {
                Err(IoError::Decode { index: i, .. }) => assert_eq!(i, index, "{body}"),
                other => panic!("{body}: unexpected {other:?}"),
            }
        }
        assert!(matches!(
            read(&object_st(), r#"{1: 2}"#),
            Err(IoError::Decode { index: 0, .. })
        ));
    }

    #[test]
    fn trailing_bytes_after_body_are_rejected() {
        for body in ["[1] garbage", "[1]]", "[1] [2]"] {
            match read(&array_st(), body) {
                Err(IoError::Decode { index: 1, .. }) => {}
                other => panic!("{body}: unexpected {other:?}"),
            }
        }
        assert!(matches!(
            read(&object_st(), r#"{"a":1}{"b":2}"#),
            Err(IoError::Decode { index: 1, .. })
        ));
        assert_eq!(read(&array_st(), "[1]\n\t ").unwrap().len(), 1);
    }

    #[test]
    fn large_string_is_read_intact() {
        let big = "x".repeat(40 * 1024);
        let body = format!(r#"["{big}", 1]"#);
        let entries = read(&array_st(), &body).unwrap();
        assert_eq!(entries[0].value, json!(big));
        assert_eq!(entries[1].value, json!(1));
    }

    #[test]
    fn record_ceiling_is_enforced() {
        let config = IoConfig {
            max_record_size: 16,
            ..Default::default()
        };
        let body = format!(r#"[1, "{}"]"#, "y".repeat(64));
        let mut r = JsonReader::with_config(&array_st(), body.as_bytes(), &config).unwrap();
        assert!(r.read_entry().unwrap().is_some());
        assert!(matches!(
            r.read_entry(),
            Err(IoError::RecordTooLarge { index: 1, limit: 16 })
        ));
    }

    // -----------------------------------------------------------------------
    // Writer
    // -----------------------------------------------------------------------

    #[test]
    fn writes_array_body() {
        let mut w = JsonWriter::new(&array_st(), Vec::new()).unwrap();
        for (i, v) in [json!(1), json!({"b": 2, "a": 1})].into_iter().enumerate() {
            w.write_entry(&Entry::indexed(i, v)).unwrap();
        }
        let out = w.into_inner().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), r#"[1,{"a":1,"b":2}]"#);
    }

    #[test]
    fn writes_object_body() {
        let mut w = JsonWriter::new(&object_st(), Vec::new()).unwrap();
        w.write_entry(&Entry::keyed(0, "a", json!(1))).unwrap();
        w.write_entry(&Entry::keyed(1, "b", json!([true]))).unwrap();
        let out = w.into_inner().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), r#"{"a":1,"b":[true]}"#);
    }

    #[test]
    fn untyped_schema_takes_shape_of_first_entry() {
        let untyped = Structure {
            format: DataFormat::Json,
            schema: Some(json!({"properties": {"a": {}}})),
            ..Default::default()
        };
        let mut w = JsonWriter::new(&untyped, Vec::new()).unwrap();
        w.write_entry(&Entry::keyed(0, "a", json!(1))).unwrap();
        w.write_entry(&Entry::keyed(1, "b", json!(2))).unwrap();
        assert_eq!(w.into_inner().unwrap(), br#"{"a":1,"b":2}"#.to_vec());

        let mut w = JsonWriter::new(&untyped, Vec::new()).unwrap();
        w.write_entry(&Entry::indexed(0, json!(1))).unwrap();
        assert_eq!(w.into_inner().unwrap(), b"[1]".to_vec());

        let w = JsonWriter::new(&untyped, Vec::new()).unwrap();
        assert_eq!(w.into_inner().unwrap(), b"[]".to_vec());
    }

    #[test]
    fn object_body_requires_keys() {
        let mut w = JsonWriter::new(&object_st(), Vec::new()).unwrap();
        let err = w.write_entry(&Entry::indexed(4, json!(1))).unwrap_err();
        assert!(matches!(err, IoError::Encode { index: 4, .. }));
        w.close().unwrap();
    }

    #[test]
    fn empty_writer_closes_to_empty_container() {
        let mut w = JsonWriter::new(&array_st(), Vec::new()).unwrap();
        w.close().unwrap();
        assert_eq!(w.get_ref().unwrap().as_slice(), b"[]");
        let w = JsonWriter::new(&object_st(), Vec::new()).unwrap();
        assert_eq!(w.into_inner().unwrap(), b"{}".to_vec());
    }

    #[test]
    fn close_is_idempotent_and_final() {
        let mut w = JsonWriter::new(&array_st(), Vec::new()).unwrap();
        w.write_entry(&Entry::indexed(0, json!(1))).unwrap();
        w.close().unwrap();
        w.close().unwrap();
        assert_eq!(w.get_ref().unwrap().as_slice(), b"[1]");
        assert!(matches!(
            w.write_entry(&Entry::indexed(1, json!(2))),
            Err(IoError::Closed)
        ));
    }
}
