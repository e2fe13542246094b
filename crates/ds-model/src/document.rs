//! The contract shared by every dataset document, and its wire convention.
//!
//! A document either appears inline as a JSON object, or as a bare JSON
//! string holding the path of the document elsewhere. A document that has
//! nothing but a path set encodes back to that bare string.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use ds_types::Kind;

use crate::error::{ModelError, ModelResult};

/// A dataset document with a kind tag and a content path.
pub trait Document: Serialize + DeserializeOwned + Default + Clone {
    /// The only kind tag this document may carry.
    const KIND: Kind;
    /// Field name used when reporting faults.
    const FIELD: &'static str;

    fn path(&self) -> &str;
    fn set_path(&mut self, path: String);
    fn kind(&self) -> Option<Kind>;
    fn set_kind(&mut self, kind: Option<Kind>);

    /// Returns `true` if no field besides the path and kind tag is set.
    fn is_empty(&self) -> bool;

    /// Merge `other` into `self`: non-empty fields of `other` win.
    fn assign(&mut self, other: &Self);

    /// A reference to a document stored at `path`.
    fn reference(path: impl Into<String>) -> Self {
        let mut doc = Self::default();
        doc.set_path(path.into());
        doc
    }

    /// Returns `true` if this document only points elsewhere.
    fn is_reference(&self) -> bool {
        self.is_empty() && !self.path().is_empty()
    }

    /// Check this document's kind tag, and the tags of nested documents.
    fn check_kinds(&self) -> ModelResult<()> {
        check_kind::<Self>(self.kind())
    }
}

pub(crate) fn check_kind<T: Document>(found: Option<Kind>) -> ModelResult<()> {
    match found {
        Some(found) if found != T::KIND => Err(ModelError::KindMismatch {
            field: T::FIELD,
            expected: T::KIND,
            found,
        }),
        _ => Ok(()),
    }
}

/// Decode a document from JSON bytes.
///
/// A bare string decodes as a reference. Objects are decoded field by field
/// and their kind tags checked. Anything else is a decode fault.
pub fn decode_document<T: Document>(data: &[u8]) -> ModelResult<T> {
    let value: Value = serde_json::from_slice(data).map_err(|e| ModelError::Decode {
        field: T::FIELD,
        reason: e.to_string(),
    })?;
    let doc = document_from_value::<T>(value).map_err(|reason| ModelError::Decode {
        field: T::FIELD,
        reason,
    })?;
    doc.check_kinds()?;
    Ok(doc)
}

/// Encode a document as canonical JSON bytes.
pub fn encode_document<T: Document>(doc: &T) -> ModelResult<Vec<u8>> {
    let result = if doc.is_reference() {
        serde_json::to_vec(doc.path())
    } else {
        serde_json::to_vec(doc)
    };
    result.map_err(|e| ModelError::Serialization(e.to_string()))
}

pub(crate) fn document_from_value<T: Document>(value: Value) -> Result<T, String> {
    match value {
        Value::String(path) => Ok(T::reference(path)),
        Value::Object(_) => serde_json::from_value(value).map_err(|e| e.to_string()),
        other => Err(format!(
            "expected a document object or path string, found {}",
            value_type_name(&other)
        )),
    }
}

pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Merge an optional sub-document: present sources merge into present
/// targets, and are cloned into absent ones.
pub(crate) fn assign_option<T: Document>(dst: &mut Option<T>, src: &Option<T>) {
    if let Some(src) = src {
        match dst {
            Some(dst) => dst.assign(src),
            None => *dst = Some(src.clone()),
        }
    }
}

pub(crate) fn assign_string(dst: &mut String, src: &str) {
    if !src.is_empty() {
        *dst = src.to_string();
    }
}

/// Serde adapter for `Option<T: Document>` fields.
///
/// Use with `#[serde(default, with = "crate::document::reference",
/// skip_serializing_if = "Option::is_none")]`.
pub(crate) mod reference {
    use super::*;

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Document,
    {
        match value {
            Some(doc) if doc.is_reference() => serializer.serialize_str(doc.path()),
            Some(doc) => doc.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Document,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            value => document_from_value::<T>(value)
                .map(Some)
                .map_err(|reason| serde::de::Error::custom(format!("{}: {reason}", T::FIELD))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Commit, Dataset, Structure};
    use ds_types::DataFormat;

    #[test]
    fn bare_string_decodes_as_reference() {
        let st: Structure = decode_document(b"\"/mem/abc\"").unwrap();
        assert!(st.is_reference());
        assert_eq!(st.path, "/mem/abc");
    }

    #[test]
    fn reference_encodes_as_bare_string() {
        let st = Structure::reference("/mem/abc");
        assert_eq!(encode_document(&st).unwrap(), b"\"/mem/abc\"".to_vec());
    }

    #[test]
    fn non_empty_document_encodes_inline() {
        let mut st = Structure::reference("/mem/abc");
        st.format = DataFormat::Csv;
        assert_eq!(encode_document(&st).unwrap(), br#"{"format":"csv"}"#.to_vec());
    }

    #[test]
    fn wrong_shape_is_decode_fault() {
        let err = decode_document::<Commit>(b"5").unwrap_err();
        assert!(matches!(err, ModelError::Decode { field: "commit", .. }));
        let err = decode_document::<Commit>(b"{{{").unwrap_err();
        assert!(matches!(err, ModelError::Decode { field: "commit", .. }));
    }

    #[test]
    fn kind_mismatch_names_field() {
        let err = decode_document::<Commit>(br#"{"qri":"st:0"}"#).unwrap_err();
        assert_eq!(
            err,
            ModelError::KindMismatch {
                field: "commit",
                expected: Kind::Commit,
                found: Kind::Structure,
            }
        );
    }

    #[test]
    fn nested_reference_field() {
        let ds: Dataset = decode_document(br#"{"structure":"/mem/st"}"#).unwrap();
        let st = ds.structure.unwrap();
        assert!(st.is_reference());
        assert_eq!(st.path, "/mem/st");
    }

    #[test]
    fn nested_decode_fault_names_field() {
        let err = decode_document::<Dataset>(br#"{"structure":{"format":"foo"}}"#).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("structure"), "{msg}");
        assert!(msg.contains("invalid data format: `foo`"), "{msg}");
    }
}
