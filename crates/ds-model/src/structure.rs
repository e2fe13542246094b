use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ds_types::{Compression, DataFormat, Kind};

use crate::document::{assign_string, Document};

/// Shape, format and integrity information about a dataset body.
///
/// `schema` is a free-form JSON-Schema value; `format_config` holds options
/// specific to `format` (delimiters, header rows, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Structure {
    #[serde(skip)]
    pub path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub checksum: String,
    #[serde(skip_serializing_if = "Compression::is_none")]
    pub compression: Compression,
    #[serde(skip_serializing_if = "is_zero")]
    pub depth: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub encoding: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub entries: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub err_count: i64,
    #[serde(skip_serializing_if = "DataFormat::is_unknown")]
    pub format: DataFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_config: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "is_zero")]
    pub length: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qri: Option<Kind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub strict: bool,
}

pub(crate) fn is_zero(n: &i64) -> bool {
    *n == 0
}

impl Structure {
    /// Structural signature of this structure: format and schema survive,
    /// checksums, sizes and counts of any particular body do not.
    pub fn to_abstract(&self) -> Structure {
        Structure {
            qri: Some(Kind::Structure),
            compression: self.compression,
            encoding: self.encoding.clone(),
            format: self.format,
            format_config: self.format_config.clone(),
            schema: self.schema.clone(),
            strict: self.strict,
            ..Default::default()
        }
    }

    /// The declared top-level JSON type of the body, if the schema names one.
    pub fn schema_type(&self) -> Option<&str> {
        self.schema.as_ref()?.get("type")?.as_str()
    }

    /// Returns `true` if the body is declared to be a JSON object.
    pub fn is_object_body(&self) -> bool {
        self.schema_type() == Some("object")
    }
}

impl Document for Structure {
    const KIND: Kind = Kind::Structure;
    const FIELD: &'static str = "structure";

    fn path(&self) -> &str {
        &self.path
    }

    fn set_path(&mut self, path: String) {
        self.path = path;
    }

    fn kind(&self) -> Option<Kind> {
        self.qri
    }

    fn set_kind(&mut self, kind: Option<Kind>) {
        self.qri = kind;
    }

    fn is_empty(&self) -> bool {
        self.checksum.is_empty()
            && self.compression.is_none()
            && self.depth == 0
            && self.encoding.is_empty()
            && self.entries == 0
            && self.err_count == 0
            && self.format.is_unknown()
            && self.format_config.is_none()
            && self.length == 0
            && self.schema.is_none()
            && !self.strict
    }

    fn assign(&mut self, other: &Self) {
        assign_string(&mut self.path, &other.path);
        assign_string(&mut self.checksum, &other.checksum);
        assign_string(&mut self.encoding, &other.encoding);
        if other.qri.is_some() {
            self.qri = other.qri;
        }
        if !other.compression.is_none() {
            self.compression = other.compression;
        }
        if other.depth != 0 {
            self.depth = other.depth;
        }
        if other.entries != 0 {
            self.entries = other.entries;
        }
        if other.err_count != 0 {
            self.err_count = other.err_count;
        }
        if !other.format.is_unknown() {
            self.format = other.format;
        }
        if other.format_config.is_some() {
            self.format_config = other.format_config.clone();
        }
        if other.length != 0 {
            self.length = other.length;
        }
        if other.schema.is_some() {
            self.schema = other.schema.clone();
        }
        if other.strict {
            self.strict = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn marshal_is_canonical() {
        let st = Structure {
            format: DataFormat::Csv,
            schema: Some(json!({"type": "array", "items": {"type": "array"}})),
            format_config: Some(json!({"headerRow": true}).as_object().unwrap().clone()),
            ..Default::default()
        };
        let bytes = serde_json::to_vec(&st).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            concat!(
                r#"{"format":"csv","formatConfig":{"headerRow":true},"#,
                r#""schema":{"items":{"type":"array"},"type":"array"}}"#
            )
        );
    }

    #[test]
    fn unmarshal_rejects_unknown_format() {
        let err = serde_json::from_str::<Structure>(r#"{"format":"foo"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid data format: `foo`"));
    }

    #[test]
    fn abstract_drops_body_dependent_fields() {
        let st = Structure {
            path: "/mem/st".into(),
            checksum: "abc".into(),
            entries: 12,
            length: 2048,
            format: DataFormat::Json,
            schema: Some(json!({"type": "array"})),
            ..Default::default()
        };
        let abs = st.to_abstract();
        assert!(abs.path.is_empty());
        assert!(abs.checksum.is_empty());
        assert_eq!(abs.entries, 0);
        assert_eq!(abs.length, 0);
        assert_eq!(abs.format, DataFormat::Json);
        assert_eq!(abs.schema, st.schema);
        assert_eq!(abs.qri, Some(Kind::Structure));
    }

    #[test]
    fn assign_overrides_non_empty_fields() {
        let mut st = Structure {
            format: DataFormat::Csv,
            checksum: "old".into(),
            ..Default::default()
        };
        st.assign(&Structure {
            checksum: "new".into(),
            entries: 3,
            ..Default::default()
        });
        assert_eq!(st.format, DataFormat::Csv);
        assert_eq!(st.checksum, "new");
        assert_eq!(st.entries, 3);
    }

    #[test]
    fn empty_and_reference() {
        assert!(Structure::default().is_empty());
        assert!(!Structure::default().is_reference());
        assert!(Structure::reference("/mem/x").is_reference());
        let st = Structure {
            qri: Some(Kind::Structure),
            ..Default::default()
        };
        assert!(st.is_empty());
    }

    #[test]
    fn schema_type() {
        let st = Structure {
            schema: Some(json!({"type": "object"})),
            ..Default::default()
        };
        assert_eq!(st.schema_type(), Some("object"));
        assert!(st.is_object_body());
        assert_eq!(Structure::default().schema_type(), None);
    }
}
