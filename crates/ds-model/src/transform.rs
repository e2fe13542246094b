use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use ds_types::Kind;

use crate::dataset::Dataset;
use crate::document::{assign_string, value_type_name, Document};
use crate::error::{ModelError, ModelResult};

/// The script that computes a dataset, and the upstream datasets it reads.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Transform {
    #[serde(skip)]
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qri: Option<Kind>,
    #[serde(with = "resources", skip_serializing_if = "Option::is_none")]
    pub resources: Option<BTreeMap<String, TransformResource>>,
    /// Inline script contents. Stored as a separate file, never inline.
    #[serde(skip)]
    pub script_bytes: Vec<u8>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub script_path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub syntax: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub syntax_version: String,
}

/// A named upstream dataset of a transform.
#[derive(Clone, Debug, PartialEq)]
pub enum TransformResource {
    /// Path of a dataset stored elsewhere.
    Reference(String),
    /// A dataset document carried in place.
    Inline(Box<Dataset>),
}

impl TransformResource {
    /// Classify a decoded JSON value: strings are references, objects are
    /// inline datasets, anything else is rejected.
    pub fn from_value(name: &str, value: Value) -> ModelResult<Self> {
        match value {
            Value::String(path) => Ok(Self::Reference(path)),
            Value::Object(_) => serde_json::from_value::<Dataset>(value)
                .map(|ds| Self::Inline(Box::new(ds)))
                .map_err(|e| ModelError::Resource {
                    name: name.to_string(),
                    reason: e.to_string(),
                }),
            other => Err(ModelError::Resource {
                name: name.to_string(),
                reason: format!(
                    "expected a dataset document or path reference, found {}",
                    value_type_name(&other)
                ),
            }),
        }
    }

    /// The path this resource points at. Empty for unsaved inline datasets.
    pub fn path(&self) -> &str {
        match self {
            Self::Reference(path) => path,
            Self::Inline(ds) => &ds.path,
        }
    }

    /// The inline dataset, if this resource carries one.
    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            Self::Reference(_) => None,
            Self::Inline(ds) => Some(ds),
        }
    }

    fn to_abstract(&self) -> Self {
        match self {
            Self::Reference(_) => Self::Reference(String::new()),
            Self::Inline(ds) => Self::Inline(Box::new(ds.to_abstract())),
        }
    }
}

impl Serialize for TransformResource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Reference(path) => serializer.serialize_str(path),
            Self::Inline(ds) if ds.is_reference() => serializer.serialize_str(&ds.path),
            Self::Inline(ds) => ds.serialize(serializer),
        }
    }
}

mod resources {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    use super::TransformResource;

    pub fn serialize<S: Serializer>(
        value: &Option<BTreeMap<String, TransformResource>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BTreeMap<String, TransformResource>>, D::Error> {
        let Some(raw) = Option::<BTreeMap<String, Value>>::deserialize(deserializer)? else {
            return Ok(None);
        };
        raw.into_iter()
            .map(|(name, value)| {
                let resource = TransformResource::from_value(&name, value)
                    .map_err(<D::Error as serde::de::Error>::custom)?;
                Ok::<_, D::Error>((name, resource))
            })
            .collect::<Result<_, _>>()
            .map(Some)
    }
}

impl Transform {
    /// Structural signature: syntax and resource names survive, script
    /// locations and resource identities do not.
    pub fn to_abstract(&self) -> Transform {
        Transform {
            qri: Some(Kind::Transform),
            config: self.config.clone(),
            resources: self.resources.as_ref().map(|resources| {
                resources
                    .iter()
                    .map(|(name, r)| (name.clone(), r.to_abstract()))
                    .collect()
            }),
            script_bytes: self.script_bytes.clone(),
            syntax: self.syntax.clone(),
            syntax_version: self.syntax_version.clone(),
            ..Default::default()
        }
    }
}

impl Document for Transform {
    const KIND: Kind = Kind::Transform;
    const FIELD: &'static str = "transform";

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
        self.config.is_none()
            && self.resources.is_none()
            && self.script_bytes.is_empty()
            && self.script_path.is_empty()
            && self.syntax.is_empty()
            && self.syntax_version.is_empty()
    }

    fn assign(&mut self, other: &Self) {
        assign_string(&mut self.path, &other.path);
        assign_string(&mut self.script_path, &other.script_path);
        assign_string(&mut self.syntax, &other.syntax);
        assign_string(&mut self.syntax_version, &other.syntax_version);
        if other.qri.is_some() {
            self.qri = other.qri;
        }
        if other.config.is_some() {
            self.config = other.config.clone();
        }
        if !other.script_bytes.is_empty() {
            self.script_bytes = other.script_bytes.clone();
        }
        if let Some(resources) = &other.resources {
            self.resources
                .get_or_insert_with(BTreeMap::new)
                .extend(resources.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }

    fn check_kinds(&self) -> ModelResult<()> {
        crate::document::check_kind::<Self>(self.qri)?;
        for resource in self.resources.iter().flat_map(|r| r.values()) {
            if let TransformResource::Inline(ds) = resource {
                ds.check_kinds()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode_document, encode_document, Meta};

    #[test]
    fn resources_classify_strings_and_objects() {
        let tf: Transform = decode_document(
            br#"{"resources":{"a":"/mem/a","b":{"meta":{"title":"inline"}}},"syntax":"starlark"}"#,
        )
        .unwrap();
        let resources = tf.resources.unwrap();
        assert_eq!(resources["a"], TransformResource::Reference("/mem/a".into()));
        let b = resources["b"].dataset().unwrap();
        assert_eq!(b.meta.as_ref().unwrap().title, "inline");
    }

    #[test]
    fn invalid_resource_names_key() {
        let err = decode_document::<Transform>(br#"{"resources":{"foo":0}}"#).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("resource 'foo'"), "{msg}");
        assert!(msg.contains("number"), "{msg}");
    }

    #[test]
    fn nested_kind_mismatch_is_detected() {
        let err =
            decode_document::<Transform>(br#"{"resources":{"a":{"qri":"st:0"}}}"#).unwrap_err();
        assert!(matches!(err, ModelError::KindMismatch { field: "dataset", .. }));
    }

    #[test]
    fn reference_resources_encode_as_strings() {
        let mut resources = BTreeMap::new();
        resources.insert("a".to_string(), TransformResource::Reference("/mem/a".into()));
        resources.insert(
            "b".to_string(),
            TransformResource::Inline(Box::new(Dataset::reference("/mem/b"))),
        );
        let tf = Transform {
            syntax: "starlark".into(),
            resources: Some(resources),
            ..Default::default()
        };
        let json = String::from_utf8(encode_document(&tf).unwrap()).unwrap();
        assert_eq!(json, r#"{"resources":{"a":"/mem/a","b":"/mem/b"},"syntax":"starlark"}"#);
    }

    #[test]
    fn abstract_blanks_resource_identity() {
        let mut inline = Dataset::reference("/mem/b");
        inline.meta = Some(Meta {
            title: "b".into(),
            ..Default::default()
        });
        let mut resources = BTreeMap::new();
        resources.insert("a".to_string(), TransformResource::Reference("/mem/a".into()));
        resources.insert("b".to_string(), TransformResource::Inline(Box::new(inline)));
        let tf = Transform {
            path: "/mem/tf".into(),
            script_path: "/mem/script".into(),
            syntax: "starlark".into(),
            resources: Some(resources),
            ..Default::default()
        };
        let abs = tf.to_abstract();
        assert!(abs.path.is_empty());
        assert!(abs.script_path.is_empty());
        assert_eq!(abs.syntax, "starlark");
        let resources = abs.resources.unwrap();
        assert_eq!(resources["a"].path(), "");
        assert_eq!(resources["b"].path(), "");
    }

    #[test]
    fn assign_merges_resources() {
        let mut tf = Transform::default();
        let mut first = BTreeMap::new();
        first.insert("a".to_string(), TransformResource::Reference("/mem/a".into()));
        tf.assign(&Transform {
            resources: Some(first),
            ..Default::default()
        });
        let mut second = BTreeMap::new();
        second.insert("b".to_string(), TransformResource::Reference("/mem/b".into()));
        tf.assign(&Transform {
            resources: Some(second),
            syntax: "starlark".into(),
            ..Default::default()
        });
        assert_eq!(tf.resources.as_ref().unwrap().len(), 2);
        assert_eq!(tf.syntax, "starlark");
    }
}
