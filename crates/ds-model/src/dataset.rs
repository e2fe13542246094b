use serde::{Deserialize, Serialize};

use ds_types::Kind;

use crate::commit::Commit;
use crate::document::{self, assign_option, assign_string, check_kind, Document};
use crate::error::{ModelError, ModelResult};
use crate::meta::Meta;
use crate::stats::Stats;
use crate::structure::Structure;
use crate::transform::Transform;
use crate::viz::Viz;

/// The root aggregate: a versioned body plus its describing documents.
///
/// Sub-documents are optional. An absent sub-document is different from a
/// present one with every field empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dataset {
    /// Content path this dataset was loaded from or saved to.
    #[serde(skip)]
    pub path: String,
    #[serde(
        with = "document::reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub abstract_structure: Option<Structure>,
    /// Raw body contents. Stored as a separate file, never inline.
    #[serde(skip)]
    pub body_bytes: Vec<u8>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body_path: String,
    #[serde(
        with = "document::reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub commit: Option<Commit>,
    #[serde(
        with = "document::reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub meta: Option<Meta>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub peername: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub previous_path: String,
    #[serde(rename = "profileID", skip_serializing_if = "String::is_empty")]
    pub profile_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qri: Option<Kind>,
    #[serde(
        with = "document::reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub stats: Option<Stats>,
    #[serde(
        with = "document::reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub structure: Option<Structure>,
    #[serde(
        with = "document::reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub transform: Option<Transform>,
    #[serde(
        with = "document::reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub viz: Option<Viz>,
}

impl Dataset {
    /// Decode a dataset document, checking every kind tag.
    pub fn from_json(data: &[u8]) -> ModelResult<Self> {
        document::decode_document(data)
    }

    /// Encode as canonical JSON. Reference-only datasets encode as their path.
    pub fn to_json(&self) -> ModelResult<Vec<u8>> {
        document::encode_document(self)
    }

    /// The deterministic bytes that identify this dataset version for
    /// signing: the commit instant in UTC, a newline, and the structure
    /// checksum.
    ///
    /// ```
    /// use ds_model::{Commit, Dataset, Structure};
    ///
    /// let ds = Dataset {
    ///     commit: Some(Commit::default()),
    ///     structure: Some(Structure::default()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(ds.signable_bytes().unwrap(), b"0001-01-01T00:00:00Z\n");
    /// ```
    pub fn signable_bytes(&self) -> ModelResult<Vec<u8>> {
        let commit = self.commit.as_ref().ok_or(ModelError::CommitRequired)?;
        let structure = self.structure.as_ref().ok_or(ModelError::StructureRequired)?;
        let mut bytes = commit.utc_timestamp().into_bytes();
        bytes.push(b'\n');
        bytes.extend_from_slice(structure.checksum.as_bytes());
        Ok(bytes)
    }

    /// Structural signature of this dataset.
    ///
    /// Keeps the structure and transform in their abstract forms and drops
    /// everything that depends on a particular body, author or location.
    pub fn to_abstract(&self) -> Dataset {
        Dataset {
            qri: Some(Kind::Dataset),
            structure: self.structure.as_ref().map(Structure::to_abstract),
            transform: self.transform.as_ref().map(Transform::to_abstract),
            ..Default::default()
        }
    }
}

impl Document for Dataset {
    const KIND: Kind = Kind::Dataset;
    const FIELD: &'static str = "dataset";

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
        self.abstract_structure.is_none()
            && self.body_bytes.is_empty()
            && self.body_path.is_empty()
            && self.commit.is_none()
            && self.meta.is_none()
            && self.name.is_empty()
            && self.peername.is_empty()
            && self.previous_path.is_empty()
            && self.profile_id.is_empty()
            && self.stats.is_none()
            && self.structure.is_none()
            && self.transform.is_none()
            && self.viz.is_none()
    }

    fn assign(&mut self, other: &Self) {
        assign_string(&mut self.path, &other.path);
        assign_string(&mut self.body_path, &other.body_path);
        assign_string(&mut self.name, &other.name);
        assign_string(&mut self.peername, &other.peername);
        assign_string(&mut self.previous_path, &other.previous_path);
        assign_string(&mut self.profile_id, &other.profile_id);
        if other.qri.is_some() {
            self.qri = other.qri;
        }
        if !other.body_bytes.is_empty() {
            self.body_bytes = other.body_bytes.clone();
        }
        assign_option(&mut self.abstract_structure, &other.abstract_structure);
        assign_option(&mut self.commit, &other.commit);
        assign_option(&mut self.meta, &other.meta);
        assign_option(&mut self.stats, &other.stats);
        assign_option(&mut self.structure, &other.structure);
        assign_option(&mut self.transform, &other.transform);
        assign_option(&mut self.viz, &other.viz);
    }

    fn check_kinds(&self) -> ModelResult<()> {
        check_kind::<Self>(self.qri)?;
        if let Some(st) = &self.abstract_structure {
            st.check_kinds()?;
        }
        if let Some(st) = &self.structure {
            st.check_kinds()?;
        }
        if let Some(cm) = &self.commit {
            cm.check_kinds()?;
        }
        if let Some(md) = &self.meta {
            md.check_kinds()?;
        }
        if let Some(sa) = &self.stats {
            sa.check_kinds()?;
        }
        if let Some(tf) = &self.transform {
            tf.check_kinds()?;
        }
        if let Some(vz) = &self.viz {
            vz.check_kinds()?;
        }
        Ok(())
    }
}
