use serde::{Deserialize, Serialize};

use ds_types::Kind;

use crate::document::{assign_string, Document};

/// A visualization script and the format it renders to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Viz {
    #[serde(skip)]
    pub path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qri: Option<Kind>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rendered_path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub script_path: String,
    /// Inline script contents. Stored as a separate file, never inline.
    #[serde(skip)]
    pub script_bytes: Vec<u8>,
}

impl Document for Viz {
    const KIND: Kind = Kind::Viz;
    const FIELD: &'static str = "viz";

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
        self.format.is_empty()
            && self.rendered_path.is_empty()
            && self.script_path.is_empty()
            && self.script_bytes.is_empty()
    }

    fn assign(&mut self, other: &Self) {
        assign_string(&mut self.path, &other.path);
        assign_string(&mut self.format, &other.format);
        assign_string(&mut self.rendered_path, &other.rendered_path);
        assign_string(&mut self.script_path, &other.script_path);
        if other.qri.is_some() {
            self.qri = other.qri;
        }
        if !other.script_bytes.is_empty() {
            self.script_bytes = other.script_bytes.clone();
        }
    }
}
