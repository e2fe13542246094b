use serde::{Deserialize, Serialize};
use serde_json::Value;

use ds_types::Kind;

use crate::document::{assign_string, Document};

/// Computed statistics about a dataset body. The contents are opaque.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    #[serde(skip)]
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qri: Option<Kind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<Value>,
}

impl Document for Stats {
    const KIND: Kind = Kind::Stats;
    const FIELD: &'static str = "stats";

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
        self.stats.is_none()
    }

    fn assign(&mut self, other: &Self) {
        assign_string(&mut self.path, &other.path);
        if other.qri.is_some() {
            self.qri = other.qri;
        }
        if other.stats.is_some() {
            self.stats = other.stats.clone();
        }
    }
}
