use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use ds_types::Kind;

use crate::document::{assign_string, Document};

/// A recorded change to a dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Commit {
    #[serde(skip)]
    pub path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qri: Option<Kind>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub signature: String,
    /// Always written in UTC, so equal instants encode to equal bytes.
    #[serde(serialize_with = "serialize_utc")]
    pub timestamp: DateTime<FixedOffset>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
}

/// The zero instant, `0001-01-01T00:00:00Z`.
pub fn zero_time() -> DateTime<FixedOffset> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
        .and_utc()
        .fixed_offset()
}

fn serialize_utc<S: Serializer>(ts: &DateTime<FixedOffset>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

impl Default for Commit {
    fn default() -> Self {
        Self {
            path: String::new(),
            message: String::new(),
            qri: None,
            signature: String::new(),
            timestamp: zero_time(),
            title: String::new(),
        }
    }
}

impl Commit {
    /// The timestamp rendered as RFC3339 in UTC, without fractional seconds.
    pub fn utc_timestamp(&self) -> String {
        self.timestamp
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl Document for Commit {
    const KIND: Kind = Kind::Commit;
    const FIELD: &'static str = "commit";

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
        self.message.is_empty()
            && self.signature.is_empty()
            && self.title.is_empty()
            && self.timestamp == zero_time()
    }

    fn assign(&mut self, other: &Self) {
        assign_string(&mut self.path, &other.path);
        assign_string(&mut self.message, &other.message);
        assign_string(&mut self.signature, &other.signature);
        assign_string(&mut self.title, &other.title);
        if other.qri.is_some() {
            self.qri = other.qri;
        }
        if other.timestamp != zero_time() {
            self.timestamp = other.timestamp;
        }
    }
}
