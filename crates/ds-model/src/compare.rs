//! Deep structural equality that reports the first mismatching field.
//!
//! Fields are compared in a fixed order and comparison stops at the first
//! difference. The result names the field path down to the offending leaf:
//!
//! ```
//! use ds_model::{compare_datasets, DataFormat, Dataset, Structure};
//!
//! let a = Dataset {
//!     structure: Some(Structure { format: DataFormat::Csv, ..Default::default() }),
//!     ..Default::default()
//! };
//! let b = Dataset {
//!     structure: Some(Structure { format: DataFormat::Json, ..Default::default() }),
//!     ..Default::default()
//! };
//! let err = compare_datasets(Some(&a), Some(&b)).unwrap_err();
//! assert_eq!(err.to_string(), "Structure: Format: csv != json");
//! ```

use std::fmt;

use serde::Serialize;

use ds_types::Kind;

use crate::commit::Commit;
use crate::dataset::Dataset;
use crate::meta::{License, Meta};
use crate::stats::Stats;
use crate::structure::Structure;
use crate::transform::{Transform, TransformResource};
use crate::viz::Viz;

/// The first difference found between two documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    /// Field names from the outermost document down to the differing leaf.
    pub field: Vec<String>,
    pub detail: String,
}

impl Mismatch {
    fn new(field: &str, detail: impl Into<String>) -> Self {
        Self {
            field: vec![field.to_string()],
            detail: detail.into(),
        }
    }

    fn leaf(detail: impl Into<String>) -> Self {
        Self {
            field: Vec::new(),
            detail: detail.into(),
        }
    }

    fn within(mut self, field: impl Into<String>) -> Self {
        self.field.insert(0, field.into());
        self
    }

    /// Returns `true` if one side was absent and the other present.
    pub fn is_nil_mismatch(&self) -> bool {
        self.detail.starts_with("nil mismatch")
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in &self.field {
            write!(f, "{field}: ")?;
        }
        f.write_str(&self.detail)
    }
}

impl std::error::Error for Mismatch {}

/// Comparison options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Comparator {
    ignore_paths: bool,
}

impl Comparator {
    /// Compare every field, including content paths.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Skip path fields, so abstract and concrete forms of the same document
    /// can be compared.
    pub fn ignoring_paths() -> Self {
        Self { ignore_paths: true }
    }

    pub fn compare<T: Compare>(&self, a: Option<&T>, b: Option<&T>) -> Result<(), Mismatch> {
        compare_option(a, b, self)
    }

    fn path(&self, name: &str, a: &str, b: &str) -> Result<(), Mismatch> {
        if self.ignore_paths {
            return Ok(());
        }
        field(name, a, b)
    }
}

/// A document that can be compared field by field.
pub trait Compare {
    fn compare_to(&self, other: &Self, cmp: &Comparator) -> Result<(), Mismatch>;
}

/// Compare two optional values: absent on both sides is equal, absent on
/// one side is a nil mismatch.
pub fn compare_option<T: Compare>(
    a: Option<&T>,
    b: Option<&T>,
    cmp: &Comparator,
) -> Result<(), Mismatch> {
    match (a, b) {
        (None, None) => Ok(()),
        (None, Some(_)) => Err(Mismatch::leaf("nil mismatch: <nil> != <not nil>")),
        (Some(_), None) => Err(Mismatch::leaf("nil mismatch: <not nil> != <nil>")),
        (Some(a), Some(b)) => a.compare_to(b, cmp),
    }
}

/// Strictly compare two datasets.
pub fn compare_datasets(a: Option<&Dataset>, b: Option<&Dataset>) -> Result<(), Mismatch> {
    Comparator::strict().compare(a, b)
}

fn field<T: PartialEq + fmt::Display + ?Sized>(name: &str, a: &T, b: &T) -> Result<(), Mismatch> {
    if a == b {
        Ok(())
    } else {
        Err(Mismatch::new(name, format!("{a} != {b}")))
    }
}

fn kind(a: Option<Kind>, b: Option<Kind>) -> Result<(), Mismatch> {
    field("Qri", a.map_or("", |k| k.as_str()), b.map_or("", |k| k.as_str()))
}

fn sub<T: Compare>(
    name: &str,
    a: Option<&T>,
    b: Option<&T>,
    cmp: &Comparator,
) -> Result<(), Mismatch> {
    compare_option(a, b, cmp).map_err(|m| m.within(name))
}

fn bytes(name: &str, a: &[u8], b: &[u8]) -> Result<(), Mismatch> {
    if a.len() != b.len() {
        return Err(Mismatch::new(name, format!("length: {} != {}", a.len(), b.len())));
    }
    match a.iter().zip(b).position(|(x, y)| x != y) {
        Some(i) => Err(Mismatch::new(name, format!("byte {i}: {} != {}", a[i], b[i]))),
        None => Ok(()),
    }
}

fn strings(name: &str, a: &[String], b: &[String]) -> Result<(), Mismatch> {
    if a.len() != b.len() {
        return Err(Mismatch::new(name, format!("length: {} != {}", a.len(), b.len())));
    }
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        if x != y {
            return Err(Mismatch::new(name, format!("element {i}: {x} != {y}")));
        }
    }
    Ok(())
}

/// Free-form values compare by their canonical JSON bytes.
fn canonical<T: Serialize>(name: &str, a: Option<&T>, b: Option<&T>) -> Result<(), Mismatch> {
    let (a, b) = match (a, b) {
        (None, None) => return Ok(()),
        (None, Some(_)) => return Err(Mismatch::new(name, "nil mismatch: <nil> != <not nil>")),
        (Some(_), None) => return Err(Mismatch::new(name, "nil mismatch: <not nil> != <nil>")),
        (Some(a), Some(b)) => (a, b),
    };
    let encode = |v: &T| {
        serde_json::to_vec(v).map_err(|e| Mismatch::new(name, format!("encoding to JSON: {e}")))
    };
    if encode(a)? != encode(b)? {
        return Err(Mismatch::new(name, "json bytes are not equal"));
    }
    Ok(())
}

impl Compare for Dataset {
    fn compare_to(&self, other: &Self, cmp: &Comparator) -> Result<(), Mismatch> {
        cmp.path("Path", &self.path, &other.path)?;
        bytes("BodyBytes", &self.body_bytes, &other.body_bytes)?;
        cmp.path("BodyPath", &self.body_path, &other.body_path)?;
        sub("Commit", self.commit.as_ref(), other.commit.as_ref(), cmp)?;
        sub("Meta", self.meta.as_ref(), other.meta.as_ref(), cmp)?;
        field("Name", &self.name, &other.name)?;
        field("Peername", &self.peername, &other.peername)?;
        cmp.path("PreviousPath", &self.previous_path, &other.previous_path)?;
        field("ProfileID", &self.profile_id, &other.profile_id)?;
        kind(self.qri, other.qri)?;
        sub(
            "AbstractStructure",
            self.abstract_structure.as_ref(),
            other.abstract_structure.as_ref(),
            cmp,
        )?;
        sub("Structure", self.structure.as_ref(), other.structure.as_ref(), cmp)?;
        sub("Transform", self.transform.as_ref(), other.transform.as_ref(), cmp)?;
        sub("Stats", self.stats.as_ref(), other.stats.as_ref(), cmp)?;
        sub("Viz", self.viz.as_ref(), other.viz.as_ref(), cmp)
    }
}

impl Compare for Structure {
    fn compare_to(&self, other: &Self, _cmp: &Comparator) -> Result<(), Mismatch> {
        kind(self.qri, other.qri)?;
        field("Format", &self.format, &other.format)?;
        field("Length", &self.length, &other.length)?;
        field("Checksum", &self.checksum, &other.checksum)?;
        field("Depth", &self.depth, &other.depth)?;
        field("Entries", &self.entries, &other.entries)?;
        field("ErrCount", &self.err_count, &other.err_count)?;
        field("Encoding", &self.encoding, &other.encoding)?;
        field("Compression", &self.compression, &other.compression)?;
        field("Strict", &self.strict, &other.strict)?;
        canonical("FormatConfig", self.format_config.as_ref(), other.format_config.as_ref())?;
        canonical("Schema", self.schema.as_ref(), other.schema.as_ref())
    }
}

impl Compare for Meta {
    fn compare_to(&self, other: &Self, cmp: &Comparator) -> Result<(), Mismatch> {
        kind(self.qri, other.qri)?;
        field("Title", &self.title, &other.title)?;
        field("AccessURL", &self.access_url, &other.access_url)?;
        field("DownloadURL", &self.download_url, &other.download_url)?;
        field("AccrualPeriodicity", &self.accrual_periodicity, &other.accrual_periodicity)?;
        field("ReadmeURL", &self.readme_url, &other.readme_url)?;
        field("Description", &self.description, &other.description)?;
        field("HomeURL", &self.home_url, &other.home_url)?;
        field("Identifier", &self.identifier, &other.identifier)?;
        sub("License", self.license.as_ref(), other.license.as_ref(), cmp)?;
        field("Version", &self.version, &other.version)?;
        strings("Keywords", &self.keywords, &other.keywords)?;
        strings("Language", &self.language, &other.language)?;
        strings("Theme", &self.theme, &other.theme)
    }
}

impl Compare for License {
    fn compare_to(&self, other: &Self, _cmp: &Comparator) -> Result<(), Mismatch> {
        field("Type", &self.kind, &other.kind)?;
        field("URL", &self.url, &other.url)
    }
}

impl Compare for Commit {
    fn compare_to(&self, other: &Self, _cmp: &Comparator) -> Result<(), Mismatch> {
        kind(self.qri, other.qri)?;
        field("Title", &self.title, &other.title)?;
        // Same instant in different zones is equal.
        if self.timestamp != other.timestamp {
            return Err(Mismatch::new(
                "Timestamp",
                format!("{} != {}", self.utc_timestamp(), other.utc_timestamp()),
            ));
        }
        field("Signature", &self.signature, &other.signature)?;
        field("Message", &self.message, &other.message)
    }
}

impl Compare for Transform {
    fn compare_to(&self, other: &Self, cmp: &Comparator) -> Result<(), Mismatch> {
        kind(self.qri, other.qri)?;
        field("Syntax", &self.syntax, &other.syntax)?;
        field("SyntaxVersion", &self.syntax_version, &other.syntax_version)?;
        cmp.path("ScriptPath", &self.script_path, &other.script_path)?;
        bytes("ScriptBytes", &self.script_bytes, &other.script_bytes)?;
        canonical("Config", self.config.as_ref(), other.config.as_ref())?;

        let (a, b) = match (&self.resources, &other.resources) {
            (None, None) => return Ok(()),
            (None, Some(_)) => {
                return Err(Mismatch::new("Resources", "nil mismatch: <nil> != <not nil>"))
            }
            (Some(_), None) => {
                return Err(Mismatch::new("Resources", "nil mismatch: <not nil> != <nil>"))
            }
            (Some(a), Some(b)) => (a, b),
        };
        if a.len() != b.len() {
            return Err(Mismatch::new("Resources", format!("length: {} != {}", a.len(), b.len())));
        }
        for (name, ra) in a {
            compare_option(Some(ra), b.get(name), cmp)
                .map_err(|m| m.within(format!("Resource '{name}'")))?;
        }
        Ok(())
    }
}

impl Compare for TransformResource {
    fn compare_to(&self, other: &Self, cmp: &Comparator) -> Result<(), Mismatch> {
        cmp.path("Path", self.path(), other.path())?;
        match (self.dataset(), other.dataset()) {
            (Some(a), Some(b)) => a.compare_to(b, cmp),
            _ => Ok(()),
        }
    }
}

impl Compare for Viz {
    fn compare_to(&self, other: &Self, cmp: &Comparator) -> Result<(), Mismatch> {
        kind(self.qri, other.qri)?;
        field("Format", &self.format, &other.format)?;
        cmp.path("ScriptPath", &self.script_path, &other.script_path)?;
        cmp.path("RenderedPath", &self.rendered_path, &other.rendered_path)?;
        bytes("ScriptBytes", &self.script_bytes, &other.script_bytes)
    }
}

impl Compare for Stats {
    fn compare_to(&self, other: &Self, _cmp: &Comparator) -> Result<(), Mismatch> {
        kind(self.qri, other.qri)?;
        canonical("Stats", self.stats.as_ref(), other.stats.as_ref())
    }
}
