//! The fixed set of files a stored dataset package is made of.

use std::fmt;

use ds_types::Address;

/// One kind of file in a dataset package.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PackageFile {
    Dataset,
    Structure,
    AbstractStructure,
    Commit,
    Transform,
    AbstractTransform,
    TransformScript,
    Viz,
    VizScript,
    Body,
}

/// Filename and mount point of every package file.
static TABLE: [(PackageFile, &str, &[&str]); 10] = [
    (PackageFile::Dataset, "dataset.json", &["dataset"]),
    (PackageFile::Structure, "structure.json", &["dataset", "structure"]),
    (
        PackageFile::AbstractStructure,
        "abstract_structure.json",
        &["dataset", "abstract_structure"],
    ),
    (PackageFile::Commit, "commit.json", &["dataset", "commit"]),
    (PackageFile::Transform, "transform.json", &["dataset", "transform"]),
    (
        PackageFile::AbstractTransform,
        "abstract_transform.json",
        &["dataset", "abstract_transform"],
    ),
    (
        PackageFile::TransformScript,
        "transform_script",
        &["dataset", "transform", "script"],
    ),
    (PackageFile::Viz, "viz.json", &["dataset", "viz"]),
    (PackageFile::VizScript, "viz_script", &["dataset", "viz", "script"]),
    (PackageFile::Body, "body", &["dataset", "body"]),
];

impl PackageFile {
    /// Every package file, in table order.
    pub const ALL: [PackageFile; 10] = [
        PackageFile::Dataset,
        PackageFile::Structure,
        PackageFile::AbstractStructure,
        PackageFile::Commit,
        PackageFile::Transform,
        PackageFile::AbstractTransform,
        PackageFile::TransformScript,
        PackageFile::Viz,
        PackageFile::VizScript,
        PackageFile::Body,
    ];

    fn entry(self) -> &'static (PackageFile, &'static str, &'static [&'static str]) {
        // The table is ordered like the enum.
        &TABLE[self as usize]
    }

    /// Canonical filename, used as the store name on `put`.
    pub fn filename(self) -> &'static str {
        self.entry().1
    }

    /// Where this file is mounted in the package namespace.
    pub fn mount(self) -> Address {
        Address::new(self.entry().2)
    }

    /// Look up a package file by its canonical filename.
    pub fn from_filename(name: &str) -> Option<PackageFile> {
        TABLE.iter().find(|(_, f, _)| *f == name).map(|(p, _, _)| *p)
    }
}

impl fmt::Display for PackageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.filename())
    }
}
