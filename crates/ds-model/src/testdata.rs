//! Dataset test cases read from directories of static files.
//!
//! A case directory may hold an input dataset, an expected dataset and one
//! body file named `data.<format>`:
//!
//! ```text
//! cities/
//!   input.dataset.json
//!   expect.dataset.json
//!   data.json
//! ```
//!
//! The body file is required. Both dataset files are optional.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ds_types::DataFormat;

use crate::dataset::Dataset;
use crate::error::ModelError;

/// File holding the dataset a test starts from.
pub const INPUT_DATASET_FILENAME: &str = "input.dataset.json";
/// File holding the dataset a test should produce.
pub const EXPECT_DATASET_FILENAME: &str = "expect.dataset.json";

/// Errors from reading a test case directory.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("reading {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("decoding {}: {source}", path.display())]
    Dataset { path: PathBuf, source: ModelError },

    /// None of the `data.<format>` files exist.
    #[error("no data file in {}", .0.display())]
    NoData(PathBuf),
}

/// One test case built from a directory.
#[derive(Clone, Debug)]
pub struct TestCase {
    /// Directory name of the case.
    pub name: String,
    /// Name of the body file, such as `data.json`.
    pub data_filename: String,
    /// Body bytes, in the format named by the file extension.
    pub data: Vec<u8>,
    pub input: Option<Dataset>,
    pub expect: Option<Dataset>,
}

impl TestCase {
    /// Read a case from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let dir = dir.as_ref();
        let (data, data_filename) = read_input_data(dir)?;
        Ok(Self {
            name: dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            data_filename,
            data,
            input: read_dataset(dir, INPUT_DATASET_FILENAME)?,
            expect: read_dataset(dir, EXPECT_DATASET_FILENAME)?,
        })
    }

    /// The body format implied by the data file's extension.
    pub fn data_format(&self) -> DataFormat {
        self.data_filename
            .rsplit_once('.')
            .and_then(|(_, ext)| ext.parse().ok())
            .unwrap_or_default()
    }
}

/// Read `dir/filename` as a dataset. A missing file is `None`.
pub fn read_dataset(dir: &Path, filename: &str) -> Result<Option<Dataset>, FixtureError> {
    let path = dir.join(filename);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(FixtureError::Io { path, source }),
    };
    Dataset::from_json(&bytes)
        .map(Some)
        .map_err(|source| FixtureError::Dataset { path, source })
}

/// Read the first `data.<format>` file found in `dir`, returning its bytes
/// and file name.
pub fn read_input_data(dir: &Path) -> Result<(Vec<u8>, String), FixtureError> {
    for format in DataFormat::SUPPORTED {
        let filename = format!("data.{format}");
        let path = dir.join(&filename);
        match fs::read(&path) {
            Ok(data) => return Ok((data, filename)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(source) => return Err(FixtureError::Io { path, source }),
        }
    }
    Err(FixtureError::NoData(dir.to_path_buf()))
}
