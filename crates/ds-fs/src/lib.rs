//! Content-addressed persistence for datasets.
//!
//! A [`Dataset`](ds_model::Dataset) is split into sub-documents that are
//! likely to be shared between datasets (structure, abstract structure,
//! commit, transform, viz and script files). Each is serialized canonically
//! and stored on its own; the root `dataset.json` holds only their keys, so
//! two datasets with byte-identical sub-documents share one stored blob.
//!
//! Loading resolves the root key and then every reference below it. Load
//! faults name the field or transform resource that could not be resolved.

pub mod commit;
pub mod config;
pub mod dataset;
pub mod error;
pub mod package;
pub mod structure;
pub mod transform;
pub mod viz;

mod document;

pub use commit::{load_commit, save_commit};
pub use config::SaveOptions;
pub use dataset::{load_dataset, save_dataset, SavedPackage};
pub use error::{FsError, FsResult};
pub use package::PackageFile;
pub use structure::{load_structure, save_abstract_structure, save_structure};
pub use transform::{load_transform, save_abstract_transform, save_transform};
pub use viz::{load_script, load_viz, save_viz};
