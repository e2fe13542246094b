//! Dataset document model.
//!
//! A [`Dataset`] is the root aggregate: body references plus optional
//! sub-documents describing its [`Structure`], [`Meta`]data, [`Commit`],
//! [`Transform`], [`Viz`] and [`Stats`]. Every sub-document implements
//! [`Document`], which gives it a kind tag, a content path and the
//! "bare string is a reference" wire convention.
//!
//! # Operations
//!
//! - `assign` — merge a later document into an earlier one
//! - `to_abstract` — strip data- and environment-dependent fields
//! - [`Comparator`] — deep structural equality reporting the first mismatch
//! - [`Dataset::signable_bytes`] — canonical bytes identifying a commit

pub mod commit;
pub mod compare;
pub mod dataset;
pub mod document;
pub mod error;
pub mod meta;
pub mod stats;
pub mod structure;
#[cfg(any(test, feature = "test-support"))]
pub mod testdata;
pub mod transform;
pub mod viz;

pub use commit::Commit;
pub use compare::{compare_datasets, Compare, Comparator, Mismatch};
pub use dataset::Dataset;
pub use document::{decode_document, encode_document, Document};
pub use error::{ModelError, ModelResult};
pub use meta::{License, Meta};
pub use stats::Stats;
pub use structure::Structure;
pub use transform::{Transform, TransformResource};
pub use viz::Viz;

pub use ds_types::{Address, Compression, DataFormat, Kind};
