//! Foundation types for dataset documents.
//!
//! Every other crate in the workspace depends on `ds-types`. It holds the
//! small value types that documents, stores and streams agree on.
//!
//! # Key Types
//!
//! - [`Address`] — hierarchical namespace path (`user.dataset.table`)
//! - [`Kind`] — per-document identity/version tag (`ds:0`, `st:0`, ...)
//! - [`DataFormat`] — physical encoding of a dataset body
//! - [`Compression`] — byte-level compression beneath a body format

pub mod address;
pub mod error;
pub mod format;
pub mod kind;

pub use address::{is_valid_address_string, Address};
pub use error::TypeError;
pub use format::{Compression, DataFormat};
pub use kind::Kind;
