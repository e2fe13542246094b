//! Validation of dataset bodies against their structure's schema.
//!
//! Bodies are streamed through an [`ds_io::EntryReader`], buffered as plain
//! JSON, and handed to a [`SchemaValidator`]. Violations are returned as
//! data; only failures to read or compile produce an error.

pub mod error;
pub mod schema;
pub mod validate;

pub use error::{ValidateError, ValidateResult};
pub use schema::{JsonSchema, SchemaValidator, ValidationFault};
pub use validate::{validate_entries, validate_structure_entries};
