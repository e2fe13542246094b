//! Content-addressable blob storage for dataset documents.
//!
//! Every stored blob is identified by a [`ContentKey`] derived from the
//! BLAKE3 hash of its bytes. The store never interprets blob contents.
//!
//! # Backends
//!
//! All backends implement the [`Store`] trait:
//!
//! - [`MemStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Rules
//!
//! 1. Blobs are immutable once written.
//! 2. Putting identical bytes twice yields the same key and one stored blob.
//! 3. The name given to `put` is recorded as metadata and never hashed.

pub mod error;
pub mod key;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use key::ContentKey;
pub use memory::MemStore;
pub use traits::Store;
