use ds_model::Structure;
use ds_store::{ContentKey, Store};

use crate::document::{load_document, put_document};
use crate::error::FsResult;
use crate::package::PackageFile;

/// Store a structure in its concrete form.
pub fn save_structure<S: Store + ?Sized>(store: &S, st: &Structure) -> FsResult<ContentKey> {
    put_document(store, PackageFile::Structure, st)
}

/// Store the abstract form of a structure.
///
/// Structures that differ only in checksum, length, entry count or other
/// body-dependent fields share one abstract key.
pub fn save_abstract_structure<S: Store + ?Sized>(
    store: &S,
    st: &Structure,
) -> FsResult<ContentKey> {
    put_document(store, PackageFile::AbstractStructure, &st.to_abstract())
}

pub fn load_structure<S: Store + ?Sized>(store: &S, key: &ContentKey) -> FsResult<Structure> {
    load_document(store, "structure", key)
}
