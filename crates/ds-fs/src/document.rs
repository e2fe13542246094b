use tracing::{debug, trace};

use ds_model::{decode_document, encode_document, Document};
use ds_store::{ContentKey, Store};

use crate::error::{FsError, FsResult};
use crate::package::PackageFile;

/// Store raw bytes under the canonical filename of `file`.
pub(crate) fn put_bytes<S: Store + ?Sized>(
    store: &S,
    file: PackageFile,
    data: &[u8],
) -> FsResult<ContentKey> {
    let key = store.put(file.filename(), data)?;
    debug!(file = file.filename(), %key, size = data.len(), "saved component");
    Ok(key)
}

/// Canonically encode and store a document.
///
/// The stored copy never carries a path and always carries its kind tag, so
/// equal documents produce equal bytes and equal keys.
pub(crate) fn put_document<S: Store + ?Sized, T: Document>(
    store: &S,
    file: PackageFile,
    doc: &T,
) -> FsResult<ContentKey> {
    let mut doc = doc.clone();
    doc.set_path(String::new());
    doc.set_kind(Some(T::KIND));
    let bytes = encode_document(&doc)?;
    put_bytes(store, file, &bytes)
}

/// Fetch and decode the document stored under `key`, naming `field` in
/// any fault.
pub(crate) fn load_document<S: Store + ?Sized, T: Document>(
    store: &S,
    field: &'static str,
    key: &ContentKey,
) -> FsResult<T> {
    let data = store.get(key).map_err(|source| FsError::Fetch {
        field,
        key: key.clone(),
        source,
    })?;
    let mut doc: T = decode_document(&data).map_err(|source| FsError::Decode {
        field,
        key: key.clone(),
        source,
    })?;
    doc.set_path(key.to_string());
    trace!(field, %key, "loaded component");
    Ok(doc)
}

/// Replace a reference-only document with the document it points at.
pub(crate) fn resolve<S: Store + ?Sized, T: Document>(
    store: &S,
    field: &'static str,
    doc: Option<T>,
) -> FsResult<Option<T>> {
    match doc {
        Some(doc) if doc.is_reference() => {
            load_document(store, field, &ContentKey::new(doc.path())).map(Some)
        }
        other => Ok(other),
    }
}
