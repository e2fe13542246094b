use ds_model::{Document, Transform, TransformResource};
use ds_store::{ContentKey, Store};
use tracing::debug;

use crate::config::SaveOptions;
use crate::dataset::{load_dataset, save_dataset};
use crate::document::{load_document, put_bytes, put_document};
use crate::error::{FsError, FsResult};
use crate::package::PackageFile;

/// Store a transform in its concrete form.
///
/// Inline resource datasets are saved with `opts` and replaced by
/// references to their keys. Script bytes are stored as a separate file.
pub fn save_transform<S: Store + ?Sized>(
    store: &S,
    tf: &Transform,
    opts: &SaveOptions,
) -> FsResult<ContentKey> {
    store_transform(store, tf, opts).map(|(key, _)| key)
}

/// Store the abstract form of a transform.
///
/// Resource identities are blanked and inline resources are kept inline in
/// their abstract form, so nothing but the transform and its script is
/// written.
pub fn save_abstract_transform<S: Store + ?Sized>(
    store: &S,
    tf: &Transform,
) -> FsResult<ContentKey> {
    let mut tf = tf.to_abstract();
    split_script(store, &mut tf)?;
    put_document(store, PackageFile::AbstractTransform, &tf)
}

pub(crate) fn store_transform<S: Store + ?Sized>(
    store: &S,
    tf: &Transform,
    opts: &SaveOptions,
) -> FsResult<(ContentKey, Option<ContentKey>)> {
    let mut tf = tf.clone();
    let script = split_script(store, &mut tf)?;
    for (name, resource) in tf.resources.iter_mut().flatten() {
        if let TransformResource::Inline(ds) = resource {
            let path = if ds.is_reference() {
                ds.path.clone()
            } else {
                let saved = save_dataset(store, ds, opts).map_err(|e| FsError::Resource {
                    name: name.clone(),
                    source: Box::new(e),
                })?;
                debug!(resource = %name, key = %saved.key, "saved inline resource");
                saved.key.to_string()
            };
            *resource = TransformResource::Reference(path);
        }
    }
    let key = put_document(store, PackageFile::Transform, &tf)?;
    Ok((key, script))
}

fn split_script<S: Store + ?Sized>(store: &S, tf: &mut Transform) -> FsResult<Option<ContentKey>> {
    if tf.script_bytes.is_empty() {
        return Ok(None);
    }
    let key = put_bytes(store, PackageFile::TransformScript, &tf.script_bytes)?;
    tf.script_path = key.to_string();
    tf.script_bytes.clear();
    Ok(Some(key))
}

/// Load a transform and resolve its resource references.
///
/// Reference entries are fetched and decoded as datasets; inline entries
/// are kept as they are. Blank references (from abstract transforms) stay
/// blank.
pub fn load_transform<S: Store + ?Sized>(store: &S, key: &ContentKey) -> FsResult<Transform> {
    let mut tf: Transform = load_document(store, "transform", key)?;
    resolve_resources(store, &mut tf)?;
    Ok(tf)
}

pub(crate) fn resolve_resources<S: Store + ?Sized>(store: &S, tf: &mut Transform) -> FsResult<()> {
    for (name, resource) in tf.resources.iter_mut().flatten() {
        let TransformResource::Reference(path) = resource else {
            continue;
        };
        if path.is_empty() {
            continue;
        }
        let ds = load_dataset(store, &ContentKey::new(path.as_str())).map_err(|e| {
            FsError::Resource {
                name: name.clone(),
                source: Box::new(e),
            }
        })?;
        *resource = TransformResource::Inline(Box::new(ds));
    }
    Ok(())
}
