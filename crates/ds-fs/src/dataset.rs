use std::collections::BTreeMap;

use ds_model::{Dataset, Document, Kind, Structure, Transform, Viz};
use ds_store::{ContentKey, Store};
use ds_types::Address;
use tracing::debug;

use crate::commit::save_commit;
use crate::config::SaveOptions;
use crate::document::{load_document, put_bytes, put_document, resolve};
use crate::error::FsResult;
use crate::package::PackageFile;
use crate::structure::{save_abstract_structure, save_structure};
use crate::transform::{load_transform, resolve_resources, save_abstract_transform, store_transform};
use crate::viz::store_viz;

/// The result of saving a dataset: the root key and the key of every
/// component written for it, by mount address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedPackage {
    pub key: ContentKey,
    pub components: BTreeMap<Address, ContentKey>,
}

impl SavedPackage {
    /// Key of the component mounted for `file`, if one was written.
    pub fn component(&self, file: PackageFile) -> Option<&ContentKey> {
        self.components.get(&file.mount())
    }
}

/// Decompose a dataset into independently stored sub-documents.
///
/// Structure, abstract structure, commit, transform and viz are stored on
/// their own and replaced by references in the root document. Meta and
/// stats stay inline. Sub-documents that are already references are kept.
pub fn save_dataset<S: Store + ?Sized>(
    store: &S,
    ds: &Dataset,
    opts: &SaveOptions,
) -> FsResult<SavedPackage> {
    let mut ds = ds.clone();
    let mut components = BTreeMap::new();

    if !ds.body_bytes.is_empty() {
        if opts.pin_body {
            let key = put_bytes(store, PackageFile::Body, &ds.body_bytes)?;
            ds.body_path = key.to_string();
            components.insert(PackageFile::Body.mount(), key);
        }
        ds.body_bytes.clear();
    }

    split(&mut ds.abstract_structure, PackageFile::AbstractStructure, &mut components, |st| {
        save_abstract_structure(store, st)
    })?;
    if opts.store_abstract && ds.abstract_structure.is_none() {
        if let Some(st) = ds.structure.as_ref().filter(|st| !st.is_reference()) {
            let key = save_abstract_structure(store, st)?;
            components.insert(PackageFile::AbstractStructure.mount(), key.clone());
            ds.abstract_structure = Some(Structure::reference(key));
        }
    }
    split(&mut ds.structure, PackageFile::Structure, &mut components, |st| {
        save_structure(store, st)
    })?;

    split(&mut ds.commit, PackageFile::Commit, &mut components, |cm| {
        save_commit(store, cm)
    })?;

    if opts.store_abstract {
        if let Some(tf) = ds.transform.as_ref().filter(|tf| !tf.is_reference()) {
            let key = save_abstract_transform(store, tf)?;
            components.insert(PackageFile::AbstractTransform.mount(), key);
        }
    }
    split(&mut ds.transform, PackageFile::Transform, &mut components, |tf: &Transform| {
        let (key, script) = store_transform(store, tf, opts)?;
        Ok((key, script.map(|s| (PackageFile::TransformScript, s))))
    })?;

    split(&mut ds.viz, PackageFile::Viz, &mut components, |vz: &Viz| {
        let (key, script) = store_viz(store, vz)?;
        Ok((key, script.map(|s| (PackageFile::VizScript, s))))
    })?;

    ds.path.clear();
    ds.qri = Some(Kind::Dataset);
    let key = put_document(store, PackageFile::Dataset, &ds)?;
    components.insert(PackageFile::Dataset.mount(), key.clone());
    debug!(%key, components = components.len(), "saved dataset");
    Ok(SavedPackage { key, components })
}

/// What a component save returns: its key, or its key plus an extra file
/// written alongside it.
trait Saved {
    fn into_parts(self) -> (ContentKey, Option<(PackageFile, ContentKey)>);
}

impl Saved for ContentKey {
    fn into_parts(self) -> (ContentKey, Option<(PackageFile, ContentKey)>) {
        (self, None)
    }
}

impl Saved for (ContentKey, Option<(PackageFile, ContentKey)>) {
    fn into_parts(self) -> (ContentKey, Option<(PackageFile, ContentKey)>) {
        self
    }
}

/// Save a non-reference sub-document and replace it with a reference.
fn split<T, R, F>(
    slot: &mut Option<T>,
    file: PackageFile,
    components: &mut BTreeMap<Address, ContentKey>,
    save: F,
) -> FsResult<()>
where
    T: Document,
    R: Saved,
    F: FnOnce(&T) -> FsResult<R>,
{
    let Some(doc) = slot.as_ref().filter(|doc| !doc.is_reference()) else {
        return Ok(());
    };
    let (key, extra) = save(doc)?.into_parts();
    if let Some((extra_file, extra_key)) = extra {
        components.insert(extra_file.mount(), extra_key);
    }
    components.insert(file.mount(), key.clone());
    *slot = Some(T::reference(key));
    Ok(())
}

/// Load a dataset and resolve every reference below it.
pub fn load_dataset<S: Store + ?Sized>(store: &S, key: &ContentKey) -> FsResult<Dataset> {
    let mut ds: Dataset = load_document(store, "dataset", key)?;
    ds.abstract_structure = resolve(store, "abstract_structure", ds.abstract_structure.take())?;
    ds.structure = resolve(store, "structure", ds.structure.take())?;
    ds.commit = resolve(store, "commit", ds.commit.take())?;
    ds.meta = resolve(store, "meta", ds.meta.take())?;
    ds.stats = resolve(store, "stats", ds.stats.take())?;
    ds.viz = resolve(store, "viz", ds.viz.take())?;
    ds.transform = match ds.transform.take() {
        Some(tf) if tf.is_reference() => Some(load_transform(store, &ContentKey::new(tf.path))?),
        Some(mut tf) => {
            resolve_resources(store, &mut tf)?;
            Some(tf)
        }
        None => None,
    };
    Ok(ds)
}
