use ds_model::Viz;
use ds_store::{ContentKey, Store};

use crate::document::{load_document, put_bytes, put_document};
use crate::error::{FsError, FsResult};
use crate::package::PackageFile;

/// Store a viz, splitting inline script bytes into their own file.
pub fn save_viz<S: Store + ?Sized>(store: &S, viz: &Viz) -> FsResult<ContentKey> {
    store_viz(store, viz).map(|(key, _)| key)
}

pub(crate) fn store_viz<S: Store + ?Sized>(
    store: &S,
    viz: &Viz,
) -> FsResult<(ContentKey, Option<ContentKey>)> {
    let mut viz = viz.clone();
    let script = if viz.script_bytes.is_empty() {
        None
    } else {
        let key = put_bytes(store, PackageFile::VizScript, &viz.script_bytes)?;
        viz.script_path = key.to_string();
        viz.script_bytes.clear();
        Some(key)
    };
    let key = put_document(store, PackageFile::Viz, &viz)?;
    Ok((key, script))
}

pub fn load_viz<S: Store + ?Sized>(store: &S, key: &ContentKey) -> FsResult<Viz> {
    load_document(store, "viz", key)
}

/// Fetch the script file stored at `path`.
pub fn load_script<S: Store + ?Sized>(store: &S, path: &str) -> FsResult<Vec<u8>> {
    let key = ContentKey::new(path);
    store.get(&key).map_err(|source| FsError::Fetch {
        field: "script",
        key,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_store::MemStore;

    #[test]
    fn script_is_stored_separately() {
        let store = MemStore::new();
        let viz = Viz {
            format: "html".into(),
            script_bytes: b"<html>{{ .title }}</html>".to_vec(),
            ..Default::default()
        };
        let key = save_viz(&store, &viz).unwrap();
        assert_eq!(store.len(), 2);

        let loaded = load_viz(&store, &key).unwrap();
        assert_eq!(loaded.format, "html");
        assert!(loaded.script_bytes.is_empty());
        let script = load_script(&store, &loaded.script_path).unwrap();
        assert_eq!(script, viz.script_bytes);

        let stored = String::from_utf8(store.get(&key).unwrap()).unwrap();
        assert!(!stored.contains("<html>"), "{stored}");
    }

    #[test]
    fn identical_scripts_share_a_blob() {
        let store = MemStore::new();
        let a = Viz {
            format: "html".into(),
            script_bytes: b"same".to_vec(),
            ..Default::default()
        };
        let b = Viz {
            format: "svg".into(),
            ..a.clone()
        };
        save_viz(&store, &a).unwrap();
        save_viz(&store, &b).unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn missing_script_names_key() {
        let store = MemStore::new();
        let err = load_script(&store, "/mem/nothing").unwrap_err();
        assert!(matches!(err, FsError::Fetch { field: "script", .. }));
        assert!(err.to_string().contains("/mem/nothing"));
    }
}
