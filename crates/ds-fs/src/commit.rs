use ds_model::Commit;
use ds_store::{ContentKey, Store};

use crate::document::{load_document, put_document};
use crate::error::FsResult;
use crate::package::PackageFile;

pub fn save_commit<S: Store + ?Sized>(store: &S, commit: &Commit) -> FsResult<ContentKey> {
    put_document(store, PackageFile::Commit, commit)
}

pub fn load_commit<S: Store + ?Sized>(store: &S, key: &ContentKey) -> FsResult<Commit> {
    load_document(store, "commit", key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FsError;
    use chrono::{FixedOffset, TimeZone};
    use ds_model::{Kind, ModelError};
    use ds_store::MemStore;

    #[test]
    fn round_trip_keeps_instant() {
        let store = MemStore::new();
        let toronto = FixedOffset::west_opt(5 * 3600).unwrap();
        let commit = Commit {
            title: "initial commit".into(),
            message: "hello".into(),
            timestamp: toronto.with_ymd_and_hms(2001, 1, 1, 1, 1, 1).unwrap(),
            ..Default::default()
        };
        let key = save_commit(&store, &commit).unwrap();
        let loaded = load_commit(&store, &key).unwrap();
        assert_eq!(loaded.title, "initial commit");
        assert_eq!(loaded.timestamp, commit.timestamp);
        assert_eq!(loaded.utc_timestamp(), "2001-01-01T06:01:01Z");
        assert_eq!(loaded.qri, Some(Kind::Commit));
    }

    #[test]
    fn wrong_kind_names_commit() {
        let store = MemStore::new();
        let key = store.put("commit.json", br#"{"qri":"st:0"}"#).unwrap();
        let err = load_commit(&store, &key).unwrap_err();
        assert!(matches!(
            err,
            FsError::Decode {
                field: "commit",
                source: ModelError::KindMismatch { expected: Kind::Commit, .. },
                ..
            }
        ));
        assert!(err.to_string().contains("invalid commit 'qri' value"), "{err}");
    }
}
