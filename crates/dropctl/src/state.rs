use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dropctl_infra::types::{DropletId, SnapshotId};

use crate::error::Error;

/// The single durable record: the most recent snapshot taken by `destroy`.
/// Overwritten on every successful snapshot; no history is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub snapshot_id: SnapshotId,
    pub droplet_id: DropletId,
    pub saved_at: DateTime<Utc>,
}

/// File-backed store for the last-known snapshot record.
///
/// The path is injected so tests can point it at a temp directory.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the record, or `None` if nothing has been saved yet.
    pub fn load(&self) -> Result<Option<SnapshotRecord>, Error> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the record, replacing any previous one.
    pub fn save(&self, record: &SnapshotRecord) -> Result<(), Error> {
        let raw = serde_json::to_string_pretty(record)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(snapshot: &str, droplet: u64) -> SnapshotRecord {
        SnapshotRecord {
            snapshot_id: SnapshotId(snapshot.into()),
            droplet_id: DropletId(droplet),
            saved_at: Utc::now(),
        }
    }

    #[test]
    fn load_missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshot_id.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshot_id.json"));

        let rec = record("123456", 42);
        store.save(&rec).unwrap();

        assert_eq!(store.load().unwrap(), Some(rec));
    }

    #[test]
    fn save_overwrites_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshot_id.json"));

        store.save(&record("first", 1)).unwrap();
        store.save(&record("second", 2)).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.snapshot_id, SnapshotId("second".into()));
        assert_eq!(loaded.droplet_id, DropletId(2));
    }

    #[test]
    fn load_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot_id.json");
        std::fs::write(&path, "not json").unwrap();

        let store = SnapshotStore::new(path);
        assert!(matches!(store.load(), Err(Error::StateFormat(_))));
    }
}
