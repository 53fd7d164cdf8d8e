//! Snapshot store for the donations file
//!
//! The Telegram bot owns the donations file and is its only writer; the
//! Mini App side only ever reads. A missing or unreadable file is not an
//! error to the app, it is the cold-start empty state.

use std::fs;
use std::path::{Path, PathBuf};

use crate::leaderboard::DonationLog;

/// All errors that can occur reading the donations snapshot.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The file could not be read (missing, permissions, ...).
    #[error("failed to read donations file: {0}")]
    Io(#[from] std::io::Error),

    /// The file exists but is not valid donations JSON.
    #[error("failed to parse donations file: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Anything that can hand the app a donor snapshot
///
/// The leaderboard never touches the filesystem directly; it asks a source.
/// Tests and the web bridge inject their own.
pub trait SnapshotSource {
    /// Current snapshot, or `None` when no data exists yet
    fn load(&self) -> Option<DonationLog>;
}

/// Reads the bot's donations file from disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Strict read, for callers that care why loading failed
    pub fn read(&self) -> Result<DonationLog> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl SnapshotSource for FileStore {
    fn load(&self) -> Option<DonationLog> {
        match self.read() {
            Ok(snapshot) => {
                log::info!(
                    "Loaded {} donors from {}",
                    snapshot.donors.len(),
                    self.path.display()
                );
                Some(snapshot)
            }
            Err(StoreError::Io(e)) => {
                log::info!(
                    "No donations file at {} ({e}), serving empty board",
                    self.path.display()
                );
                None
            }
            Err(e) => {
                log::warn!("Ignoring donations file at {}: {e}", self.path.display());
                None
            }
        }
    }
}

/// Fixed in-memory snapshot, for tests and embedding hosts
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    snapshot: Option<DonationLog>,
}

impl MemorySource {
    pub fn new(snapshot: DonationLog) -> Self {
        Self {
            snapshot: Some(snapshot),
        }
    }

    /// Source that behaves like a missing file
    pub fn empty() -> Self {
        Self::default()
    }
}

impl SnapshotSource for MemorySource {
    fn load(&self) -> Option<DonationLog> {
        self.snapshot.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    /// Unique temp path per test so parallel runs don't collide
    fn temp_path(tag: &str) -> PathBuf {
        env::temp_dir().join(format!("relay-stars-{tag}-{}", std::process::id()))
    }

    #[test]
    fn test_missing_file_is_empty_state() {
        let store = FileStore::new(temp_path("missing"));
        assert!(matches!(store.read(), Err(StoreError::Io(_))));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_corrupt_file_is_empty_state() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.read(), Err(StoreError::Parse(_))));
        assert!(store.load().is_none());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_valid_file_loads() {
        let path = temp_path("valid");
        fs::write(
            &path,
            r#"{
                "donors": {
                    "7": {
                        "id": 7,
                        "name": "Grace",
                        "username": "grace",
                        "total_stars": 1200,
                        "total_usd": 24.0,
                        "donation_count": 3,
                        "first_donation": "2025-05-01T08:00:00",
                        "last_donation": "2025-06-01T08:00:00"
                    }
                },
                "total_stars": 1200,
                "total_usd": 24.0,
                "transactions": []
            }"#,
        )
        .unwrap();

        let store = FileStore::new(&path);
        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.donors.len(), 1);
        assert_eq!(snapshot.donors["7"].total_stars, 1200);
        assert_eq!(snapshot.last_milestone, None);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_memory_source() {
        assert!(MemorySource::empty().load().is_none());

        let mut log = DonationLog::default();
        log.total_stars = 10;
        let source = MemorySource::new(log);
        assert_eq!(source.load().unwrap().total_stars, 10);
    }
}
