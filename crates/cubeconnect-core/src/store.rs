//! Suite record persistence.
//!
//! One fixed key holds the current suite as camelCase JSON. It is read once
//! at startup, written on join/create, and deleted on leave. A record that
//! fails to parse reads back as "no suite joined" rather than an error.
//! Concurrent writers on the same key are unguarded.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::state::Suite;

/// Key under which the suite record is persisted.
pub const SUITE_KEY: &str = "cubeconnect-suite";

/// Backing store for the single suite record.
pub trait SuiteStore {
    /// Read the persisted record, if any.
    fn load(&self) -> Result<Option<Suite>, StoreError>;
    /// Write the record, replacing any previous one.
    fn save(&mut self, suite: &Suite) -> Result<(), StoreError>;
    /// Delete the record.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// File-backed store: the record lives in `<dir>/cubeconnect-suite.json`.
#[derive(Debug, Clone)]
pub struct FileSuiteStore {
    path: PathBuf,
}

impl FileSuiteStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", SUITE_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SuiteStore for FileSuiteStore {
    fn load(&self) -> Result<Option<Suite>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Io(err)),
        };

        match serde_json::from_str(&raw) {
            Ok(suite) => Ok(Some(suite)),
            Err(err) => {
                // Malformed record falls back to the join prompt.
                log::warn!("discarding unreadable suite record: {}", err);
                Ok(None)
            }
        }
    }

    fn save(&mut self, suite: &Suite) -> Result<(), StoreError> {
        let json = serde_json::to_string(suite)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Io(err)),
        }
    }
}

/// In-memory store for tests and headless harnesses.
#[derive(Debug, Clone, Default)]
pub struct MemorySuiteStore {
    record: Option<Suite>,
}

impl MemorySuiteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SuiteStore for MemorySuiteStore {
    fn load(&self) -> Result<Option<Suite>, StoreError> {
        Ok(self.record.clone())
    }

    fn save(&mut self, suite: &Suite) -> Result<(), StoreError> {
        self.record = Some(suite.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.record = None;
        Ok(())
    }
}

/// Errors from reading or writing the suite record.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Json(err)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "IO error: {}", err),
            StoreError::Json(err) => write!(f, "Serialization error: {}", err),
        }
    }
}

impl std::error::Error for StoreError {}
