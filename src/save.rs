use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::player::Player;

/// Version tag written into every snapshot.
pub const SAVE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("storage error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed save data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no saved game found")]
    NotFound,
}

/// A full snapshot of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    pub player: Player,
    pub game_day: u32,
    pub streak: u32,
    /// Seconds, including the session that wrote the snapshot.
    pub play_time: u64,
    #[serde(default)]
    pub last_play_date: Option<String>,
    /// Unix milliseconds at capture.
    pub timestamp: i64,
    pub version: String,
}

impl SaveData {
    pub fn encode(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn decode(payload: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn is_current_version(&self) -> bool {
        self.version == SAVE_VERSION
    }
}

/// Where snapshots live. `read` returns `Ok(None)` when nothing was saved yet.
pub trait SaveStore {
    fn read(&self) -> Result<Option<String>, SaveError>;
    fn write(&mut self, payload: &str) -> Result<(), SaveError>;
    fn clear(&mut self) -> Result<(), SaveError>;
}

/// Save file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    /// `<data dir>/soul_commander/save.json`, or the working directory when
    /// the platform has no data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("soul_commander")
            .join("save.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileStore {
    fn default() -> Self {
        FileStore::new(FileStore::default_path())
    }
}

impl SaveStore for FileStore {
    fn read(&self) -> Result<Option<String>, SaveError> {
        match fs::read_to_string(&self.path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, payload: &str) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, payload)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Keeps the payload in memory. Used by the browser build, where the host owns storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    payload: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        MemoryStore {
            payload: Some(payload.into()),
        }
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, SaveError> {
        Ok(self.payload.clone())
    }

    fn write(&mut self, payload: &str) -> Result<(), SaveError> {
        self.payload = Some(payload.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        self.payload = None;
        Ok(())
    }
}
