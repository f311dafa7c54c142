// SPDX-License-Identifier: AGPL-3.0
// Happy Tails Core - Local key/value storage
//
// A minimal string-keyed store backed by one JSON file per key in the
// platform config directory. No cloud sync, no tracking, just simple
// local persistence.

use crate::types::AppError;
use std::fs;
use std::path::PathBuf;

/// Storage key for the persisted favorite-id list
pub const FAVORITES_KEY: &str = "favorites";

/// Storage key for the cached user profile
pub const PROFILE_KEY: &str = "profile";

/// File-backed string key/value store
#[derive(Debug, Clone)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    /// Open the store in the platform config directory
    pub fn open() -> Result<Self, AppError> {
        let dir = directories::ProjectDirs::from("com", "happytails", "HappyTails")
            .ok_or_else(|| AppError::FileIo("Could not determine config directory".to_string()))?
            .config_dir()
            .to_path_buf();

        Self::at_dir(dir)
    }

    /// Open the store in a specific directory (used by tests)
    pub fn at_dir(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();

        // Ensure the directory exists
        fs::create_dir_all(&dir)
            .map_err(|e| AppError::FileIo(format!("Failed to create config dir: {}", e)))?;

        tracing::info!("Local store directory: {:?}", dir);
        Ok(Self { dir })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Read the value under `key`, or None if it was never written
    pub fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::FileIo(format!("Failed to read {}: {}", key, e)))?;
        Ok(Some(content))
    }

    /// Write `value` under `key`, replacing any previous value
    pub fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        fs::write(self.entry_path(key), value)
            .map_err(|e| AppError::FileIo(format!("Failed to write {}: {}", key, e)))
    }

    /// Remove the entry under `key`; removing a missing key is not an error
    pub fn remove(&self, key: &str) -> Result<(), AppError> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(());
        }

        fs::remove_file(&path)
            .map_err(|e| AppError::FileIo(format!("Failed to remove {}: {}", key, e)))
    }
}
