//! Cache storage module
//!
//! This module provides persistent caching of API responses in a flat
//! directory, one JSON file per key. Entries are never expired; they are
//! written once through a temporary file and renamed into place.

use crate::temp::create_temp_file;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Name of the cache directory below the user's configuration directory
const DEFAULT_DIR_NAME: &str = "tmdb";

/// Prefix of in-flight entry files; the key is left out so the temporary
/// name is never longer than the entry's own
const TEMP_PREFIX: &str = "entry";

/// Errors that can occur during cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    /// Failed to determine cache directory location
    #[error("Failed to determine cache directory location")]
    CacheDirectoryNotFound,

    /// Failed to create or access cache directory
    #[error("Failed to create cache directory at {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    /// Failed to read cached data
    #[error("Failed to read cache file {path}: {source}")]
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to write cached data
    #[error("Failed to write cache file {path}: {source}")]
    WriteFailed { path: PathBuf, source: io::Error },

    /// Failed to deserialize cached data
    #[error("Failed to deserialize cache file {path}: {source}")]
    DeserializationFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Failed to serialize data for caching
    #[error("Failed to serialize data: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// A flat, file-per-key store for serializable data
///
/// Keys are used verbatim as file stems, so callers must hand in keys that
/// are already safe as a single file name.
#[derive(Debug, Clone)]
pub(crate) struct CacheStorage {
    /// The directory where cached data is stored
    cache_dir: PathBuf,
}

impl CacheStorage {
    /// Opens or creates a cache storage in the given directory
    ///
    /// Without an explicit directory, `<user config dir>/tmdb` is used. The
    /// directory and its parents are created if missing; failing to do so is
    /// an error.
    pub fn open(dir: Option<PathBuf>) -> Result<Self, CacheError> {
        let cache_dir = match dir {
            Some(dir) => dir,
            None => default_cache_dir()?,
        };

        fs::create_dir_all(&cache_dir).map_err(|e| CacheError::DirectoryCreationFailed {
            path: cache_dir.clone(),
            source: e,
        })?;

        Ok(Self { cache_dir })
    }

    /// Returns the file an entry with the given key lives in
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Loads cached data for the given key
    ///
    /// Returns `Ok(None)` when the entry cannot be opened, which is how a
    /// missing entry shows up. Once the entry is open, read and decode
    /// failures are errors; a corrupt entry never turns into a miss.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let file_path = self.entry_path(key);

        let mut file = match File::open(&file_path) {
            Ok(file) => file,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    debug!(path = %file_path.display(), error = %e, "cache entry not readable");
                }
                return Ok(None);
            }
        };

        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|e| CacheError::ReadFailed {
                path: file_path.clone(),
                source: e,
            })?;

        let data = serde_json::from_slice(&content).map_err(|e| {
            CacheError::DeserializationFailed {
                path: file_path,
                source: e,
            }
        })?;

        Ok(Some(data))
    }

    /// Stores data in the cache under the given key
    ///
    /// The entry is replaced atomically; concurrent writers of the same key
    /// race and the last rename wins.
    pub fn store<T: Serialize>(&self, key: &str, data: &T) -> Result<(), CacheError> {
        let file_path = self.entry_path(key);

        let content = serde_json::to_vec(data)?;

        let write_failed = |e: io::Error| CacheError::WriteFailed {
            path: file_path.clone(),
            source: e,
        };

        let temp = create_temp_file(&self.cache_dir, TEMP_PREFIX, "tmp").map_err(write_failed)?;
        fs::write(&*temp, &content).map_err(write_failed)?;
        temp.persist(&file_path).map_err(write_failed)?;

        debug!(path = %file_path.display(), bytes = content.len(), "stored cache entry");
        Ok(())
    }

    /// Returns the path to the cache directory
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}

/// Returns the default cache location, `<user config dir>/tmdb`
pub fn default_cache_dir() -> Result<PathBuf, CacheError> {
    let base_dirs = directories::BaseDirs::new().ok_or(CacheError::CacheDirectoryNotFound)?;
    Ok(base_dirs.config_dir().join(DEFAULT_DIR_NAME))
}
