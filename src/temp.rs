//! Temporary file management module
//!
//! This module provides RAII-based temporary file handling with automatic cleanup.
//! Temporary files are created next to their final destination so they can be
//! moved into place with a single rename.

use std::fs::File;
use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};

/// Guard for temporary resources that automatically cleans up on drop
#[derive(Debug)]
pub(crate) enum TempGuard {
    /// Temporary file that will be deleted when dropped, unless persisted
    File(PathBuf),
}

impl TempGuard {
    /// Get the path to the temporary resource
    pub(crate) fn path(&self) -> &Path {
        match self {
            TempGuard::File(path) => path,
        }
    }

    /// Atomically moves the temporary file to `target`, replacing any file there.
    ///
    /// On failure the temporary file is still removed when the guard drops.
    pub(crate) fn persist(mut self, target: &Path) -> io::Result<()> {
        let TempGuard::File(path) = &mut self;
        std::fs::rename(&*path, target)?;
        // Nothing left to clean up
        path.clear();
        Ok(())
    }
}

impl Drop for TempGuard {
    fn drop(&mut self) {
        match self {
            TempGuard::File(path) => {
                if !path.as_os_str().is_empty() {
                    // Silently ignore errors during cleanup
                    let _ = std::fs::remove_file(path);
                }
            }
        }
    }
}

impl Deref for TempGuard {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        self.path()
    }
}

/// Creates a temporary file inside `dir` and returns a guard that will clean it up on drop
///
/// The file gets a unique name generated using ULID (monotonic, sortable unique
/// identifier), so concurrent writers never share a temporary file.
///
/// # Examples
///
/// ```ignore
/// let temp = create_temp_file(&cache_dir, "movie-603", "tmp")?;
/// std::fs::write(&*temp, b"{}")?;
/// temp.persist(&cache_dir.join("movie-603.json"))?;
/// ```
pub(crate) fn create_temp_file(dir: &Path, prefix: &str, extension: &str) -> io::Result<TempGuard> {
    let ulid = ulid::Ulid::new();
    let filename = format!(".{}_{}.{}", prefix, ulid, extension);

    let path = dir.join(filename);

    File::create(&path)?;

    Ok(TempGuard::File(path))
}
