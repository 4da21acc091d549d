//! Advisory locking for the store file.
//!
//! Locks are taken on a sidecar file (`inventory.csv` -> `inventory.csv.lock`)
//! so the store itself can be opened, appended to and closed freely while the
//! lock is held. Writers take an exclusive lock for the whole
//! scan-then-append of an add; readers take a shared lock for a scan.
//!
//! Locks are advisory: they only exclude other processes that use them.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors from lock operations.
#[derive(Debug, Error)]
pub enum LockError {
    #[error("Failed to create lock file {path}: {source}")]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to acquire lock on {path}: {source}")]
    AcquireFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A held lock on a store. Released when dropped.
pub struct StoreLockGuard {
    _file: File,
    lock_path: PathBuf,
    mode: LockMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockMode {
    Shared,
    Exclusive,
}

impl Drop for StoreLockGuard {
    fn drop(&mut self) {
        // Closing the file releases the flock
        debug!(lock_path = %self.lock_path.display(), mode = ?self.mode, "Releasing store lock");
    }
}

impl std::fmt::Debug for StoreLockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreLockGuard")
            .field("lock_path", &self.lock_path)
            .field("mode", &self.mode)
            .finish()
    }
}

/// Get the lock file path for a store path.
///
/// - `/data/inventory.csv` -> `/data/inventory.csv.lock`
/// - `/data/inventory` -> `/data/inventory.lock`
pub fn lock_path_for(store_path: &Path) -> PathBuf {
    let mut lock_path = store_path.to_path_buf();
    match lock_path.extension() {
        Some(ext) => {
            let new_ext = format!("{}.lock", ext.to_string_lossy());
            lock_path.set_extension(new_ext);
        }
        None => {
            lock_path.set_extension("lock");
        }
    }
    lock_path
}

fn open_lock_file(lock_path: &Path) -> Result<File, LockError> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .map_err(|source| LockError::CreateFailed {
            path: lock_path.to_path_buf(),
            source,
        })
}

/// Acquire an exclusive lock, waiting for other holders to release.
pub fn lock_exclusive(store_path: &Path) -> Result<StoreLockGuard, LockError> {
    let lock_path = lock_path_for(store_path);
    let file = open_lock_file(&lock_path)?;

    // Fully qualified: std::fs::File has inherent lock methods on newer toolchains
    FileExt::lock_exclusive(&file).map_err(|source| LockError::AcquireFailed {
        path: lock_path.clone(),
        source,
    })?;

    debug!(lock_path = %lock_path.display(), "Acquired exclusive store lock");
    Ok(StoreLockGuard {
        _file: file,
        lock_path,
        mode: LockMode::Exclusive,
    })
}

/// Acquire a shared lock, waiting for an exclusive holder to release.
pub fn lock_shared(store_path: &Path) -> Result<StoreLockGuard, LockError> {
    let lock_path = lock_path_for(store_path);
    let file = open_lock_file(&lock_path)?;

    FileExt::lock_shared(&file).map_err(|source| LockError::AcquireFailed {
        path: lock_path.clone(),
        source,
    })?;

    debug!(lock_path = %lock_path.display(), "Acquired shared store lock");
    Ok(StoreLockGuard {
        _file: file,
        lock_path,
        mode: LockMode::Shared,
    })
}
