//! Persistence layer for the inventory
//!
//! Provides:
//! - Record schema and the CSV file format
//! - Append-only storage with create-if-absent
//! - Filtered listing, substring search, per-category summary
//! - Collision-free id assignment
//! - Advisory file locking and integrity checks

mod allocate;
mod csv_store;
mod lock;
mod query;
mod record;
mod traits;

pub use allocate::*;
pub use csv_store::*;
pub use lock::*;
pub use query::*;
pub use record::*;
pub use traits::*;

use inventory_util::ItemId;
use std::path::PathBuf;
use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Corrupt record at line {line}: {reason}")]
    CorruptRecord { line: u64, reason: String },

    #[error("Could not assign a unique id (last candidate: {0})")]
    DuplicateId(ItemId),

    #[error("Lock error: {0}")]
    Lock(#[from] LockError),

    #[error("CSV error: {0}")]
    Csv(String),
}

impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<csv::Error> for StoreError {
    fn from(e: csv::Error) -> Self {
        let message = e.to_string();
        match e.into_kind() {
            csv::ErrorKind::Io(io) => StoreError::Io(io),
            _ => StoreError::Csv(message),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
