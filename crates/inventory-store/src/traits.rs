//! Store trait definitions

use inventory_util::ItemId;
use serde::Serialize;

use crate::{Added, ListFilter, NewItem, Record, StoreResult, Summary};

/// Main store trait
pub trait Store: Send + Sync {
    // Writes

    /// Validate and append a new item, returning its assigned id
    fn add(&self, item: NewItem) -> StoreResult<Added>;

    // Queries (full scan each call)

    /// Records matching the filter, in insertion order
    fn list(&self, filter: &ListFilter) -> StoreResult<Vec<Record>>;

    /// Records whose name or notes contain `query`, ignoring case
    fn search(&self, query: &str) -> StoreResult<Vec<Record>>;

    /// Per-category totals plus a preview of the first records
    fn summarize(&self) -> StoreResult<Summary>;

    // Health

    /// Scan every row without failing on corrupt ones
    fn verify(&self) -> StoreResult<Health>;

    /// Check if store is healthy
    fn is_healthy(&self) -> bool {
        self.verify().map(|h| h.is_healthy()).unwrap_or(false)
    }
}

/// Outcome of a full integrity scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Health {
    /// Rows that parsed into complete records
    pub records: usize,

    /// Rows that did not
    pub corrupt: Vec<CorruptRow>,

    /// Ids that appear on more than one row
    pub duplicate_ids: Vec<ItemId>,
}

impl Health {
    pub fn is_healthy(&self) -> bool {
        self.corrupt.is_empty() && self.duplicate_ids.is_empty()
    }
}

/// A row that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorruptRow {
    /// 1-based line in the store file
    pub line: u64,
    pub reason: String,
}
