//! Query layer: filters, search and aggregation over scanned records
//!
//! Everything here works on records already read from the store, in file
//! order. Nothing touches the filesystem.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::Record;

/// Items at or below this quantity are low stock
pub const LOW_STOCK_THRESHOLD: u32 = 2;

/// Number of records included in a summary preview
pub const PREVIEW_LIMIT: usize = 5;

/// Filter for `list`. Set criteria combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Exact, case-sensitive category match
    pub category: Option<String>,

    /// Keep only low-stock items
    pub low_stock: bool,
}

impl ListFilter {
    /// Matches every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn low_stock(mut self) -> Self {
        self.low_stock = true;
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        if let Some(category) = &self.category
            && record.category != *category
        {
            return false;
        }

        !self.low_stock || is_low_stock(record)
    }

    /// Apply the filter, keeping file order
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

pub fn is_low_stock(record: &Record) -> bool {
    record.quantity <= LOW_STOCK_THRESHOLD
}

/// Case-insensitive substring search over name and notes.
///
/// An empty query matches everything.
pub fn search_records(records: Vec<Record>, query: &str) -> Vec<Record> {
    let needle = query.to_lowercase();
    records
        .into_iter()
        .filter(|r| r.name.to_lowercase().contains(&needle) || r.notes.to_lowercase().contains(&needle))
        .collect()
}

/// Inventory totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Sum of quantities across all records
    pub total_items: u64,

    /// Number of distinct categories
    pub categories: usize,

    /// Summed quantity per category
    pub by_category: BTreeMap<String, u64>,

    /// First records in file order
    pub items: Vec<Record>,
}

/// Group by category and sum quantities
pub fn summarize_records(records: Vec<Record>) -> Summary {
    let mut by_category: BTreeMap<String, u64> = BTreeMap::new();
    let mut total_items = 0u64;

    for record in &records {
        let qty = u64::from(record.quantity);
        *by_category.entry(record.category.clone()).or_default() += qty;
        total_items += qty;
    }

    let mut items = records;
    items.truncate(PREVIEW_LIMIT);

    Summary {
        total_items,
        categories: by_category.len(),
        by_category,
        items,
    }
}
