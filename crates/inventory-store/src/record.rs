//! Record types and the on-disk column layout

use chrono::{DateTime, Local};
use inventory_util::ItemId;
use serde::{Deserialize, Serialize};

use crate::{StoreError, StoreResult};

/// Column names, in file order. Written as the first line of a new store.
pub const FIELDS: [&str; 7] = [
    "id",
    "name",
    "category",
    "quantity",
    "location",
    "date_added",
    "notes",
];

/// Location used when the caller gives none
pub const DEFAULT_LOCATION: &str = "default";

/// One inventory entry, as stored
///
/// Field order matches [`FIELDS`]. Rows are read by header name, so a store
/// written under an older header that lacks a column fails with a
/// "missing field" error rather than a silent shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub location: String,
    #[serde(with = "inventory_util::iso8601")]
    pub date_added: DateTime<Local>,
    pub notes: String,
}

/// Caller input for a new item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    /// Signed so that negative input reaches validation instead of wrapping
    pub quantity: i64,
    pub location: String,
    pub notes: String,
}

impl NewItem {
    /// A single item at the default location with no notes
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            quantity: 1,
            location: DEFAULT_LOCATION.to_string(),
            notes: String::new(),
        }
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Check the item against the record invariants.
    ///
    /// Returns the quantity narrowed to its stored width.
    pub fn validate(&self) -> StoreResult<u32> {
        if self.name.trim().is_empty() {
            return Err(StoreError::validation("name cannot be empty"));
        }

        if self.quantity < 0 {
            return Err(StoreError::validation(format!(
                "quantity cannot be negative (got {})",
                self.quantity
            )));
        }

        u32::try_from(self.quantity).map_err(|_| {
            StoreError::validation(format!(
                "quantity {} exceeds the maximum of {}",
                self.quantity,
                u32::MAX
            ))
        })
    }

    /// Build the stored record once an id and timestamp are known
    pub(crate) fn into_record(self, id: ItemId, quantity: u32, date_added: DateTime<Local>) -> Record {
        Record {
            id,
            name: self.name,
            category: self.category,
            quantity,
            location: self.location,
            date_added,
            notes: self.notes,
        }
    }
}

/// Result of a successful add
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Added {
    pub id: ItemId,
    pub name: String,
}
