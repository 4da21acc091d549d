//! Strongly-typed identifiers for inventory items

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Unique identifier for an item in the store
///
/// Serialized as a bare integer so it occupies the `id` column of the
/// store file unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// First id handed out by a fresh store
    pub const FIRST: ItemId = ItemId(1000);

    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }

    /// The id immediately after this one, if it fits
    pub fn successor(&self) -> Option<ItemId> {
        self.0.checked_add(1).map(ItemId)
    }
}

/// How a store picks the id for a new item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// One past the largest id already in the store
    #[default]
    Sequential,

    /// Uniform draw from a 4-digit range, redrawn on collision
    Random,
}

impl fmt::Display for IdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdPolicy::Sequential => write!(f, "sequential"),
            IdPolicy::Random => write!(f, "random"),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for ItemId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ItemId)
    }
}
