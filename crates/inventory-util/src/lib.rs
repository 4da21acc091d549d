//! Shared utilities for the inventory store
//!
//! This crate provides:
//! - ID types (ItemId)
//! - Wall-clock helpers for `date_added` timestamps
//! - Default paths for the store file and configuration

mod ids;
mod paths;
mod time;

pub use ids::*;
pub use paths::*;
pub use time::*;
