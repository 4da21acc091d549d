//! Id assignment for new items

use inventory_util::{IdPolicy, ItemId};
use rand::Rng;
use std::collections::HashSet;
use std::ops::Range;

use crate::{StoreError, StoreResult};

/// Range random ids are drawn from
pub const RANDOM_ID_RANGE: Range<u64> = 1000..9999;

/// Draws attempted before a random allocation gives up
pub const RANDOM_ID_ATTEMPTS: usize = 32;

/// Pick an id not present in `existing`.
///
/// `existing` must hold every id in the store, and the caller must hold the
/// store's write lock until the new row is appended.
pub fn allocate_id<R: Rng>(
    policy: IdPolicy,
    existing: &HashSet<ItemId>,
    rng: &mut R,
) -> StoreResult<ItemId> {
    match policy {
        IdPolicy::Sequential => next_sequential(existing),
        IdPolicy::Random => next_random(existing, rng),
    }
}

fn next_sequential(existing: &HashSet<ItemId>) -> StoreResult<ItemId> {
    match existing.iter().max() {
        None => Ok(ItemId::FIRST),
        Some(max) => max.successor().ok_or(StoreError::DuplicateId(*max)),
    }
}

fn next_random<R: Rng>(existing: &HashSet<ItemId>, rng: &mut R) -> StoreResult<ItemId> {
    let mut candidate = ItemId::FIRST;
    for attempt in 1..=RANDOM_ID_ATTEMPTS {
        candidate = ItemId::new(rng.gen_range(RANDOM_ID_RANGE));
        if !existing.contains(&candidate) {
            return Ok(candidate);
        }
        tracing::debug!(candidate = %candidate, attempt, "Random id collided, redrawing");
    }

    Err(StoreError::DuplicateId(candidate))
}
