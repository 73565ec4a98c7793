//! Holding structure for blocks whose parent has not been seen yet.
//!
//! Each missing parent id maps to at most one waiting block: the pool records
//! a pointer back, not every orphan (first-seen wins). When the parent is
//! accepted, the waiting block is replayed, provided it has not outlived the
//! retention window. Deeper gaps than one block are resolved by subsequent
//! peer traffic, not by chaining replays.
//!
//! Arrival times sit on the monotonic clock, so the retention window is
//! immune to wall-clock steps.

use std::collections::HashMap;

use meridian_block::Block;
use meridian_types::BlockId;
use tokio::time::{Duration, Instant};

/// How long an orphan stays replayable.
pub const ORPHAN_RETENTION: Duration = Duration::from_secs(300);

/// A block waiting for its parent, with its arrival time.
pub struct OrphanEntry {
    pub block: Block,
    pub received_at: Instant,
}

impl OrphanEntry {
    /// Whether the entry is still inside the retention window at `now`.
    pub fn is_replayable(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.received_at) <= ORPHAN_RETENTION
    }
}

/// Maps a missing parent id to the single block waiting for it.
pub struct OrphanPool {
    entries: HashMap<BlockId, OrphanEntry>,
}

impl OrphanPool {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Hold `block` until `parent` arrives. Returns `false` when another
    /// orphan already waits for the same parent; that earlier block wins.
    pub fn insert(&mut self, parent: BlockId, block: Block, now: Instant) -> bool {
        if self.entries.contains_key(&parent) {
            return false;
        }
        self.entries.insert(
            parent,
            OrphanEntry {
                block,
                received_at: now,
            },
        );
        true
    }

    /// Remove and return the block waiting for `parent`, if any.
    pub fn take(&mut self, parent: &BlockId) -> Option<OrphanEntry> {
        self.entries.remove(parent)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for OrphanPool {
    fn default() -> Self {
        Self::new()
    }
}
