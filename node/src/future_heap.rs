//! Holding structure for blocks that arrived ahead of wall time.
//!
//! A min-heap ordered by block timestamp, so the block whose time comes first
//! is always replayed first. The consensus loop drains at most one block per
//! cadence tick, which bounds the CPU spent on replays and naturally paces
//! retries of a block that is still too early.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use meridian_block::Block;
use meridian_types::BlockId;

/// A held block, ordered for the min-heap: earliest timestamp first, ties
/// broken by block number, then id.
struct HeldBlock(Block);

impl HeldBlock {
    fn key(&self) -> (u64, u32, BlockId) {
        let header = self.0.header();
        (header.timestamp(), header.number(), header.id())
    }
}

impl Eq for HeldBlock {}

impl PartialEq for HeldBlock {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Ord for HeldBlock {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse the comparison so the smallest
        // key surfaces first.
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for HeldBlock {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap of too-early blocks. Each block id appears at most once.
pub struct FutureHeap {
    heap: BinaryHeap<HeldBlock>,
    ids: HashSet<BlockId>,
}

impl FutureHeap {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            ids: HashSet::new(),
        }
    }

    /// Queue a block for replay. Returns `false` if the block is already held.
    pub fn push(&mut self, block: Block) -> bool {
        if !self.ids.insert(block.header().id()) {
            return false;
        }
        self.heap.push(HeldBlock(block));
        true
    }

    /// Remove and return the held block with the smallest timestamp.
    pub fn pop(&mut self) -> Option<Block> {
        let HeldBlock(block) = self.heap.pop()?;
        self.ids.remove(&block.header().id());
        Some(block)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl Default for FutureHeap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_types::{Address, Signature};

    fn make_block(number: u32, timestamp: u64, salt: u8) -> Block {
        let header = meridian_block::Header::new(
            BlockId::new([salt; 32]),
            number,
            timestamp,
            0,
            10_000_000,
            0,
            Address::new([0x01; 20]),
            Signature([1u8; 64]),
        );
        Block::new(header, Vec::new())
    }

    #[test]
    fn pops_in_timestamp_order() {
        let mut heap = FutureHeap::new();
        heap.push(make_block(3, 300, 1));
        heap.push(make_block(1, 100, 2));
        heap.push(make_block(2, 200, 3));

        assert_eq!(heap.pop().unwrap().header().timestamp(), 100);
        assert_eq!(heap.pop().unwrap().header().timestamp(), 200);
        assert_eq!(heap.pop().unwrap().header().timestamp(), 300);
        assert!(heap.pop().is_none());
    }

    #[test]
    fn equal_timestamps_break_ties_on_number() {
        let mut heap = FutureHeap::new();
        heap.push(make_block(9, 500, 1));
        heap.push(make_block(4, 500, 2));

        assert_eq!(heap.pop().unwrap().header().number(), 4);
        assert_eq!(heap.pop().unwrap().header().number(), 9);
    }

    #[test]
    fn duplicate_push_is_rejected() {
        let mut heap = FutureHeap::new();
        let block = make_block(1, 100, 1);

        assert!(heap.push(block.clone()));
        assert!(!heap.push(block));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn id_can_be_requeued_after_pop() {
        let mut heap = FutureHeap::new();
        let block = make_block(1, 100, 1);

        heap.push(block.clone());
        assert!(heap.pop().is_some());
        assert!(heap.push(block));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn empty_heap_reports_empty() {
        let mut heap = FutureHeap::new();
        assert!(heap.is_empty());
        assert!(heap.pop().is_none());

        heap.push(make_block(1, 100, 1));
        assert!(!heap.is_empty());
    }
}
