//! The best-block hand-off between the consensus loop and the packer.
//!
//! A single-slot channel with coalescing writes: publishing never blocks, and
//! the reader only ever observes the most recent best block. A blocking slot
//! would deadlock the consensus loop while the packer is busy committing; an
//! unbounded queue would make the packer chew through stale bests. The
//! `tokio::sync::watch` channel has exactly the required semantics.
//!
//! The publishing side is cloneable because both the consensus loop (on every
//! trunk acceptance) and the packer's startup path (seeding the initial best)
//! write to it.

use std::sync::Arc;

use meridian_block::Block;
use tokio::sync::watch;

/// Create a connected hand-off pair.
pub fn best_block_handoff() -> (BestBlockHandoff, BestBlockWatch) {
    let (tx, rx) = watch::channel(None);
    (
        BestBlockHandoff { tx: Arc::new(tx) },
        BestBlockWatch { rx },
    )
}

/// Publishing side of the hand-off.
#[derive(Clone)]
pub struct BestBlockHandoff {
    tx: Arc<watch::Sender<Option<Block>>>,
}

impl BestBlockHandoff {
    /// Deposit `block` as the latest best. Never blocks; an unread previous
    /// value is overwritten.
    pub fn publish(&self, block: Block) {
        self.tx.send_replace(Some(block));
    }
}

/// Reading side of the hand-off. There is exactly one, owned by the packer.
pub struct BestBlockWatch {
    rx: watch::Receiver<Option<Block>>,
}

impl BestBlockWatch {
    /// Wait for a best block newer than the last one observed, then return
    /// it. Intermediate values published while the reader was away are
    /// skipped. Returns `None` only when every publisher is gone.
    pub async fn changed(&mut self) -> Option<Block> {
        loop {
            self.rx.changed().await.ok()?;
            if let Some(block) = self.rx.borrow_and_update().clone() {
                return Some(block);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_types::{Address, BlockId, Signature};

    fn make_block(number: u32) -> Block {
        let header = meridian_block::Header::new(
            BlockId::new([number as u8; 32]),
            number,
            1_000,
            number as u64,
            10_000_000,
            0,
            Address::new([0x01; 20]),
            Signature([1u8; 64]),
        );
        Block::new(header, Vec::new())
    }

    #[tokio::test]
    async fn reader_sees_published_block() {
        let (handoff, mut watch) = best_block_handoff();
        handoff.publish(make_block(1));

        let seen = watch.changed().await.unwrap();
        assert_eq!(seen.header().number(), 1);
    }

    #[tokio::test]
    async fn rapid_publishes_coalesce_to_latest() {
        let (handoff, mut watch) = best_block_handoff();
        handoff.publish(make_block(1));
        handoff.publish(make_block(2));
        handoff.publish(make_block(3));

        let seen = watch.changed().await.unwrap();
        assert_eq!(seen.header().number(), 3);
    }

    #[tokio::test]
    async fn publish_succeeds_with_busy_reader() {
        // The reader never drains; the writer must still never block.
        let (handoff, _watch) = best_block_handoff();
        for number in 0..100 {
            handoff.publish(make_block(number));
        }
    }

    #[tokio::test]
    async fn cloned_publishers_share_the_slot() {
        let (handoff, mut watch) = best_block_handoff();
        let second = handoff.clone();

        handoff.publish(make_block(1));
        second.publish(make_block(2));

        let seen = watch.changed().await.unwrap();
        assert_eq!(seen.header().number(), 2);
    }

    #[tokio::test]
    async fn reader_finishes_when_publishers_are_gone() {
        let (handoff, mut watch) = best_block_handoff();
        drop(handoff);
        assert!(watch.changed().await.is_none());
    }
}
