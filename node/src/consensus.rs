//! The consensus loop: sole writer of the chain and the log database.
//!
//! One task consuming four sources (the cancellation signal, the cadence
//! ticker, the inbound block subscription and the packed-event channel from
//! the packer) and taking exactly one action per iteration. Suspension only
//! happens at the top-of-loop wait; every collaborator call inside a branch
//! returns without parking the task.

use std::sync::Arc;

use meridian_block::Block;
use meridian_types::{ChainParams, Timestamp};
use tokio::sync::{broadcast, mpsc};
use tokio::time::{Duration, Instant};

use crate::events::{NewBlockEvent, PackedEvent};
use crate::future_heap::FutureHeap;
use crate::handoff::BestBlockHandoff;
use crate::interfaces::{
    BlockAnnouncement, Chain, Communicator, ConsentError, Consensus, LogDb, LogRecord, Mempool,
};
use crate::metrics::EngineMetrics;
use crate::orphans::OrphanPool;
use crate::EngineError;

/// Capacity of the inbound block subscription.
const SUBSCRIPTION_BUFFER: usize = 100;

pub(crate) struct ConsensusLoop {
    pub consensus: Arc<dyn Consensus>,
    pub chain: Arc<dyn Chain>,
    pub communicator: Arc<dyn Communicator>,
    pub mempool: Arc<dyn Mempool>,
    pub logdb: Arc<dyn LogDb>,
    pub handoff: BestBlockHandoff,
    pub packed_rx: mpsc::Receiver<PackedEvent>,
    pub shutdown: broadcast::Receiver<()>,
    pub params: ChainParams,
    pub metrics: Arc<EngineMetrics>,
}

impl ConsensusLoop {
    pub async fn run(mut self) {
        let mut futures = FutureHeap::new();
        let mut orphans = OrphanPool::new();

        let (sub_tx, mut sub_rx) = mpsc::channel::<BlockAnnouncement>(SUBSCRIPTION_BUFFER);
        self.communicator.subscribe_block(sub_tx);

        let mut ticker =
            tokio::time::interval(Duration::from_secs(self.params.block_interval_secs));

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.recv() => {
                    self.communicator.unsubscribe();
                    tracing::info!("block consensus loop stopped");
                    break;
                }
                _ = ticker.tick() => {
                    // One replay per tick bounds the time spent on held
                    // blocks; a block that is still too early goes straight
                    // back into the heap inside process().
                    if let Some(block) = futures.pop() {
                        self.process(block, false, &mut futures, &mut orphans);
                        self.metrics.future_blocks.set(futures.len() as i64);
                        self.metrics.orphan_blocks.set(orphans.len() as i64);
                    }
                }
                Some(BlockAnnouncement { block, is_synced }) = sub_rx.recv() => {
                    let id = block.header().id();
                    if self.process(block, is_synced, &mut futures, &mut orphans) {
                        if let Some(orphan) = orphans.take(&id) {
                            if orphan.is_replayable(Instant::now()) {
                                self.process(orphan.block, false, &mut futures, &mut orphans);
                            }
                        }
                    }
                    self.metrics.future_blocks.set(futures.len() as i64);
                    self.metrics.orphan_blocks.set(orphans.len() as i64);
                }
                Some(PackedEvent { block, receipts, ack }) = self.packed_rx.recv() => {
                    match self.consensus.is_trunk(block.header()) {
                        Ok(trunk) => {
                            let _ = self.update_chain(NewBlockEvent {
                                block,
                                receipts,
                                trunk,
                                is_synced: false,
                            });
                            let _ = ack.send(());
                        }
                        Err(error) => {
                            // Dropping `ack` here releases the packer; the
                            // proposal is lost, not stuck.
                            tracing::error!(%error, "failed to classify packed block");
                        }
                    }
                }
            }
        }
    }

    /// Run one block through validation and, on acceptance, commit it.
    ///
    /// Returns `true` only when the block was accepted and the chain update
    /// succeeded; the caller uses that to decide whether a waiting orphan may
    /// be replayed.
    fn process(
        &self,
        block: Block,
        is_synced: bool,
        futures: &mut FutureHeap,
        orphans: &mut OrphanPool,
    ) -> bool {
        self.metrics.blocks_processed.inc();

        let now = Timestamp::now().as_secs();
        match self.consensus.consent(&block, now) {
            Ok(verdict) => self
                .update_chain(NewBlockEvent {
                    block,
                    receipts: verdict.receipts,
                    trunk: verdict.trunk,
                    is_synced,
                })
                .is_ok(),
            Err(ConsentError::FutureBlock) => {
                futures.push(block);
                false
            }
            Err(ConsentError::ParentNotFound) => {
                let parent = block.header().parent_id();
                orphans.insert(parent, block, Instant::now());
                false
            }
            Err(ConsentError::Rejected(reason)) => {
                // Untrusted peer data; drop without fanfare.
                tracing::debug!(
                    id = %block.header().id(),
                    number = block.header().number(),
                    %reason,
                    "discarded invalid block"
                );
                false
            }
        }
    }

    /// Persist an accepted block and, when it extends the trunk, fan out the
    /// consequences: best-block publication, peer broadcast, log indexing and
    /// reorganization bookkeeping. Side-branch acceptances are silent.
    fn update_chain(&self, event: NewBlockEvent) -> Result<(), EngineError> {
        let fork = self
            .chain
            .add_block(&event.block, &event.receipts, event.trunk)
            .map_err(|error| {
                tracing::error!(%error, id = %event.block.header().id(), "failed to persist block");
                error
            })?;
        self.metrics.blocks_accepted.inc();

        if !event.trunk {
            return Ok(());
        }

        let header = event.block.header();
        if !event.is_synced {
            if let Ok(signer) = header.signer() {
                tracing::info!(
                    number = header.number(),
                    id = %header.id(),
                    total_score = header.total_score(),
                    %signer,
                    "best block updated"
                );
            }
        }

        self.handoff.publish(event.block.clone());
        self.communicator.broadcast_block(&event.block);

        // Flatten the receipts into the log batch: receipts in transaction
        // order, outputs within each receipt, logs within each output, one
        // block-wide index across all of them.
        let mut logs = Vec::new();
        let mut index: u32 = 0;
        for (tx, receipt) in event.block.transactions().iter().zip(event.receipts.iter()) {
            let origin = tx.signer().map_err(|error| {
                tracing::error!(tx = %tx.id(), %error, "transaction signer unrecoverable");
                error
            })?;
            for output in &receipt.outputs {
                for entry in &output.logs {
                    logs.push(LogRecord::new(header, index, tx.id(), origin, entry.clone()));
                    index += 1;
                }
            }
        }

        let mut fork_ids = Vec::with_capacity(fork.branch.len());
        for stale in &fork.branch {
            fork_ids.push(stale.header().id());
            for tx in stale.transactions() {
                self.mempool.add(tx.clone());
            }
        }
        if !fork_ids.is_empty() {
            self.metrics.chain_reorgs.inc();
            tracing::info!(depth = fork_ids.len(), "chain reorganized");
        }

        self.logdb.insert(logs, fork_ids).map_err(|error| {
            tracing::error!(%error, id = %header.id(), "failed to index block logs");
            error
        })?;

        Ok(())
    }
}
