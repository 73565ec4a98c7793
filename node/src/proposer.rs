//! The packer loop: assembles and proposes blocks on the node's slots.
//!
//! Proposal only starts once the communicator reports the chain synchronized;
//! a node that packs on a stale chain would sign blocks the network discards.
//! After the gate, the loop is driven by two stimuli: a new best block (which
//! opens a fresh packing slot via `prepare`) and a short idle timer (which
//! checks whether the armed slot's wall-clock window has arrived).

use std::sync::Arc;
use std::time::Instant;

use meridian_types::{ChainParams, PrivateKey, Timestamp};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::Duration;

use crate::events::PackedEvent;
use crate::handoff::{BestBlockHandoff, BestBlockWatch};
use crate::interfaces::{Adopt, AdoptError, Chain, Commit, Communicator, Mempool, Packer};
use crate::metrics::EngineMetrics;

/// Period of the idle timer that polls the armed slot.
const IDLE_TICK: Duration = Duration::from_secs(2);

/// How often the startup gate re-checks synchronization.
const SYNC_POLL_INTERVAL: Duration = Duration::from_secs(1);

pub(crate) struct PackerLoop {
    pub chain: Arc<dyn Chain>,
    pub communicator: Arc<dyn Communicator>,
    pub mempool: Arc<dyn Mempool>,
    pub packer: Arc<dyn Packer>,
    pub handoff: BestBlockHandoff,
    pub best_rx: BestBlockWatch,
    pub packed_tx: mpsc::Sender<PackedEvent>,
    pub shutdown: broadcast::Receiver<()>,
    pub params: ChainParams,
    pub private_key: PrivateKey,
    pub metrics: Arc<EngineMetrics>,
}

impl PackerLoop {
    pub async fn run(mut self) {
        if !self.wait_until_synced().await {
            return;
        }

        // Seed the hand-off so the first slot is prepared against the actual
        // tip, never a stale one.
        let best = match self.chain.best_block() {
            Ok(block) => block,
            Err(error) => {
                tracing::error!(%error, "failed to load best block, packer stopped");
                return;
            }
        };
        self.handoff.publish(best);

        // The armed slot: `target_time` is the wall-clock second this node
        // may propose at, zero when disarmed. `adopt`/`commit` belong to the
        // same `prepare` call and are consumed together when the slot fires.
        let mut target_time: u64 = 0;
        let mut adopt: Option<Adopt> = None;
        let mut commit: Option<Commit> = None;
        let slot_width = self.params.block_interval_secs;

        loop {
            let idle = tokio::time::sleep(IDLE_TICK);
            tokio::pin!(idle);

            tokio::select! {
                biased;
                _ = self.shutdown.recv() => {
                    tracing::info!("block packer loop stopped");
                    return;
                }
                changed = self.best_rx.changed() => {
                    let Some(best) = changed else { return; };
                    match self
                        .packer
                        .prepare(best.header(), Timestamp::now().as_secs())
                    {
                        Ok(slot) => {
                            target_time = slot.target_time;
                            adopt = Some(slot.adopt);
                            commit = Some(slot.commit);
                        }
                        // The armed slot is left as it was; the next best
                        // block retries.
                        Err(error) => tracing::error!(%error, "failed to prepare packing slot"),
                    }
                }
                _ = &mut idle => {
                    let now = Timestamp::now().as_secs();
                    if now >= target_time && now < target_time + slot_width {
                        target_time = 0;
                        if let (Some(adopt_fn), Some(commit_fn)) = (adopt.take(), commit.take()) {
                            self.propose(adopt_fn, commit_fn).await;
                        }
                    }
                    // A missed window (now >= target_time + slot_width) stays
                    // disarmed until the next best-block update; an early tick
                    // (now < target_time) just waits.
                }
            }
        }
    }

    /// Poll the communicator until the chain is synchronized. Returns `false`
    /// when cancelled while waiting.
    async fn wait_until_synced(&mut self) -> bool {
        if !self.communicator.is_synced() {
            tracing::warn!("chain is not synced with the network, proposing is paused");
        }
        loop {
            if self.communicator.is_synced() {
                tracing::info!("chain is synced with the network");
                return true;
            }
            tokio::select! {
                biased;
                _ = self.shutdown.recv() => return false,
                _ = tokio::time::sleep(SYNC_POLL_INTERVAL) => {}
            }
        }
    }

    /// Assemble, seal and submit one block, then wait for the consensus loop
    /// to commit it. The ack wait is what keeps proposals single-file.
    async fn propose(&self, mut adopt: Adopt, commit: Commit) {
        let started = Instant::now();

        for tx in self.mempool.pending() {
            match adopt(&tx) {
                Ok(()) => {}
                Err(AdoptError::BadTx) | Err(AdoptError::KnownTx) => {
                    self.mempool.remove(&tx.id());
                }
                Err(AdoptError::GasLimitReached) => break,
                Err(AdoptError::Other(_)) => {}
            }
        }

        let (block, receipts) = match commit(&self.private_key) {
            Ok(sealed) => sealed,
            Err(error) => {
                tracing::error!(%error, "failed to seal block, slot skipped");
                return;
            }
        };

        let elapsed = started.elapsed();
        if !elapsed.is_zero() {
            let gas_used = block.header().gas_used();
            // Only re-target on meaningfully full blocks; a near-empty block
            // says nothing about packing throughput.
            if gas_used > block.header().gas_limit() / 3 {
                let budget = Duration::from_secs(self.params.tolerable_packing_time_secs);
                let target = (budget.as_nanos().saturating_mul(gas_used as u128)
                    / elapsed.as_nanos())
                .min(u64::MAX as u128) as u64;
                self.packer.set_target_gas_limit(target);
            }
        }

        tracing::info!(
            number = block.header().number(),
            id = %block.header().id(),
            txs = block.transactions().len(),
            "proposed new block"
        );

        let (ack_tx, ack_rx) = oneshot::channel();
        let event = PackedEvent {
            block,
            receipts,
            ack: ack_tx,
        };
        if self.packed_tx.send(event).await.is_err() {
            // Consensus loop is gone; the engine is shutting down.
            return;
        }
        if ack_rx.await.is_ok() {
            self.metrics.blocks_packed.inc();
        }
    }
}
