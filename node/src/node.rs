//! Engine wiring: builds the channels between the two loops and spawns them.

use std::sync::Arc;

use meridian_types::{ChainParams, PrivateKey};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::consensus::ConsensusLoop;
use crate::handoff::best_block_handoff;
use crate::interfaces::{Chain, Communicator, Consensus, LogDb, Mempool, Packer};
use crate::metrics::EngineMetrics;
use crate::proposer::PackerLoop;
use crate::shutdown::ShutdownController;

/// The block-processing engine of one node.
///
/// Owns nothing but references to its collaborators and the proposer key;
/// all state lives inside the two loops once [`start`](Self::start) spawns
/// them. Every operational node runs exactly one instance.
pub struct BlockEngine {
    pub consensus: Arc<dyn Consensus>,
    pub chain: Arc<dyn Chain>,
    pub communicator: Arc<dyn Communicator>,
    pub mempool: Arc<dyn Mempool>,
    pub packer: Arc<dyn Packer>,
    pub logdb: Arc<dyn LogDb>,
    /// Key the packer seals proposed blocks with.
    pub private_key: PrivateKey,
    pub params: ChainParams,
}

impl BlockEngine {
    /// Spawn the consensus and packer loops. The returned handles complete
    /// once the shutdown controller fires; the caller joins them to wait for
    /// a clean stop.
    pub fn start(self, shutdown: &ShutdownController) -> (Vec<JoinHandle<()>>, Arc<EngineMetrics>) {
        let metrics = Arc::new(EngineMetrics::new());

        // Capacity one: the ack rendezvous already bounds proposals to a
        // single in-flight event.
        let (packed_tx, packed_rx) = mpsc::channel(1);
        let (handoff, best_rx) = best_block_handoff();

        let consensus_loop = ConsensusLoop {
            consensus: Arc::clone(&self.consensus),
            chain: Arc::clone(&self.chain),
            communicator: Arc::clone(&self.communicator),
            mempool: Arc::clone(&self.mempool),
            logdb: Arc::clone(&self.logdb),
            handoff: handoff.clone(),
            packed_rx,
            shutdown: shutdown.subscribe(),
            params: self.params,
            metrics: Arc::clone(&metrics),
        };

        let packer_loop = PackerLoop {
            chain: self.chain,
            communicator: self.communicator,
            mempool: self.mempool,
            packer: self.packer,
            handoff,
            best_rx,
            packed_tx,
            shutdown: shutdown.subscribe(),
            params: self.params,
            private_key: self.private_key,
            metrics: Arc::clone(&metrics),
        };

        let mut handles = Vec::with_capacity(2);
        handles.push(tokio::spawn(consensus_loop.run()));
        tracing::info!("block consensus loop started");
        handles.push(tokio::spawn(packer_loop.run()));
        tracing::info!("block packer loop started");

        (handles, metrics)
    }
}
