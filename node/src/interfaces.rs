//! Contracts of the collaborators the engine consumes.
//!
//! The engine validates nothing and persists nothing itself; it coordinates.
//! Each concern lives behind one of these traits: block validation
//! ([`Consensus`]), chain storage ([`Chain`]), peer networking
//! ([`Communicator`]), the transaction pool ([`Mempool`]), block assembly
//! ([`Packer`]) and the append-only log index ([`LogDb`]).
//!
//! Every call is synchronous from the loops' perspective: no collaborator
//! method may suspend indefinitely. Implementations must be thread-safe; the
//! mempool in particular is touched from both loops.

use meridian_block::{Block, Header, LogEntry, Receipt, Transaction};
use meridian_types::{Address, BlockId, PrivateKey, TxId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

// ── Consensus ───────────────────────────────────────────────────────────

/// Outcome of a successful block validation.
pub struct Verdict {
    /// Whether the block lands on the trunk (canonical best chain) or a side
    /// branch.
    pub trunk: bool,
    /// Execution receipts, one per transaction in block order.
    pub receipts: Vec<Receipt>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConsentError {
    /// The block's timestamp is ahead of wall time; hold it and retry later.
    #[error("block timestamp is ahead of wall time")]
    FutureBlock,

    /// The block's parent is not in the chain; hold it until the parent
    /// arrives.
    #[error("parent block not found")]
    ParentNotFound,

    /// Anything else. Peers are untrusted, so these blocks are dropped
    /// without ceremony.
    #[error("block rejected: {0}")]
    Rejected(String),
}

/// Block validation.
pub trait Consensus: Send + Sync {
    /// Validate a block against the chain at wall time `now` (Unix seconds).
    fn consent(&self, block: &Block, now: u64) -> Result<Verdict, ConsentError>;

    /// Classify a locally packed header as trunk or side branch. The block is
    /// not re-validated; it was produced by this node.
    fn is_trunk(&self, header: &Header) -> Result<bool, ConsentError>;
}

// ── Chain ───────────────────────────────────────────────────────────────

/// Blocks that ceased to be on the trunk as a consequence of an insertion,
/// newest first. Empty when no reorganization occurred.
#[derive(Debug, Default)]
pub struct Fork {
    pub branch: Vec<Block>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("block {0} not found")]
    NotFound(BlockId),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Chain storage.
pub trait Chain: Send + Sync {
    /// The current trunk tip.
    fn best_block(&self) -> Result<Block, ChainError>;

    /// Persist a block and its receipts. `trunk` records the classification
    /// the consensus collaborator made. Returns the fork descriptor for any
    /// reorganization this insertion caused.
    fn add_block(&self, block: &Block, receipts: &[Receipt], trunk: bool)
        -> Result<Fork, ChainError>;
}

// ── Communicator ────────────────────────────────────────────────────────

/// An inbound block event from a peer.
#[derive(Clone, Debug)]
pub struct BlockAnnouncement {
    pub block: Block,
    /// Whether the communicator considers the local chain synchronized at the
    /// time this block arrived.
    pub is_synced: bool,
}

/// Peer-to-peer networking, seen from the engine.
pub trait Communicator: Send + Sync {
    /// Start delivering inbound block events into `sink`. The engine creates
    /// the channel and sizes its buffer; drop policy under backpressure is
    /// the communicator's concern.
    fn subscribe_block(&self, sink: mpsc::Sender<BlockAnnouncement>);

    /// Stop delivering inbound block events.
    fn unsubscribe(&self);

    /// Announce a block to peers.
    fn broadcast_block(&self, block: &Block);

    /// Whether the local chain is close enough to the network tip that local
    /// proposals are meaningful.
    fn is_synced(&self) -> bool;
}

// ── Mempool ─────────────────────────────────────────────────────────────

/// The transaction pool. Thread-safe; the packer reads and removes while the
/// consensus loop re-adds during reorganizations. Duplicate adds must be
/// tolerated.
pub trait Mempool: Send + Sync {
    fn pending(&self) -> Vec<Transaction>;

    fn add(&self, tx: Transaction);

    fn remove(&self, id: &TxId);
}

// ── Packer ──────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdoptError {
    /// The transaction is invalid and should leave the mempool.
    #[error("transaction is invalid")]
    BadTx,

    /// The transaction is already on chain and should leave the mempool.
    #[error("transaction already on chain")]
    KnownTx,

    /// No room left in the block; stop adopting.
    #[error("block gas limit reached")]
    GasLimitReached,

    /// Transient condition; the transaction stays in the mempool.
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PackError {
    /// This node is not scheduled to propose on the given parent.
    #[error("proposer is not scheduled for this parent")]
    NotScheduled,

    #[error("state error: {0}")]
    State(String),
}

/// Attempts to include one transaction in the block under assembly.
pub type Adopt = Box<dyn FnMut(&Transaction) -> Result<(), AdoptError> + Send>;

/// Finalizes the block under assembly, sealing it with the proposer key.
pub type Commit = Box<dyn FnOnce(&PrivateKey) -> Result<(Block, Vec<Receipt>), PackError> + Send>;

/// One prepared proposing slot.
pub struct PackingSlot {
    /// Wall-clock second at which this node is permitted to propose.
    pub target_time: u64,
    pub adopt: Adopt,
    pub commit: Commit,
}

/// Block assembly.
pub trait Packer: Send + Sync {
    /// Open a packing slot on top of `parent`. Returns the slot's scheduled
    /// wall-clock second together with the adopt/commit callables bound to it.
    fn prepare(&self, parent: &Header, now: u64) -> Result<PackingSlot, PackError>;

    /// Feed the adaptive gas target back into assembly.
    fn set_target_gas_limit(&self, limit: u64);
}

// ── Log database ────────────────────────────────────────────────────────

/// One indexed log event, flattened with its block and transaction context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub block_id: BlockId,
    pub block_number: u32,
    pub block_timestamp: u64,
    /// Position of this log among all logs of the block.
    pub index: u32,
    pub tx_id: TxId,
    pub tx_origin: Address,
    pub address: Address,
    pub topics: Vec<[u8; 32]>,
    pub data: Vec<u8>,
}

impl LogRecord {
    pub fn new(
        header: &Header,
        index: u32,
        tx_id: TxId,
        tx_origin: Address,
        entry: LogEntry,
    ) -> Self {
        Self {
            block_id: header.id(),
            block_number: header.number(),
            block_timestamp: header.timestamp(),
            index,
            tx_id,
            tx_origin,
            address: entry.address,
            topics: entry.topics,
            data: entry.data,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LogDbError {
    #[error("log store error: {0}")]
    Storage(String),
}

/// Append-only log index.
pub trait LogDb: Send + Sync {
    /// Atomically record the logs of one trunk block together with the ids of
    /// the blocks a reorganization removed from the trunk.
    fn insert(&self, logs: Vec<LogRecord>, forked: Vec<BlockId>) -> Result<(), LogDbError>;
}
