//! Events exchanged between the two engine loops.

use meridian_block::{Block, Receipt};
use tokio::sync::oneshot;

/// Decision record produced by the consensus loop just before it mutates the
/// chain.
pub(crate) struct NewBlockEvent {
    pub block: Block,
    pub receipts: Vec<Receipt>,
    pub trunk: bool,
    /// Whether the block arrived as part of initial synchronization. Replays
    /// from the holding structures and locally packed blocks always carry
    /// `false`.
    pub is_synced: bool,
}

/// A locally packed block on its way to the consensus loop.
///
/// `ack` is signalled once the consensus loop has committed the block; the
/// packer awaits it before preparing the next slot, which bounds the engine to
/// one in-flight proposal. If the consensus loop drops the sender instead, the
/// packer's wait resolves with a closed-channel error and the slot is simply
/// lost.
pub struct PackedEvent {
    pub block: Block,
    pub receipts: Vec<Receipt>,
    pub ack: oneshot::Sender<()>,
}
