//! Protocol parameters governing the block cadence.

use serde::{Deserialize, Serialize};

/// Chain-wide scheduling parameters shared by every node.
///
/// Both loops of the block engine read these: the consensus loop paces
/// future-block replays on `block_interval_secs`, and the packer loop uses it
/// as the width of a proposing slot and `tolerable_packing_time_secs` as the
/// packing-time budget the adaptive gas target converges on.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ChainParams {
    /// Seconds between consecutive proposing slots.
    pub block_interval_secs: u64,

    /// Wall-clock budget, in seconds, that packing one block should stay
    /// within. Drives the adaptive target gas limit.
    pub tolerable_packing_time_secs: u64,
}

impl Default for ChainParams {
    fn default() -> Self {
        Self {
            block_interval_secs: 10,
            tolerable_packing_time_secs: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_protocol_constants() {
        let params = ChainParams::default();
        assert_eq!(params.block_interval_secs, 10);
        assert_eq!(params.tolerable_packing_time_secs, 2);
    }
}
