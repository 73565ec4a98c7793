//! Prometheus metrics for the block engine.
//!
//! The [`EngineMetrics`] struct owns a dedicated [`Registry`] that an
//! embedding node can encode into the Prometheus text exposition format.

use prometheus::{
    register_int_counter_with_registry, register_int_gauge_with_registry, IntCounter, IntGauge,
    Opts, Registry,
};

/// Counters and gauges covering both engine loops.
pub struct EngineMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Total blocks run through validation (inbound, replays and packed).
    pub blocks_processed: IntCounter,
    /// Total blocks persisted to the chain.
    pub blocks_accepted: IntCounter,
    /// Total blocks this node packed and saw committed.
    pub blocks_packed: IntCounter,
    /// Total trunk reorganizations observed.
    pub chain_reorgs: IntCounter,

    // ── Gauges ──────────────────────────────────────────────────────────
    /// Blocks currently held in the future-block heap.
    pub future_blocks: IntGauge,
    /// Blocks currently held in the orphan pool.
    pub orphan_blocks: IntGauge,
}

impl EngineMetrics {
    /// Create a fresh set of metrics, all registered under a new
    /// [`Registry`].
    pub fn new() -> Self {
        let registry = Registry::new();

        let blocks_processed = register_int_counter_with_registry!(
            Opts::new(
                "meridian_blocks_processed_total",
                "Total blocks run through validation"
            ),
            registry
        )
        .expect("failed to register blocks_processed counter");

        let blocks_accepted = register_int_counter_with_registry!(
            Opts::new(
                "meridian_blocks_accepted_total",
                "Total blocks persisted to the chain"
            ),
            registry
        )
        .expect("failed to register blocks_accepted counter");

        let blocks_packed = register_int_counter_with_registry!(
            Opts::new(
                "meridian_blocks_packed_total",
                "Total locally packed blocks committed"
            ),
            registry
        )
        .expect("failed to register blocks_packed counter");

        let chain_reorgs = register_int_counter_with_registry!(
            Opts::new(
                "meridian_chain_reorgs_total",
                "Total trunk reorganizations"
            ),
            registry
        )
        .expect("failed to register chain_reorgs counter");

        let future_blocks = register_int_gauge_with_registry!(
            Opts::new(
                "meridian_future_blocks",
                "Blocks held in the future-block heap"
            ),
            registry
        )
        .expect("failed to register future_blocks gauge");

        let orphan_blocks = register_int_gauge_with_registry!(
            Opts::new("meridian_orphan_blocks", "Blocks held in the orphan pool"),
            registry
        )
        .expect("failed to register orphan_blocks gauge");

        Self {
            registry,
            blocks_processed,
            blocks_accepted,
            blocks_packed,
            chain_reorgs,
            future_blocks,
            orphan_blocks,
        }
    }
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}
