//! Block-processing engine for the Meridian proof-of-authority chain.
//!
//! The engine is a coordinated pair of long-lived tokio tasks:
//!
//! - the **consensus loop** admits blocks (inbound from peers, replayed from
//!   the future-block heap and orphan pool, or locally packed) and is the
//!   sole writer of the chain and the log database;
//! - the **packer loop** waits until the node is synchronized, then assembles
//!   a candidate block from the mempool on each proposing slot and hands it
//!   to the consensus loop for commitment.
//!
//! Between them sit the holding structures (future-block heap, orphan pool)
//! and a coalescing best-block hand-off that always shows the packer the
//! latest trunk tip. External concerns such as validation, storage,
//! networking, the mempool, the log database and block assembly are
//! collaborators behind the traits in [`interfaces`].

pub mod config;
pub mod consensus;
pub mod error;
pub mod events;
pub mod future_heap;
pub mod handoff;
pub mod interfaces;
pub mod logging;
pub mod metrics;
pub mod node;
pub mod orphans;
pub mod proposer;
pub mod shutdown;

pub use config::EngineConfig;
pub use error::EngineError;
pub use metrics::EngineMetrics;
pub use node::BlockEngine;
pub use shutdown::ShutdownController;
