//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for the Meridian protocol.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeridianError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid block id: {0}")]
    InvalidBlockId(String),

    #[error("invalid transaction id: {0}")]
    InvalidTxId(String),

    #[error("invalid signature")]
    InvalidSignature,

    #[error("{0}")]
    Other(String),
}
