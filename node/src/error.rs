use thiserror::Error;

use crate::interfaces::{ChainError, LogDbError};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("chain error: {0}")]
    Chain(#[from] ChainError),

    #[error("log database error: {0}")]
    LogDb(#[from] LogDbError),

    #[error("block error: {0}")]
    Block(#[from] meridian_block::BlockError),

    #[error("config error: {0}")]
    Config(String),
}
