//! Execution receipts.
//!
//! One receipt per transaction; each receipt carries the ordered outputs of
//! the transaction's clauses, and each output carries the ordered log events
//! it produced. The consensus loop walks this nesting to build the log-index
//! batch for every trunk block.

use meridian_types::Address;
use serde::{Deserialize, Serialize};

/// A log event emitted during execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Contract address that emitted the event.
    pub address: Address,
    /// Indexed topics.
    pub topics: Vec<[u8; 32]>,
    /// Opaque event data.
    pub data: Vec<u8>,
}

/// The result of executing one clause of a transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub logs: Vec<LogEntry>,
}

/// The result of executing one transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub outputs: Vec<Output>,
}
