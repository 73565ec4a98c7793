//! Block, transaction and receipt aggregates for the Meridian chain.
//!
//! Everything in this crate is immutable once constructed: identifiers are
//! computed at construction time over the bincode encoding of the identifying
//! fields, so a value can never drift away from its id.

pub mod block;
pub mod error;
pub mod header;
pub mod receipt;
pub mod tx;

pub use block::Block;
pub use error::BlockError;
pub use header::Header;
pub use receipt::{LogEntry, Output, Receipt};
pub use tx::Transaction;

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// Blake2b-256 over an arbitrary byte string. The single hash primitive every
/// identifier in this crate is derived from.
pub(crate) fn hash_bytes(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}
