//! Block header.

use meridian_types::{Address, BlockId, Signature};
use serde::{Deserialize, Serialize};

use crate::error::BlockError;
use crate::hash_bytes;

/// The fields a header's id commits to. Serialized with bincode and hashed;
/// the signature is excluded so signing does not change the id's preimage
/// layout.
#[derive(Serialize)]
struct IdFields<'a> {
    parent_id: &'a BlockId,
    number: u32,
    timestamp: u64,
    total_score: u64,
    gas_limit: u64,
    gas_used: u64,
    signer: &'a Address,
}

/// An immutable block header.
///
/// The id is computed once at construction; accessors are cheap copies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    parent_id: BlockId,
    number: u32,
    timestamp: u64,
    total_score: u64,
    gas_limit: u64,
    gas_used: u64,
    signer: Address,
    signature: Signature,
    id: BlockId,
}

impl Header {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        parent_id: BlockId,
        number: u32,
        timestamp: u64,
        total_score: u64,
        gas_limit: u64,
        gas_used: u64,
        signer: Address,
        signature: Signature,
    ) -> Self {
        let fields = IdFields {
            parent_id: &parent_id,
            number,
            timestamp,
            total_score,
            gas_limit,
            gas_used,
            signer: &signer,
        };
        let encoded =
            bincode::serialize(&fields).expect("header fields are always bincode-serializable");
        let id = BlockId::new(hash_bytes(&encoded));

        Self {
            parent_id,
            number,
            timestamp,
            total_score,
            gas_limit,
            gas_used,
            signer,
            signature,
            id,
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn parent_id(&self) -> BlockId {
        self.parent_id
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Block timestamp in Unix seconds.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Accumulated chain score up to and including this block. The trunk rule
    /// prefers the higher score.
    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn gas_used(&self) -> u64 {
        self.gas_used
    }

    /// The proposer that signed this header.
    ///
    /// Fails when the header is unsigned (all-zero signature); callers treat
    /// that as corrupt ledger data.
    pub fn signer(&self) -> Result<Address, BlockError> {
        if self.signature.is_zero() {
            return Err(BlockError::UnrecoverableSigner);
        }
        Ok(self.signer)
    }
}
