//! Transactions.

use meridian_types::{Address, Signature, TxId};
use serde::{Deserialize, Serialize};

use crate::error::BlockError;
use crate::hash_bytes;

#[derive(Serialize)]
struct IdFields<'a> {
    nonce: u64,
    gas: u64,
    payload: &'a [u8],
    origin: &'a Address,
}

/// An immutable transaction.
///
/// The payload is opaque to the engine; execution and validation belong to the
/// consensus and packing collaborators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    nonce: u64,
    gas: u64,
    payload: Vec<u8>,
    origin: Address,
    signature: Signature,
    id: TxId,
}

impl Transaction {
    pub fn new(
        nonce: u64,
        gas: u64,
        payload: Vec<u8>,
        origin: Address,
        signature: Signature,
    ) -> Self {
        let fields = IdFields {
            nonce,
            gas,
            payload: &payload,
            origin: &origin,
        };
        let encoded =
            bincode::serialize(&fields).expect("transaction fields are always bincode-serializable");
        let id = TxId::new(hash_bytes(&encoded));

        Self {
            nonce,
            gas,
            payload,
            origin,
            signature,
            id,
        }
    }

    pub fn id(&self) -> TxId {
        self.id
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn gas(&self) -> u64 {
        self.gas
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The account that signed this transaction.
    ///
    /// Fails when the transaction is unsigned (all-zero signature).
    pub fn signer(&self) -> Result<Address, BlockError> {
        if self.signature.is_zero() {
            return Err(BlockError::UnrecoverableSigner);
        }
        Ok(self.origin)
    }
}
