//! Identifier types for blocks and transactions.
//!
//! Both are 32-byte hashes. `Ord` is derived because the future-block heap
//! breaks ordering ties on the raw id bytes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MeridianError;

/// A 32-byte block identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId([u8; 32]);

impl BlockId {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockId(")?;
        for b in &self.0[..4] {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl FromStr for BlockId {
    type Err = MeridianError;

    /// Parse a 64-hex-digit block id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        if !crate::decode_hex(s, &mut bytes) {
            return Err(MeridianError::InvalidBlockId(s.to_string()));
        }
        Ok(Self(bytes))
    }
}

/// A 32-byte transaction identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TxId([u8; 32]);

impl TxId {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId(")?;
        for b in &self.0[..4] {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl FromStr for TxId {
    type Err = MeridianError;

    /// Parse a 64-hex-digit transaction id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        if !crate::decode_hex(s, &mut bytes) {
            return Err(MeridianError::InvalidTxId(s.to_string()));
        }
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_id_parses_its_own_display() {
        let id = BlockId::new([0xC4; 32]);
        assert_eq!(id.to_string().parse::<BlockId>(), Ok(id));
    }

    #[test]
    fn block_id_rejects_wrong_length() {
        assert_eq!(
            "c4c4".parse::<BlockId>(),
            Err(MeridianError::InvalidBlockId("c4c4".to_string()))
        );
    }

    #[test]
    fn tx_id_parses_its_own_display() {
        let id = TxId::new([0x0F; 32]);
        assert_eq!(id.to_string().parse::<TxId>(), Ok(id));
    }

    #[test]
    fn tx_id_rejects_non_hex_digits() {
        let bad = "g".repeat(64);
        assert!(bad.parse::<TxId>().is_err());
    }
}
