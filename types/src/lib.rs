//! Fundamental types for the Meridian proof-of-authority chain.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: block and transaction identifiers, signer addresses, key
//! material, timestamps and the protocol parameters that govern the block
//! cadence.

pub mod address;
pub mod error;
pub mod ids;
pub mod keys;
pub mod params;
pub mod time;

pub use address::Address;
pub use error::MeridianError;
pub use ids::{BlockId, TxId};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use params::ChainParams;
pub use time::Timestamp;

/// Decode `src` as hex (either case) into `dst`. Returns `false` when the
/// length or a digit is wrong.
pub(crate) fn decode_hex(src: &str, dst: &mut [u8]) -> bool {
    let src = src.as_bytes();
    if src.len() != dst.len() * 2 {
        return false;
    }
    for (i, byte) in dst.iter_mut().enumerate() {
        match (hex_digit(src[2 * i]), hex_digit(src[2 * i + 1])) {
            (Some(hi), Some(lo)) => *byte = hi << 4 | lo,
            _ => return false,
        }
    }
    true
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
