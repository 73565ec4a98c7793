use proptest::prelude::*;

use meridian_types::{Address, BlockId, Timestamp, TxId};

proptest! {
    /// BlockId roundtrip: new -> as_bytes -> new produces identical id.
    #[test]
    fn block_id_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let id = BlockId::new(bytes);
        prop_assert_eq!(id.as_bytes(), &bytes);
    }

    /// TxId roundtrip: new -> as_bytes -> new produces identical id.
    #[test]
    fn tx_id_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let id = TxId::new(bytes);
        prop_assert_eq!(id.as_bytes(), &bytes);
    }

    /// BlockId::is_zero is true only for all-zero bytes.
    #[test]
    fn block_id_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        let id = BlockId::new(bytes);
        prop_assert_eq!(id.is_zero(), bytes == [0u8; 32]);
    }

    /// BlockId ordering agrees with byte-wise ordering (heap tie-breaks
    /// depend on it).
    #[test]
    fn block_id_ordering_matches_bytes(a in prop::array::uniform32(0u8..),
                                       b in prop::array::uniform32(0u8..)) {
        let ia = BlockId::new(a);
        let ib = BlockId::new(b);
        prop_assert_eq!(ia.cmp(&ib), a.cmp(&b));
    }

    /// BlockId bincode serialization roundtrip.
    #[test]
    fn block_id_bincode_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let id = BlockId::new(bytes);
        let encoded = bincode::serialize(&id).unwrap();
        let decoded: BlockId = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded.as_bytes(), id.as_bytes());
    }

    /// Address roundtrip and zero detection.
    #[test]
    fn address_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let addr = Address::new(bytes);
        prop_assert_eq!(addr.as_bytes(), &bytes);
        prop_assert_eq!(addr.is_zero(), bytes == [0u8; 20]);
    }

    /// Address display is 0x-prefixed lowercase hex of all 20 bytes.
    #[test]
    fn address_display_is_hex(bytes in prop::array::uniform20(0u8..)) {
        let rendered = meridian_types::Address::new(bytes).to_string();
        prop_assert_eq!(rendered.len(), 2 + 40);
        prop_assert!(rendered.starts_with("0x"));
    }

    /// Address parses its own display form.
    #[test]
    fn address_parse_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let addr = Address::new(bytes);
        let parsed: Address = addr.to_string().parse().unwrap();
        prop_assert_eq!(parsed, addr);
    }

    /// BlockId parses its own display form.
    #[test]
    fn block_id_parse_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let id = BlockId::new(bytes);
        let parsed: BlockId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// has_expired is exactly `now >= ts + duration` (saturating).
    #[test]
    fn timestamp_expiry(ts in 0u64..u64::MAX / 2, dur in 0u64..u64::MAX / 2, now in 0u64..u64::MAX) {
        let t = Timestamp::new(ts);
        prop_assert_eq!(t.has_expired(dur, Timestamp::new(now)), now >= ts + dur);
    }

    /// elapsed_since saturates at zero for timestamps in the future.
    #[test]
    fn timestamp_elapsed_saturates(ts in 0u64..u64::MAX, now in 0u64..u64::MAX) {
        let elapsed = Timestamp::new(ts).elapsed_since(Timestamp::new(now));
        prop_assert_eq!(elapsed, now.saturating_sub(ts));
    }
}
