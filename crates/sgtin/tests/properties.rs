//! Property tests for the encoder and the partitioner.

use proptest::prelude::*;

use sgtin::limits::SERIAL_MAX;
use sgtin::{EncodeError, Epc, PartitionError, Upc, encode, encode_upc, partition};

fn upc_strategy() -> impl Strategy<Value = String> {
    "[0-9]{12}"
}

proptest! {
    #[test]
    fn encode_is_24_uppercase_hex(code in upc_strategy(), serial in 0..=SERIAL_MAX) {
        let upc = Upc::parse(&code).unwrap();
        let hex = encode(&upc, serial).unwrap().to_hex();
        prop_assert_eq!(hex.len(), 24);
        prop_assert!(hex.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        prop_assert!(hex.starts_with("30"));
    }

    #[test]
    fn encode_fields_round_trip(code in upc_strategy(), serial in 0..=SERIAL_MAX) {
        let upc = Upc::parse(&code).unwrap();
        let hex = encode(&upc, serial).unwrap().to_hex();

        let epc: Epc = hex.parse().unwrap();
        prop_assert_eq!(epc.header(), 0x30);
        prop_assert_eq!(epc.filter(), 0b001);
        prop_assert_eq!(epc.partition(), 0b101);
        prop_assert_eq!(epc.company_prefix(), code[..6].parse::<u64>().unwrap());
        prop_assert_eq!(epc.item_reference(), code[6..11].parse::<u64>().unwrap());
        prop_assert_eq!(epc.serial(), serial);
    }

    #[test]
    fn encode_is_deterministic(code in upc_strategy(), serial in 0..=SERIAL_MAX) {
        prop_assert_eq!(encode_upc(&code, serial), encode_upc(&code, serial));
    }

    #[test]
    fn encode_rejects_serial_beyond_38_bits(code in upc_strategy(), serial in (SERIAL_MAX + 1)..=u64::MAX) {
        let upc = Upc::parse(&code).unwrap();
        let is_invalid_serial = matches!(encode(&upc, serial), Err(EncodeError::InvalidSerial { .. }));
        prop_assert!(is_invalid_serial);
    }

    #[test]
    fn encode_rejects_wrong_length(code in "[0-9]{0,11}|[0-9]{13,20}", serial in 0..1000u64) {
        let is_invalid_upc = matches!(encode_upc(&code, serial), Err(EncodeError::InvalidUpc { .. }));
        prop_assert!(is_invalid_upc);
    }

    #[test]
    fn encode_rejects_non_digit(
        prefix in "[0-9]{0,11}",
        bad in "[^0-9]",
        serial in 0..1000u64,
    ) {
        let mut code = prefix;
        code.push_str(&bad);
        while code.chars().count() < 12 {
            code.push('0');
        }
        let is_invalid_upc = matches!(encode_upc(&code, serial), Err(EncodeError::InvalidUpc { .. }));
        prop_assert!(is_invalid_upc);
    }

    #[test]
    fn partition_covers_range_exactly(
        start in 0..1_000_000u64,
        total in 1..20_000u64,
        max in 1..5_000u64,
    ) {
        let chunks: Vec<_> = partition(total, start, max).unwrap().collect();
        prop_assert_eq!(chunks.len() as u64, total.div_ceil(max));

        let mut expected_start = start;
        for (i, chunk) in chunks.iter().enumerate() {
            prop_assert_eq!(chunk.index, i as u64 + 1);
            prop_assert_eq!(chunk.start_serial, expected_start);
            prop_assert!(chunk.end_serial >= chunk.start_serial);
            prop_assert!(chunk.len() <= max);
            if i + 1 < chunks.len() {
                prop_assert_eq!(chunk.len(), max);
            }
            expected_start = chunk.end_serial + 1;
        }
        prop_assert_eq!(expected_start, start + total);
    }

    #[test]
    fn partition_rejects_zero_sizes(start in 0..1_000_000u64, n in 0..10_000u64) {
        let zero_total = matches!(partition(0, start, n), Err(PartitionError::InvalidBatchSize { .. }));
        let zero_max = matches!(partition(n, start, 0), Err(PartitionError::InvalidBatchSize { .. }));
        prop_assert!(zero_total);
        prop_assert!(zero_max);
    }

    #[test]
    fn partition_rejects_range_past_ceiling(
        start in (SERIAL_MAX - 10_000)..=SERIAL_MAX,
        extra in 1..10_000u64,
        max in 1..1_000u64,
    ) {
        let total = SERIAL_MAX - start + 1 + extra;
        let overflow = matches!(
            partition(total, start, max),
            Err(PartitionError::SerialRangeOverflow { .. })
        );
        prop_assert!(overflow);
    }
}
