//! Fixed layout constants for SGTIN-96 and batch sizing.
//!
//! Field order, most significant first:
//!
//! ```text
//! | header:8 | filter:3 | partition:3 | company prefix:24 | item reference:20 | serial:38 |
//! ```

/// Total EPC width in bits.
pub const EPC_BITS: u32 = 96;

/// Length of the rendered hex form (4 bits per character).
pub const EPC_HEX_LEN: usize = (EPC_BITS / 4) as usize;

/// SGTIN-96 header byte.
pub const HEADER: u8 = 0x30;
pub const HEADER_BITS: u32 = 8;

/// Filter value written for every tag (point-of-sale trade item).
pub const FILTER: u8 = 0b001;
pub const FILTER_BITS: u32 = 3;

/// Partition 5 selects a 7-digit company prefix and 5-digit item reference.
pub const PARTITION: u8 = 0b101;
pub const PARTITION_BITS: u32 = 3;

pub const COMPANY_PREFIX_BITS: u32 = 24;
pub const ITEM_REFERENCE_BITS: u32 = 20;
pub const SERIAL_BITS: u32 = 38;

/// Largest serial representable in the 38-bit field (274,877,906,943).
pub const SERIAL_MAX: u64 = (1u64 << SERIAL_BITS) - 1;

/// Number of ASCII digits in a UPC-A code.
pub const UPC_LEN: usize = 12;

/// Digits taken from the UPC for the company prefix (a `0` is prepended).
pub const COMPANY_PREFIX_DIGITS: usize = 6;

/// Digits taken from the UPC for the item reference.
pub const ITEM_REFERENCE_DIGITS: usize = 5;

/// Maximum records returned by a preview.
pub const PREVIEW_LEN: u64 = 10;

/// Divisor for the thousands ("K") range in chunk labels.
pub const LABEL_UNIT: u64 = 1000;

/// Returns the largest value that fits in `bits` bits.
#[inline]
pub const fn max_value(bits: u32) -> u64 {
    if bits >= 64 { u64::MAX } else { (1u64 << bits) - 1 }
}
