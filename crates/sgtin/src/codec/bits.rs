//! Fixed-width bit field packing.
//!
//! Fields are appended most significant first into a 96-bit accumulator.
//! Every value is range checked against its field width before it is
//! written; nothing is truncated.

use crate::error::EncodeError;
use crate::limits::{EPC_BITS, max_value};
use crate::model::Field;

/// Writer for packing EPC fields.
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    acc: u128,
    len: u32,
}

impl BitWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self { acc: 0, len: 0 }
    }

    #[cfg(test)]
    fn len(&self) -> u32 {
        self.len
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[cfg(test)]
    fn is_full(&self) -> bool {
        self.len == EPC_BITS
    }

    /// Appends `value` as a big-endian unsigned integer of the field's width.
    #[inline]
    pub fn write(&mut self, field: Field, value: u64) -> Result<(), EncodeError> {
        let bits = field.bits();
        if value > max_value(bits) || self.len + bits > EPC_BITS {
            return Err(EncodeError::EncodingOverflow { field, value, bits });
        }
        self.acc = (self.acc << bits) | value as u128;
        self.len += bits;
        Ok(())
    }

    /// Returns the packed bits, right-aligned.
    pub fn into_bits(self) -> u128 {
        self.acc
    }
}
