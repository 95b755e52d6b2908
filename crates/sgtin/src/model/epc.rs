//! The 96-bit SGTIN EPC value and its fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::sgtin::decode;
use crate::error::DecodeError;
use crate::limits::{
    COMPANY_PREFIX_BITS, EPC_BITS, FILTER_BITS, HEADER_BITS, ITEM_REFERENCE_BITS, PARTITION_BITS,
    SERIAL_BITS, max_value,
};

/// One of the six fixed-width SGTIN-96 fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Header,
    Filter,
    Partition,
    CompanyPrefix,
    ItemReference,
    Serial,
}

impl Field {
    /// All fields in wire order, most significant first.
    pub const ALL: [Field; 6] = [
        Field::Header,
        Field::Filter,
        Field::Partition,
        Field::CompanyPrefix,
        Field::ItemReference,
        Field::Serial,
    ];

    /// Returns the field's width in bits.
    pub fn bits(&self) -> u32 {
        match self {
            Field::Header => HEADER_BITS,
            Field::Filter => FILTER_BITS,
            Field::Partition => PARTITION_BITS,
            Field::CompanyPrefix => COMPANY_PREFIX_BITS,
            Field::ItemReference => ITEM_REFERENCE_BITS,
            Field::Serial => SERIAL_BITS,
        }
    }

    /// Distance of the field's least significant bit from bit 0.
    pub fn shift(&self) -> u32 {
        let mut consumed = 0;
        for field in Field::ALL {
            consumed += field.bits();
            if field == *self {
                break;
            }
        }
        EPC_BITS - consumed
    }

    /// Returns the field name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Header => "header",
            Field::Filter => "filter",
            Field::Partition => "partition",
            Field::CompanyPrefix => "company prefix",
            Field::ItemReference => "item reference",
            Field::Serial => "serial",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A 96-bit SGTIN-96 Electronic Product Code.
///
/// Built by [`crate::codec::encode`] or parsed from hex. Rendered as 24
/// uppercase hex characters by `Display`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Epc(u128);

impl Epc {
    /// Wraps raw bits. Bits above 96 are discarded.
    pub(crate) fn from_bits(bits: u128) -> Self {
        Self(bits & ((1u128 << EPC_BITS) - 1))
    }

    /// Returns the 96 bits, right-aligned in a `u128`.
    pub fn as_u128(&self) -> u128 {
        self.0
    }

    /// Returns the 12 big-endian bytes of the EPC.
    pub fn to_bytes(&self) -> [u8; 12] {
        let mut out = [0u8; 12];
        out.copy_from_slice(&self.0.to_be_bytes()[4..]);
        out
    }

    /// Extracts a single field's value.
    pub fn field(&self, field: Field) -> u64 {
        ((self.0 >> field.shift()) as u64) & max_value(field.bits())
    }

    pub fn header(&self) -> u8 {
        self.field(Field::Header) as u8
    }

    pub fn filter(&self) -> u8 {
        self.field(Field::Filter) as u8
    }

    pub fn partition(&self) -> u8 {
        self.field(Field::Partition) as u8
    }

    pub fn company_prefix(&self) -> u64 {
        self.field(Field::CompanyPrefix)
    }

    pub fn item_reference(&self) -> u64 {
        self.field(Field::ItemReference)
    }

    pub fn serial(&self) -> u64 {
        self.field(Field::Serial)
    }

    /// Uppercase hex, zero-padded to 24 characters.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Epc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:024X}", self.0)
    }
}

impl fmt::Debug for Epc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Epc({self})")
    }
}

impl FromStr for Epc {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl TryFrom<String> for Epc {
    type Error = DecodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        decode(&value)
    }
}

impl From<Epc> for String {
    fn from(epc: Epc) -> Self {
        epc.to_string()
    }
}
