//! SGTIN-96 encoding (partition 5: 7-digit company prefix, 5-digit item
//! reference) and the matching hex parser.

use crate::codec::bits::BitWriter;
use crate::error::{DecodeError, EncodeError};
use crate::limits::{EPC_HEX_LEN, FILTER, HEADER, PARTITION, SERIAL_MAX};
use crate::model::{Epc, Field, Upc};

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a UPC and serial into an SGTIN-96 EPC.
///
/// The UPC's check digit is not part of the payload. Serials above
/// 2^38 - 1 are rejected with `InvalidSerial`.
///
/// ```rust
/// use sgtin::{Upc, encode};
///
/// let upc = Upc::parse("012345678905").unwrap();
/// let epc = encode(&upc, 1).unwrap();
/// assert_eq!(epc.to_hex(), "303400C0E4424C8000000001");
/// ```
pub fn encode(upc: &Upc, serial: u64) -> Result<Epc, EncodeError> {
    if serial > SERIAL_MAX {
        return Err(EncodeError::InvalidSerial {
            input: serial.to_string(),
        });
    }

    let mut writer = BitWriter::new();
    writer.write(Field::Header, HEADER as u64)?;
    writer.write(Field::Filter, FILTER as u64)?;
    writer.write(Field::Partition, PARTITION as u64)?;
    writer.write(Field::CompanyPrefix, upc.company_prefix())?;
    writer.write(Field::ItemReference, upc.item_reference())?;
    writer.write(Field::Serial, serial)?;
    Ok(Epc::from_bits(writer.into_bits()))
}

/// Validates a UPC string and encodes it with `serial`.
pub fn encode_upc(upc: &str, serial: u64) -> Result<Epc, EncodeError> {
    encode(&Upc::parse(upc)?, serial)
}

// =============================================================================
// DECODING
// =============================================================================

/// Parses a 24-character hex EPC (either case) and checks that it is an
/// SGTIN-96 value with partition 5. The filter value is not checked.
pub fn decode(hex: &str) -> Result<Epc, DecodeError> {
    let len = hex.chars().count();
    if len != EPC_HEX_LEN {
        return Err(DecodeError::InvalidLength { len });
    }

    let mut bits: u128 = 0;
    for (position, found) in hex.chars().enumerate() {
        let nibble = found
            .to_digit(16)
            .ok_or(DecodeError::InvalidHexChar { position, found })?;
        bits = (bits << 4) | nibble as u128;
    }

    let epc = Epc::from_bits(bits);
    if epc.header() != HEADER {
        return Err(DecodeError::InvalidHeader {
            found: epc.header(),
        });
    }
    if epc.partition() != PARTITION {
        return Err(DecodeError::InvalidPartition {
            found: epc.partition(),
        });
    }
    Ok(epc)
}
