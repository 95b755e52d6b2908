//! Serial numbers within a UPC's numbering space.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EncodeError;
use crate::limits::SERIAL_MAX;

/// A serial number that fits the 38-bit SGTIN-96 serial field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct SerialNumber(u64);

impl SerialNumber {
    pub const MIN: SerialNumber = SerialNumber(0);
    pub const MAX: SerialNumber = SerialNumber(SERIAL_MAX);

    /// Wraps a serial, rejecting values above 2^38 - 1.
    pub fn new(value: u64) -> Result<Self, EncodeError> {
        if value > SERIAL_MAX {
            return Err(EncodeError::InvalidSerial {
                input: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses a decimal serial. Negative numbers, non-numeric text and values
/// beyond the 38-bit ceiling are all `InvalidSerial`.
impl FromStr for SerialNumber {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EncodeError::InvalidSerial {
            input: s.to_string(),
        };
        // u64::from_str accepts a leading '+', which is not a serial.
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let value: u64 = s.parse().map_err(|_| invalid())?;
        Self::new(value).map_err(|_| invalid())
    }
}

impl TryFrom<u64> for SerialNumber {
    type Error = EncodeError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SerialNumber> for u64 {
    fn from(serial: SerialNumber) -> Self {
        serial.0
    }
}
