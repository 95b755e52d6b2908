//! UPC-A item codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EncodeError, UpcFault};
use crate::limits::{COMPANY_PREFIX_DIGITS, ITEM_REFERENCE_DIGITS, UPC_LEN};

/// A 12-digit UPC-A code.
///
/// Only the shape is validated (exactly 12 ASCII digits). The trailing check
/// digit is carried but never enforced; see [`Upc::check_digit_valid`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Upc([u8; UPC_LEN]);

impl Upc {
    /// Parses a UPC, rejecting anything that is not exactly 12 decimal digits.
    pub fn parse(input: &str) -> Result<Self, EncodeError> {
        let invalid = |reason| EncodeError::InvalidUpc {
            input: input.to_string(),
            reason,
        };

        let count = input.chars().count();
        if count != UPC_LEN {
            return Err(invalid(UpcFault::WrongLength(count)));
        }
        if let Some((position, found)) = input.chars().enumerate().find(|(_, c)| !c.is_ascii_digit()) {
            return Err(invalid(UpcFault::NonDigit { position, found }));
        }

        let mut digits = [0u8; UPC_LEN];
        digits.copy_from_slice(input.as_bytes());
        Ok(Self(digits))
    }

    /// Returns the ASCII digits.
    pub fn as_bytes(&self) -> &[u8; UPC_LEN] {
        &self.0
    }

    /// GS1 company prefix: `"0"` followed by the first six digits, as an integer.
    ///
    /// The leading zero does not change the numeric value, it only fixes the
    /// prefix at seven digits for partition 5.
    pub fn company_prefix(&self) -> u64 {
        digits_value(&self.0[..COMPANY_PREFIX_DIGITS])
    }

    /// Item reference: digits 7 through 11, as an integer.
    pub fn item_reference(&self) -> u64 {
        let start = COMPANY_PREFIX_DIGITS;
        digits_value(&self.0[start..start + ITEM_REFERENCE_DIGITS])
    }

    /// The trailing (12th) digit as carried in the code.
    pub fn check_digit(&self) -> u8 {
        self.0[UPC_LEN - 1] - b'0'
    }

    /// Computes the GS1 mod-10 check digit over the first 11 digits.
    pub fn expected_check_digit(&self) -> u8 {
        let sum: u32 = self.0[..UPC_LEN - 1]
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let d = (d - b'0') as u32;
                if i % 2 == 0 { d * 3 } else { d }
            })
            .sum();
        ((10 - sum % 10) % 10) as u8
    }

    /// Returns true if the trailing digit matches the computed check digit.
    pub fn check_digit_valid(&self) -> bool {
        self.check_digit() == self.expected_check_digit()
    }
}

fn digits_value(digits: &[u8]) -> u64 {
    digits
        .iter()
        .fold(0u64, |acc, d| acc * 10 + (d - b'0') as u64)
}

impl fmt::Display for Upc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &d in &self.0 {
            fmt::Write::write_char(f, d as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Upc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Upc({self})")
    }
}

impl FromStr for Upc {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Upc {
    type Error = EncodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Upc> for String {
    fn from(upc: Upc) -> Self {
        upc.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let upc = Upc::parse("012345678905").unwrap();
        assert_eq!(upc.to_string(), "012345678905");
        assert_eq!(upc.company_prefix(), 12345);
        assert_eq!(upc.item_reference(), 67890);
        assert_eq!(upc.check_digit(), 5);
    }

    #[test]
    fn test_parse_wrong_length() {
        for input in ["", "01234567890", "0123456789051"] {
            let err = Upc::parse(input).unwrap_err();
            assert!(
                matches!(
                    err,
                    EncodeError::InvalidUpc {
                        reason: UpcFault::WrongLength(_),
                        ..
                    }
                ),
                "failed for {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_non_digit() {
        let err = Upc::parse("01234567890X").unwrap_err();
        assert_eq!(
            err,
            EncodeError::InvalidUpc {
                input: "01234567890X".to_string(),
                reason: UpcFault::NonDigit {
                    position: 11,
                    found: 'X'
                },
            }
        );

        // Multi-byte characters count as one character, not several bytes.
        let err = Upc::parse("01234567890é").unwrap_err();
        assert!(matches!(
            err,
            EncodeError::InvalidUpc {
                reason: UpcFault::NonDigit { position: 11, .. },
                ..
            }
        ));

        assert!(Upc::parse(" 12345678905").is_err());
        assert!(Upc::parse("-12345678905").is_err());
    }

    #[test]
    fn test_check_digit() {
        assert!(Upc::parse("012345678905").unwrap().check_digit_valid());
        assert!(Upc::parse("036000291452").unwrap().check_digit_valid());

        // Wrong check digit is still a valid UPC for encoding purposes.
        let upc = Upc::parse("012345678900").unwrap();
        assert!(!upc.check_digit_valid());
        assert_eq!(upc.expected_check_digit(), 5);
    }

    #[test]
    fn test_extreme_digits() {
        let upc = Upc::parse("999999999999").unwrap();
        assert_eq!(upc.company_prefix(), 999_999);
        assert_eq!(upc.item_reference(), 99_999);

        let upc = Upc::parse("000000000000").unwrap();
        assert_eq!(upc.company_prefix(), 0);
        assert_eq!(upc.item_reference(), 0);
    }
}
