//! Sequential allocation of serial ranges for successive print jobs.

use serde::{Deserialize, Serialize};

use crate::error::PartitionError;
use crate::limits::SERIAL_MAX;

/// An inclusive range of serials handed out by a [`SerialCursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialRange {
    pub start: u64,
    pub end: u64,
}

impl SerialRange {
    pub fn quantity(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Tracks the last serial issued for a UPC.
///
/// Each allocation starts immediately after the current serial and moves
/// the cursor to the end of the new range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SerialCursor {
    current: u64,
}

impl SerialCursor {
    /// Creates a cursor whose last issued serial is `current`.
    pub fn new(current: u64) -> Self {
        Self { current }
    }

    /// Last issued serial.
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Reserves the next `quantity` serials.
    ///
    /// On error the cursor is left unchanged.
    pub fn allocate(&mut self, quantity: u64) -> Result<SerialRange, PartitionError> {
        if quantity == 0 {
            return Err(PartitionError::EmptyRange);
        }
        let overflow = || PartitionError::SerialRangeOverflow {
            start_serial: self.current.saturating_add(1),
            total_quantity: quantity,
        };
        let end = self.current.checked_add(quantity).ok_or_else(overflow)?;
        if end > SERIAL_MAX {
            return Err(overflow());
        }
        let range = SerialRange {
            start: self.current + 1,
            end,
        };
        self.current = end;
        Ok(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_sequential() {
        let mut cursor = SerialCursor::new(0);
        let first = cursor.allocate(500).unwrap();
        assert_eq!(first, SerialRange { start: 1, end: 500 });
        assert_eq!(first.quantity(), 500);

        let second = cursor.allocate(250).unwrap();
        assert_eq!(second, SerialRange { start: 501, end: 750 });
        assert_eq!(cursor.current(), 750);
    }

    #[test]
    fn test_allocate_zero() {
        let mut cursor = SerialCursor::new(10);
        assert_eq!(cursor.allocate(0), Err(PartitionError::EmptyRange));
        assert_eq!(cursor.current(), 10);
    }

    #[test]
    fn test_allocate_at_ceiling() {
        let mut cursor = SerialCursor::new(SERIAL_MAX - 2);
        assert_eq!(
            cursor.allocate(2).unwrap(),
            SerialRange {
                start: SERIAL_MAX - 1,
                end: SERIAL_MAX
            }
        );
        assert_eq!(
            cursor.allocate(1),
            Err(PartitionError::SerialRangeOverflow {
                start_serial: SERIAL_MAX + 1,
                total_quantity: 1
            })
        );
        assert_eq!(cursor.current(), SERIAL_MAX);

        let mut cursor = SerialCursor::new(u64::MAX);
        assert!(cursor.allocate(1).is_err());
    }
}
