//! Chunks of a serial range and the records materialized from them.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::model::{Epc, Upc};

/// A contiguous run of serials written as one output batch ("database").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chunk {
    /// 1-based position within the batch.
    pub index: u64,
    pub start_serial: u64,
    /// Inclusive.
    pub end_serial: u64,
    /// Display name, e.g. `012345678905.DB1.2K-2K`. Not a stable identifier.
    pub label: String,
}

impl Chunk {
    /// Number of serials in the chunk.
    pub fn len(&self) -> u64 {
        self.end_serial - self.start_serial + 1
    }

    /// A chunk always holds at least one serial.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn serials(&self) -> RangeInclusive<u64> {
        self.start_serial..=self.end_serial
    }
}

/// One output row: UPC, serial and the EPC derived from both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "UPC")]
    pub upc: Upc,
    #[serde(rename = "Serial #")]
    pub serial: u64,
    #[serde(rename = "EPC")]
    pub epc: Epc,
}
