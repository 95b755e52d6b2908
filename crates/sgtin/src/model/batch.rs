//! Batch requests and the flat records handed to downstream collaborators.

use serde::{Deserialize, Serialize};

use crate::error::PartitionError;
use crate::model::Upc;
use crate::partition::{Chunks, LabelRule, check_range};

/// Extra labels added on top of the ordered quantity to cover spoilage.
///
/// The 2% allowance is applied first and the 7% allowance compounds on the
/// result. The final quantity is truncated to a whole number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Overage {
    #[serde(default)]
    pub two_percent: bool,
    #[serde(default)]
    pub seven_percent: bool,
}

impl Overage {
    pub const NONE: Overage = Overage {
        two_percent: false,
        seven_percent: false,
    };

    /// Returns `quantity` with the selected allowances applied.
    pub fn apply(&self, quantity: u64) -> u64 {
        let mut numerator = quantity as u128;
        let mut denominator = 1u128;
        if self.two_percent {
            numerator *= 102;
            denominator *= 100;
        }
        if self.seven_percent {
            numerator *= 107;
            denominator *= 100;
        }
        u64::try_from(numerator / denominator).unwrap_or(u64::MAX)
    }
}

/// A validated request to generate `total_quantity` EPCs for one UPC,
/// starting at `start_serial`, split into batches of at most `max_per_batch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchRequest {
    upc: Upc,
    start_serial: u64,
    total_quantity: u64,
    max_per_batch: u64,
}

impl BatchRequest {
    /// Validates the whole range up front so no chunk is ever produced for
    /// a request that cannot be completed.
    pub fn new(
        upc: Upc,
        start_serial: u64,
        total_quantity: u64,
        max_per_batch: u64,
    ) -> Result<Self, PartitionError> {
        check_range(total_quantity, start_serial, max_per_batch)?;
        Ok(Self {
            upc,
            start_serial,
            total_quantity,
            max_per_batch,
        })
    }

    /// Returns a new request with the overage applied to the total quantity.
    pub fn with_overage(self, overage: Overage) -> Result<Self, PartitionError> {
        Self::new(
            self.upc,
            self.start_serial,
            overage.apply(self.total_quantity),
            self.max_per_batch,
        )
    }

    pub fn upc(&self) -> Upc {
        self.upc
    }

    pub fn start_serial(&self) -> u64 {
        self.start_serial
    }

    pub fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    pub fn max_per_batch(&self) -> u64 {
        self.max_per_batch
    }

    /// Last serial in the request (inclusive).
    pub fn end_serial(&self) -> u64 {
        self.start_serial + self.total_quantity - 1
    }

    pub fn batch_count(&self) -> u64 {
        self.total_quantity.div_ceil(self.max_per_batch)
    }

    /// Chunks of this request, labelled with the UPC prefix.
    pub fn chunks(&self, rule: LabelRule) -> Chunks {
        Chunks::with_prefix(
            self.start_serial,
            self.total_quantity,
            self.max_per_batch,
            rule,
            Some(self.upc.to_string()),
        )
    }

    /// Flattens the request for the roll tracking template.
    pub fn tracking_record(&self, labels_per_roll: u64) -> TrackingRecord {
        TrackingRecord {
            upc: self.upc,
            start_serial: self.start_serial,
            end_serial: self.end_serial(),
            labels_per_roll,
            total_quantity: self.total_quantity,
            max_per_batch: self.max_per_batch,
            roll_count: if labels_per_roll == 0 {
                0
            } else {
                self.total_quantity.div_ceil(labels_per_roll)
            },
            batch_count: self.batch_count(),
        }
    }
}

/// Flat summary of a batch, consumed by the roll tracking sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub upc: Upc,
    pub start_serial: u64,
    pub end_serial: u64,
    pub labels_per_roll: u64,
    pub total_quantity: u64,
    pub max_per_batch: u64,
    pub roll_count: u64,
    pub batch_count: u64,
}
