//! Splitting a serial range into bounded batches ("databases").
//!
//! A range `[start, start + total - 1]` is cut into `ceil(total / max)`
//! contiguous chunks of `max` serials each, the last one possibly shorter.
//! Chunk `i` (0-based) starts at `start + i * max`.
//!
//! Each chunk carries a label built from its boundaries in thousands, e.g.
//! `DB2.3K-3K`. The label is for display and file naming only; see
//! [`LabelRule`] for the two rules in use.

pub mod cursor;

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PartitionError;
use crate::limits::{LABEL_UNIT, SERIAL_MAX};
use crate::model::Chunk;

pub use cursor::{SerialCursor, SerialRange};

/// How the thousands range in a chunk label is derived.
///
/// Both rules compute the end as `(end + 1) / 1000`. They differ only for
/// chunks starting on an exact multiple of 1000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelRule {
    /// Start is `start / 1000`, plus one when `start` is a multiple of 1000.
    #[default]
    Legacy,
    /// Start is `start / 1000` with no adjustment.
    Plain,
}

impl LabelRule {
    /// Lower bound of the label, in thousands.
    pub fn start_k(&self, chunk_start: u64) -> u64 {
        let k = chunk_start / LABEL_UNIT;
        match self {
            LabelRule::Legacy if chunk_start % LABEL_UNIT == 0 => k + 1,
            _ => k,
        }
    }

    /// Upper bound of the label, in thousands.
    pub fn end_k(&self, chunk_end: u64) -> u64 {
        chunk_end.saturating_add(1) / LABEL_UNIT
    }

    /// Builds `DB{index}.{start}K-{end}K` for a 1-based chunk index.
    pub fn label(&self, index: u64, chunk_start: u64, chunk_end: u64) -> String {
        format!(
            "DB{}.{}K-{}K",
            index,
            self.start_k(chunk_start),
            self.end_k(chunk_end)
        )
    }
}

/// Checks a requested range and returns its last serial.
pub(crate) fn check_range(
    total_quantity: u64,
    start_serial: u64,
    max_per_batch: u64,
) -> Result<u64, PartitionError> {
    if total_quantity == 0 || max_per_batch == 0 {
        return Err(PartitionError::InvalidBatchSize {
            total_quantity,
            max_per_batch,
        });
    }
    match start_serial.checked_add(total_quantity - 1) {
        Some(end) if end <= SERIAL_MAX => Ok(end),
        _ => Err(PartitionError::SerialRangeOverflow {
            start_serial,
            total_quantity,
        }),
    }
}

/// Splits `total_quantity` serials starting at `start_serial` into chunks of
/// at most `max_per_batch`, labelled with [`LabelRule::Legacy`].
///
/// The whole range is validated before anything is returned.
///
/// ```rust
/// let chunks: Vec<_> = sgtin::partition(2500, 1000, 1000).unwrap().collect();
/// assert_eq!(chunks.len(), 3);
/// assert_eq!((chunks[2].start_serial, chunks[2].end_serial), (3000, 3499));
/// ```
pub fn partition(
    total_quantity: u64,
    start_serial: u64,
    max_per_batch: u64,
) -> Result<Chunks, PartitionError> {
    partition_with(total_quantity, start_serial, max_per_batch, LabelRule::Legacy)
}

/// Same as [`partition`] with an explicit label rule.
pub fn partition_with(
    total_quantity: u64,
    start_serial: u64,
    max_per_batch: u64,
    rule: LabelRule,
) -> Result<Chunks, PartitionError> {
    check_range(total_quantity, start_serial, max_per_batch)?;
    let chunks = Chunks::with_prefix(start_serial, total_quantity, max_per_batch, rule, None);
    debug!(
        start_serial,
        total_quantity,
        max_per_batch,
        chunks = chunks.total_chunks(),
        "partitioned serial range"
    );
    Ok(chunks)
}

/// Lazy iterator over the chunks of a validated range.
///
/// Cloning yields an independent iterator at the same position; use
/// [`Chunks::restart`] to begin again from the first chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunks {
    start_serial: u64,
    end_serial: u64,
    max_per_batch: u64,
    total: u64,
    next: u64,
    rule: LabelRule,
    prefix: Option<String>,
}

impl Chunks {
    /// Callers must have validated the range with `check_range`.
    pub(crate) fn with_prefix(
        start_serial: u64,
        total_quantity: u64,
        max_per_batch: u64,
        rule: LabelRule,
        prefix: Option<String>,
    ) -> Self {
        Self {
            start_serial,
            end_serial: start_serial + total_quantity - 1,
            max_per_batch,
            total: total_quantity.div_ceil(max_per_batch),
            next: 0,
            rule,
            prefix,
        }
    }

    /// Number of chunks in the whole range, regardless of position.
    pub fn total_chunks(&self) -> u64 {
        self.total
    }

    /// Returns the chunk at a 0-based position without advancing.
    pub fn get(&self, position: u64) -> Option<Chunk> {
        if position >= self.total {
            return None;
        }
        // position * max <= total_quantity - 1, so this cannot overflow.
        let start = self.start_serial + position * self.max_per_batch;
        let end = start
            .saturating_add(self.max_per_batch - 1)
            .min(self.end_serial);
        let index = position + 1;
        let range_label = self.rule.label(index, start, end);
        let label = match &self.prefix {
            Some(prefix) => format!("{prefix}.{range_label}"),
            None => range_label,
        };
        Some(Chunk {
            index,
            start_serial: start,
            end_serial: end,
            label,
        })
    }

    /// Returns a fresh iterator positioned at the first chunk.
    pub fn restart(&self) -> Self {
        Self {
            next: 0,
            ..self.clone()
        }
    }
}

impl Iterator for Chunks {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        let chunk = self.get(self.next)?;
        self.next += 1;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.total - self.next).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Chunk> {
        self.next = self.next.saturating_add(n as u64).min(self.total);
        self.next()
    }
}

// A 32-bit `usize` cannot count every chunk of a 38-bit range.
#[cfg(target_pointer_width = "64")]
impl ExactSizeIterator for Chunks {}

impl FusedIterator for Chunks {}
