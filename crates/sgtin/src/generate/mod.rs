//! Materializing EPC records for a batch, one chunk at a time.
//!
//! The driver owns ordering (ascending chunk index, ascending serial); the
//! [`RecordSink`] owns persistence. Each chunk boundary is a checkpoint:
//! progress is reported there and a sink can stop the batch by returning an
//! error from any callback.

pub mod lookup;

use std::convert::Infallible;

use tracing::{debug, info};

use crate::codec::encode;
use crate::error::{EncodeError, GenerateError};
use crate::limits::PREVIEW_LEN;
use crate::model::{BatchRequest, Chunk, Record, Upc};
use crate::partition::LabelRule;

pub use lookup::TemplateLookup;

/// Chunks completed out of the batch total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: u64,
    pub total: u64,
}

impl Progress {
    pub fn is_done(&self) -> bool {
        self.completed == self.total
    }
}

/// Receives the records of a batch in order.
pub trait RecordSink {
    type Error;

    /// Called before the first record of a chunk.
    fn begin_chunk(&mut self, _chunk: &Chunk) -> Result<(), Self::Error> {
        Ok(())
    }

    fn record(&mut self, record: Record) -> Result<(), Self::Error>;

    /// Called after the last record of a chunk.
    fn end_chunk(&mut self, _chunk: &Chunk, _progress: Progress) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Collects every chunk and its records in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub chunks: Vec<(Chunk, Vec<Record>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total records collected across all chunks.
    pub fn record_count(&self) -> usize {
        self.chunks.iter().map(|(_, records)| records.len()).sum()
    }
}

impl RecordSink for MemorySink {
    type Error = Infallible;

    fn begin_chunk(&mut self, chunk: &Chunk) -> Result<(), Infallible> {
        self.chunks.push((chunk.clone(), Vec::new()));
        Ok(())
    }

    fn record(&mut self, record: Record) -> Result<(), Infallible> {
        if let Some((_, records)) = self.chunks.last_mut() {
            records.push(record);
        }
        Ok(())
    }
}

/// Drives every record of `request` into `sink`, chunk by chunk.
///
/// The request is already range checked, so the only failures are an
/// encoding error or the sink's own error. Records already handed to the
/// sink before a failure are the sink's to discard.
pub fn generate<S: RecordSink>(
    request: &BatchRequest,
    rule: LabelRule,
    sink: &mut S,
) -> Result<Progress, GenerateError<S::Error>> {
    let upc = request.upc();
    let chunks = request.chunks(rule);
    let mut progress = Progress {
        completed: 0,
        total: chunks.total_chunks(),
    };

    info!(
        upc = %upc,
        start_serial = request.start_serial(),
        end_serial = request.end_serial(),
        chunks = progress.total,
        "generating batch"
    );

    for chunk in chunks {
        sink.begin_chunk(&chunk).map_err(GenerateError::Sink)?;
        for serial in chunk.serials() {
            let epc = encode(&upc, serial)?;
            sink.record(Record { upc, serial, epc })
                .map_err(GenerateError::Sink)?;
        }
        progress.completed += 1;
        sink.end_chunk(&chunk, progress)
            .map_err(GenerateError::Sink)?;
        debug!(
            index = chunk.index,
            label = %chunk.label,
            records = chunk.len(),
            "chunk complete"
        );
    }

    info!(upc = %upc, chunks = progress.completed, "batch complete");
    Ok(progress)
}

/// Encodes every serial of a chunk in order.
pub fn encode_chunk(upc: &Upc, chunk: &Chunk) -> Result<Vec<Record>, EncodeError> {
    chunk
        .serials()
        .map(|serial| {
            encode(upc, serial).map(|epc| Record {
                upc: *upc,
                serial,
                epc,
            })
        })
        .collect()
}

/// Encodes a chunk on the rayon thread pool. Output order matches
/// [`encode_chunk`].
#[cfg(feature = "parallel")]
pub fn encode_chunk_par(upc: &Upc, chunk: &Chunk) -> Result<Vec<Record>, EncodeError> {
    use rayon::prelude::*;

    (chunk.start_serial..=chunk.end_serial)
        .into_par_iter()
        .map(|serial| {
            encode(upc, serial).map(|epc| Record {
                upc: *upc,
                serial,
                epc,
            })
        })
        .collect()
}

/// Returns up to the first ten records of a range, without partitioning.
pub fn preview(upc: &Upc, start_serial: u64, total_quantity: u64) -> Result<Vec<Record>, EncodeError> {
    let count = total_quantity.min(PREVIEW_LEN);
    (0..count)
        .map(|offset| {
            // Saturates to a value `encode` rejects as InvalidSerial.
            let serial = start_serial.saturating_add(offset);
            encode(upc, serial).map(|epc| Record {
                upc: *upc,
                serial,
                epc,
            })
        })
        .collect()
}
