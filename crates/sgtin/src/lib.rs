//! SGTIN-96 EPC encoding for UPC-A items, with serial range batching.
//!
//! This crate turns a 12-digit UPC and a serial number into the 96-bit
//! Electronic Product Code written to RFID tags, and splits large serial
//! ranges into bounded batches with deterministic names.
//!
//! # Overview
//!
//! - **Encoder**: `(UPC, serial)` to a 24-character uppercase hex EPC.
//!   Every field is range checked; nothing is silently truncated.
//! - **Partitioner**: `(total, start, max per batch)` to an ordered, lazy
//!   sequence of contiguous chunks, each with a thousands-range label.
//!
//! Both are pure functions and can be called from any number of threads.
//!
//! # Quick Start
//!
//! ```rust
//! use sgtin::{BatchRequest, LabelRule, MemorySink, Upc, encode, generate};
//!
//! let upc = Upc::parse("012345678905").unwrap();
//! assert_eq!(encode(&upc, 1).unwrap().to_hex(), "303400C0E4424C8000000001");
//!
//! let request = BatchRequest::new(upc, 1000, 2500, 1000).unwrap();
//! let mut sink = MemorySink::new();
//! generate(&request, LabelRule::Legacy, &mut sink).unwrap();
//!
//! let labels: Vec<_> = sink.chunks.iter().map(|(c, _)| c.label.as_str()).collect();
//! assert_eq!(
//!     labels,
//!     ["012345678905.DB1.2K-2K", "012345678905.DB2.3K-3K", "012345678905.DB3.4K-3K"]
//! );
//! ```
//!
//! # Modules
//!
//! - [`model`]: Value types (Upc, SerialNumber, Epc, BatchRequest, Chunk)
//! - [`codec`]: Bit packing and SGTIN-96 encode/decode
//! - [`partition`]: Range partitioning, chunk labels, serial allocation
//! - [`generate`]: Per-chunk record generation into a caller's sink
//! - [`error`]: Error types
//! - [`limits`]: Field widths and fixed values
//!
//! # Bit Layout
//!
//! ```text
//! | header 0x30:8 | filter 1:3 | partition 5:3 | company prefix:24 | item ref:20 | serial:38 |
//! ```
//!
//! The company prefix is `"0"` plus the first six UPC digits; the item
//! reference is digits 7 to 11. The UPC check digit is dropped.

pub mod codec;
pub mod error;
pub mod generate;
pub mod limits;
pub mod model;
pub mod partition;

// Re-export commonly used types at crate root
pub use codec::{decode, encode, encode_upc};
pub use error::{DecodeError, EncodeError, GenerateError, PartitionError, UpcFault};
#[cfg(feature = "parallel")]
pub use generate::encode_chunk_par;
pub use generate::{MemorySink, Progress, RecordSink, TemplateLookup, encode_chunk, generate, preview};
pub use model::{
    BatchRequest, Chunk, Epc, Field, Overage, Record, SerialNumber, TrackingRecord, Upc,
};
pub use partition::{Chunks, LabelRule, SerialCursor, SerialRange, partition, partition_with};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
