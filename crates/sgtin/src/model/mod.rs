//! Data model types for SGTIN-96 encoding and batching.
//!
//! This module contains the value types passed between the encoder, the
//! partitioner and their callers:
//! - Item codes and serials (`Upc`, `SerialNumber`)
//! - The encoded EPC and its fields (`Epc`, `Field`)
//! - Batch requests and their chunks (`BatchRequest`, `Chunk`, `Record`)
//! - Downstream summaries (`TrackingRecord`, `Overage`)

pub mod batch;
pub mod chunk;
pub mod epc;
pub mod serial;
pub mod upc;

pub use batch::{BatchRequest, Overage, TrackingRecord};
pub use chunk::{Chunk, Record};
pub use epc::{Epc, Field};
pub use serial::SerialNumber;
pub use upc::Upc;
