//! Error types for EPC encoding, decoding, partitioning and batch generation.

use thiserror::Error;

use crate::model::Field;

/// Why a UPC was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UpcFault {
    #[error("expected 12 digits, found {0} characters")]
    WrongLength(usize),

    #[error("non-digit {found:?} at position {position}")]
    NonDigit { position: usize, found: char },
}

/// Error while building an EPC.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("invalid UPC {input:?}: {reason}")]
    InvalidUpc { input: String, reason: UpcFault },

    #[error("invalid serial {input:?}: must be an integer in 0..=274877906943")]
    InvalidSerial { input: String },

    #[error("{field} value {value} does not fit in {bits} bits")]
    EncodingOverflow { field: Field, value: u64, bits: u32 },
}

/// Error while parsing an EPC from its hex form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("EPC hex must be 24 characters, found {len}")]
    InvalidLength { len: usize },

    #[error("invalid hex character {found:?} at position {position}")]
    InvalidHexChar { position: usize, found: char },

    #[error("not an SGTIN-96 header: 0x{found:02X}")]
    InvalidHeader { found: u8 },

    #[error("unsupported partition value {found}")]
    InvalidPartition { found: u8 },
}

/// Error while splitting a serial range into chunks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    #[error(
        "total quantity ({total_quantity}) and max per batch ({max_per_batch}) must both be at least 1"
    )]
    InvalidBatchSize {
        total_quantity: u64,
        max_per_batch: u64,
    },

    #[error(
        "serial range starting at {start_serial} with {total_quantity} items exceeds maximum serial 274877906943"
    )]
    SerialRangeOverflow {
        start_serial: u64,
        total_quantity: u64,
    },

    #[error("cannot allocate an empty serial range")]
    EmptyRange,
}

/// Error while driving a batch into a record sink.
#[derive(Debug, Error)]
pub enum GenerateError<E> {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("record sink failed: {0}")]
    Sink(E),
}
