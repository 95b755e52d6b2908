//! Binary encoding of SGTIN-96 EPCs.

pub mod bits;
pub mod sgtin;

pub use bits::BitWriter;
pub use sgtin::{decode, encode, encode_upc};
