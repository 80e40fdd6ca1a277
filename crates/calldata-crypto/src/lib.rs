//! # calldata-crypto
//!
//! Hashing primitives for Calldata.
//!
//! - Keccak-256 hashing
//! - EIP-55 address checksum encoding and validation

#![warn(missing_docs)]
#![warn(clippy::all)]

mod checksum;
mod hash;

pub use checksum::{parse_checksummed, to_checksummed, ChecksumError};
pub use hash::keccak256;
