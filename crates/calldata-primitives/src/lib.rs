//! # calldata-primitives
//!
//! Primitive types for the Calldata ABI codec.
//!
//! Provides the 20-byte `Address` type and the fixed-width byte-string
//! operations (padding, slicing, integer/boolean word conversion) that the
//! codec builds on. Everything here works in 32-byte words, the alignment
//! granularity of the ABI format.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod error;
pub mod word;

pub use address::{Address, AddressError};
pub use error::PrimitiveError;
pub use word::{Word, WordError, WORD_SIZE};

// Re-export primitive-types for U256/H256
pub use primitive_types::{H256, U256};
