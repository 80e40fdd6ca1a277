//! Common error types for primitives

use crate::address::AddressError;
use crate::word::WordError;
use thiserror::Error;

/// Primitive operation error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrimitiveError {
    /// Address error
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    /// Byte-string operation error
    #[error("word error: {0}")]
    Word(#[from] WordError),
}
