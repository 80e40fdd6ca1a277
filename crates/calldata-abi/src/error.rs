//! ABI codec error taxonomy

use calldata_primitives::WordError;
use thiserror::Error;

/// Errors raised by the ABI encoder and decoder.
///
/// Every failure is classified and returned to the immediate caller;
/// nothing is retried or recovered internally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    /// Parameter and value counts differ
    #[error("expected {expected} values, got {actual}")]
    LengthMismatch {
        /// Declared parameter count
        expected: usize,
        /// Supplied value count
        actual: usize,
    },

    /// Fixed-size array value has the wrong element count
    #[error("array length mismatch for `{ty}`: expected {expected}, got {actual}")]
    ArrayLengthMismatch {
        /// Declared array length
        expected: usize,
        /// Supplied element count
        actual: usize,
        /// The offending array type
        ty: String,
    },

    /// A non-array value was supplied where an array was declared
    #[error("expected an array value")]
    InvalidArray,

    /// Fixed-size bytes value has the wrong length
    #[error("bytes size mismatch: expected {expected} bytes, got {actual}")]
    BytesSizeMismatch {
        /// Declared byte length
        expected: usize,
        /// Supplied byte length
        actual: usize,
    },

    /// A non-boolean value was supplied where a bool was declared
    #[error("expected a boolean value")]
    InvalidBooleanValue,

    /// A non-address value was supplied where an address was declared
    #[error("expected an address value")]
    InvalidAddress,

    /// Unrecognized or malformed type descriptor
    #[error("invalid ABI type `{0}`")]
    InvalidType(String),

    /// Value variant does not match the declared parameter type
    #[error("type check failed: `{ty}` cannot encode a {value} value")]
    TypeCheck {
        /// Declared type
        ty: String,
        /// Kind of the supplied value
        value: String,
    },

    /// Named tuple value is missing a declared component
    #[error("missing tuple component `{0}`")]
    MissingComponent(String),

    /// Encoded data ends before the region a read requires
    #[error("decode out of bounds: need {needed} bytes, region has {len}")]
    OutOfBounds {
        /// Bytes the read requires, from the region start
        needed: usize,
        /// Bytes the region actually holds
        len: usize,
    },

    /// Encoded data length is not a multiple of 32 bytes
    #[error("invalid encoded data size {0}: not a multiple of 32 bytes")]
    InvalidDataSize(usize),

    /// A length or offset word exceeds the addressable range
    #[error("length or offset word exceeds addressable range")]
    LengthOverflow,

    /// Decoded string payload is not valid UTF-8
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,

    /// Malformed JSON contract ABI document
    #[error("invalid ABI JSON: {0}")]
    InvalidJson(String),

    /// Numeric range or padding failure from the byte-string layer
    #[error(transparent)]
    Word(#[from] WordError),
}
