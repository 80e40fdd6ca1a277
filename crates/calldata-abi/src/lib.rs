//! # calldata-abi
//!
//! Ethereum contract ABI encoding/decoding for Calldata.
//!
//! Translates typed values (integers, booleans, addresses, byte strings,
//! UTF-8 strings, tuples, and nested static/dynamic arrays) into the
//! canonical 32-byte-word layout used to call smart-contract functions,
//! and back.
//!
//! ## Encoding layout
//!
//! - Head region: one 32-byte slot per parameter — the literal value for
//!   static types, a byte offset into the tail for dynamic types
//! - Tail region: dynamic payloads, length-prefixed, in parameter order
//! - Offsets are measured from the start of the enclosing tuple's head
//!   region, not the outermost encoding

#![warn(missing_docs)]
#![warn(clippy::all)]

mod decode;
mod encode;
mod error;
mod json;
mod packed;
mod signature;
mod ty;
mod value;

pub use decode::decode_parameters;
pub use encode::encode_parameters;
pub use error::AbiError;
pub use json::{extract_item, parse_abi, AbiItem, JsonParam};
pub use packed::encode_packed;
pub use signature::{selector, signature, signature_hash, Selector};
pub use ty::{parse_parameters, AbiParameter, AbiType};
pub use value::Value;

/// Encode values against a comma-separated type list, e.g.
/// `encode("string,uint256,bool", &values)`
pub fn encode(types: &str, values: &[Value]) -> Result<Vec<u8>, AbiError> {
    let parameters = parse_parameters(types)?;
    encode_parameters(&parameters, values)
}

/// Decode data against a comma-separated type list
pub fn decode(types: &str, data: &[u8]) -> Result<Vec<Value>, AbiError> {
    let parameters = parse_parameters(types)?;
    decode_parameters(&parameters, data)
}
