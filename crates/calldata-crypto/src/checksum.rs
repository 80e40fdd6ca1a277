//! EIP-55 mixed-case address checksums

use crate::hash::keccak256;
use calldata_primitives::{Address, AddressError};
use thiserror::Error;

/// Checksum validation error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChecksumError {
    /// Not a well-formed 20-byte hex address
    #[error("malformed address: {0}")]
    Address(#[from] AddressError),
    /// Mixed-case address whose casing does not match its checksum
    #[error("bad address checksum, expected {expected}")]
    BadChecksum {
        /// The correctly checksummed rendering
        expected: String,
    },
}

/// Render an address in EIP-55 checksummed form.
///
/// Each hex digit is upper-cased iff the corresponding nibble of
/// `keccak256(lowercase_hex)` is >= 8.
pub fn to_checksummed(address: &Address) -> String {
    let lower = hex::encode(address.as_bytes());
    let digest = keccak256(lower.as_bytes());
    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = digest.as_bytes()[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse an address string, validating its EIP-55 checksum.
///
/// All-lower-case and all-upper-case inputs carry no checksum and are
/// accepted as-is; mixed-case inputs must match their checksummed form.
pub fn parse_checksummed(s: &str) -> Result<Address, ChecksumError> {
    let address = Address::from_hex(s)?;
    let digits = s.strip_prefix("0x").unwrap_or(s);
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    if has_upper && has_lower {
        let expected = to_checksummed(&address);
        if digits != &expected[2..] {
            return Err(ChecksumError::BadChecksum { expected });
        }
    }
    Ok(address)
}
