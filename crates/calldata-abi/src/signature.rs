//! Function signature, selector, and signature-hash utilities.

use crate::ty::AbiParameter;
use calldata_crypto::keccak256;
use calldata_primitives::H256;

/// 4-byte function selector
pub type Selector = [u8; 4];

/// Canonical signature string, e.g. `transfer(address,uint256)`.
/// Tuple parameters render in parenthesized form.
pub fn signature(name: &str, inputs: &[AbiParameter]) -> String {
    let types: Vec<String> = inputs.iter().map(|p| p.ty.to_string()).collect();
    format!("{}({})", name, types.join(","))
}

/// Keccak-256 hash of a canonical signature string
pub fn signature_hash(signature: &str) -> H256 {
    keccak256(signature.as_bytes())
}

/// First four bytes of the signature hash
pub fn selector(signature: &str) -> Selector {
    let hash = signature_hash(signature);
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash.as_bytes()[..4]);
    selector
}
