//! JSON contract-ABI parsing and item extraction.
//!
//! Covers the standard Solidity JSON ABI document shape: an array of
//! function/event/error/constructor items whose parameters carry type
//! strings plus `components` for tuples. Unknown fields (state
//! mutability, indexed flags) are ignored.

use crate::error::AbiError;
use crate::signature;
use crate::ty::{AbiParameter, AbiType};
use serde::Deserialize;

/// One parameter entry of a JSON contract ABI
#[derive(Clone, Debug, Deserialize)]
pub struct JsonParam {
    /// Declared name (may be empty)
    #[serde(default)]
    pub name: String,
    /// Declared type string, e.g. `uint256` or `tuple[2]`
    #[serde(rename = "type")]
    pub ty: String,
    /// Tuple components, present when the base type is `tuple`
    #[serde(default)]
    pub components: Vec<JsonParam>,
}

/// One item of a JSON contract ABI
#[derive(Clone, Debug, Deserialize)]
pub struct AbiItem {
    /// Item kind: `function`, `event`, `error`, `constructor`, ...
    #[serde(rename = "type")]
    pub kind: String,
    /// Item name (absent for constructor/fallback/receive)
    #[serde(default)]
    pub name: Option<String>,
    /// Input parameters
    #[serde(default)]
    pub inputs: Vec<JsonParam>,
    /// Output parameters (functions only)
    #[serde(default)]
    pub outputs: Vec<JsonParam>,
}

impl JsonParam {
    /// Resolve into a typed parameter, expanding tuple components
    pub fn resolve(&self) -> Result<AbiParameter, AbiError> {
        let ty = resolve_type(&self.ty, &self.components)?;
        let name = if self.name.is_empty() {
            None
        } else {
            Some(self.name.clone())
        };
        Ok(AbiParameter { name, ty })
    }
}

// `tuple`-based type strings need the components list to resolve; all
// other strings go through the ordinary type grammar.
fn resolve_type(ty: &str, components: &[JsonParam]) -> Result<AbiType, AbiError> {
    if let Some(stripped) = ty.strip_suffix(']') {
        let open = stripped
            .rfind('[')
            .ok_or_else(|| AbiError::InvalidType(ty.to_string()))?;
        let element = resolve_type(&stripped[..open], components)?;
        let len = &stripped[open + 1..];
        return if len.is_empty() {
            Ok(AbiType::Array(Box::new(element)))
        } else {
            let len: usize = len
                .parse()
                .map_err(|_| AbiError::InvalidType(ty.to_string()))?;
            Ok(AbiType::FixedArray(Box::new(element), len))
        };
    }
    if ty == "tuple" {
        let components = components
            .iter()
            .map(JsonParam::resolve)
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(AbiType::Tuple(components));
    }
    AbiType::parse(ty)
}

impl AbiItem {
    /// Resolved input parameters
    pub fn input_parameters(&self) -> Result<Vec<AbiParameter>, AbiError> {
        self.inputs.iter().map(JsonParam::resolve).collect()
    }

    /// Resolved output parameters
    pub fn output_parameters(&self) -> Result<Vec<AbiParameter>, AbiError> {
        self.outputs.iter().map(JsonParam::resolve).collect()
    }

    /// Canonical signature, e.g. `transfer(address,uint256)`
    pub fn signature(&self) -> Result<String, AbiError> {
        let name = self.name.as_deref().unwrap_or_default();
        Ok(signature::signature(name, &self.input_parameters()?))
    }

    /// Function selector: first four bytes of the signature hash
    pub fn selector(&self) -> Result<signature::Selector, AbiError> {
        Ok(signature::selector(&self.signature()?))
    }
}

/// Parse a JSON contract ABI document into its items
pub fn parse_abi(json: &str) -> Result<Vec<AbiItem>, AbiError> {
    serde_json::from_str(json).map_err(|e| AbiError::InvalidJson(e.to_string()))
}

/// Find an ABI item by name, or by `0x`-prefixed 4-byte selector
pub fn extract_item<'a>(abi: &'a [AbiItem], key: &str) -> Result<Option<&'a AbiItem>, AbiError> {
    if let Some(stripped) = key.strip_prefix("0x") {
        let bytes =
            hex::decode(stripped).map_err(|e| AbiError::InvalidJson(e.to_string()))?;
        if bytes.len() != 4 {
            return Err(AbiError::InvalidJson(format!(
                "selector must be 4 bytes, got {}",
                bytes.len()
            )));
        }
        let mut wanted = [0u8; 4];
        wanted.copy_from_slice(&bytes);
        for item in abi {
            if item.kind == "function" && item.selector()? == wanted {
                return Ok(Some(item));
            }
        }
        return Ok(None);
    }
    Ok(abi.iter().find(|item| item.name.as_deref() == Some(key)))
}
