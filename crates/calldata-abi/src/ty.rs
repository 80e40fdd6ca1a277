//! ABI type grammar and classification.
//!
//! Type strings are parsed once into [`AbiType`], a closed tagged variant;
//! the encoder and decoder dispatch on the variant and never re-parse.

use crate::error::AbiError;
use std::fmt;

// Parser recursion cap; deeper descriptors are rejected as malformed.
const MAX_TYPE_DEPTH: usize = 32;

/// A resolved ABI type
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbiType {
    /// 20-byte account address
    Address,
    /// Boolean
    Bool,
    /// Unsigned integer of the given bit width (8..=256, step 8)
    Uint(usize),
    /// Signed two's-complement integer of the given bit width
    Int(usize),
    /// Fixed-size byte string of 1..=32 bytes
    FixedBytes(usize),
    /// Dynamically sized byte string
    Bytes,
    /// UTF-8 string
    String,
    /// Dynamic-length array `T[]`
    Array(Box<AbiType>),
    /// Fixed-length array `T[N]`
    FixedArray(Box<AbiType>, usize),
    /// Tuple with ordered, optionally named components
    Tuple(Vec<AbiParameter>),
}

/// A typed parameter, optionally named
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbiParameter {
    /// Declared name, if any
    pub name: Option<String>,
    /// Resolved type
    pub ty: AbiType,
}

impl AbiParameter {
    /// Unnamed parameter of the given type
    pub fn unnamed(ty: AbiType) -> Self {
        Self { name: None, ty }
    }

    /// Named parameter of the given type
    pub fn named(name: impl Into<String>, ty: AbiType) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }
}

impl AbiType {
    /// Parse a type descriptor string, e.g. `uint256`, `bytes32[4]`,
    /// `(address,uint256)[]`
    pub fn parse(s: &str) -> Result<Self, AbiError> {
        parse_type(s.trim(), 0)
    }

    /// True if the encoded size depends on the value (string, bytes,
    /// dynamic arrays, and any composite containing one)
    pub fn is_dynamic(&self) -> bool {
        match self {
            AbiType::Bytes | AbiType::String | AbiType::Array(_) => true,
            AbiType::FixedArray(element, _) => element.is_dynamic(),
            AbiType::Tuple(components) => components.iter().any(|c| c.ty.is_dynamic()),
            _ => false,
        }
    }

    /// Number of bytes this type occupies in the head region: 32 for
    /// dynamic types (the offset slot) and scalars, the summed span for
    /// static composites
    pub fn head_size(&self) -> usize {
        if self.is_dynamic() {
            return 32;
        }
        match self {
            AbiType::FixedArray(element, len) => len * element.head_size(),
            AbiType::Tuple(components) => components.iter().map(|c| c.ty.head_size()).sum(),
            _ => 32,
        }
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Address => f.write_str("address"),
            AbiType::Bool => f.write_str("bool"),
            AbiType::Uint(bits) => write!(f, "uint{bits}"),
            AbiType::Int(bits) => write!(f, "int{bits}"),
            AbiType::FixedBytes(len) => write!(f, "bytes{len}"),
            AbiType::Bytes => f.write_str("bytes"),
            AbiType::String => f.write_str("string"),
            AbiType::Array(element) => write!(f, "{element}[]"),
            AbiType::FixedArray(element, len) => write!(f, "{element}[{len}]"),
            AbiType::Tuple(components) => {
                f.write_str("(")?;
                for (i, component) in components.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", component.ty)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Parse a comma-separated parameter list, e.g. `"address,uint256"` or
/// `"uint256 amount, (address,bool) flags"`. Solidity data-location
/// keywords between type and name are tolerated and ignored.
pub fn parse_parameters(s: &str) -> Result<Vec<AbiParameter>, AbiError> {
    split_top_level(s, ',')
        .into_iter()
        .map(parse_parameter)
        .collect()
}

fn parse_parameter(s: &str) -> Result<AbiParameter, AbiError> {
    let tokens = split_top_level(s, ' ');
    let mut tokens = tokens.into_iter();
    let ty_str = tokens.next().ok_or_else(|| AbiError::InvalidType(s.to_string()))?;
    let ty = parse_type(ty_str, 0)?;

    let mut name = None;
    for token in tokens {
        match token {
            "memory" | "calldata" | "storage" | "indexed" => {}
            _ if name.is_none() && is_identifier(token) => name = Some(token.to_string()),
            _ => return Err(AbiError::InvalidType(s.trim().to_string())),
        }
    }
    Ok(AbiParameter {
        name,
        ty,
    })
}

fn parse_type(s: &str, depth: usize) -> Result<AbiType, AbiError> {
    if depth > MAX_TYPE_DEPTH {
        return Err(AbiError::InvalidType(s.to_string()));
    }
    let s = s.trim();
    if s.is_empty() {
        return Err(AbiError::InvalidType(s.to_string()));
    }

    // Array suffixes bind last: `base[N?]`
    if let Some(stripped) = s.strip_suffix(']') {
        let open = stripped
            .rfind('[')
            .ok_or_else(|| AbiError::InvalidType(s.to_string()))?;
        let element = parse_type(&stripped[..open], depth + 1)?;
        let len = &stripped[open + 1..];
        return if len.is_empty() {
            Ok(AbiType::Array(Box::new(element)))
        } else {
            let len: usize = len
                .parse()
                .map_err(|_| AbiError::InvalidType(s.to_string()))?;
            Ok(AbiType::FixedArray(Box::new(element), len))
        };
    }

    // Inline tuple syntax: `(t1,t2,...)`
    if let Some(inner) = s.strip_prefix('(') {
        let inner = inner
            .strip_suffix(')')
            .ok_or_else(|| AbiError::InvalidType(s.to_string()))?;
        let components = split_top_level(inner, ',')
            .into_iter()
            .map(|c| {
                Ok(AbiParameter::unnamed(parse_type(c, depth + 1)?))
            })
            .collect::<Result<Vec<_>, AbiError>>()?;
        return Ok(AbiType::Tuple(components));
    }

    match s {
        "address" => return Ok(AbiType::Address),
        "bool" => return Ok(AbiType::Bool),
        "string" => return Ok(AbiType::String),
        "bytes" => return Ok(AbiType::Bytes),
        "uint" => return Ok(AbiType::Uint(256)),
        "int" => return Ok(AbiType::Int(256)),
        _ => {}
    }
    if let Some(width) = s.strip_prefix("uint") {
        return Ok(AbiType::Uint(parse_int_width(width, s)?));
    }
    if let Some(width) = s.strip_prefix("int") {
        return Ok(AbiType::Int(parse_int_width(width, s)?));
    }
    if let Some(len) = s.strip_prefix("bytes") {
        let len: usize = len
            .parse()
            .map_err(|_| AbiError::InvalidType(s.to_string()))?;
        if !(1..=32).contains(&len) {
            return Err(AbiError::InvalidType(s.to_string()));
        }
        return Ok(AbiType::FixedBytes(len));
    }
    Err(AbiError::InvalidType(s.to_string()))
}

fn parse_int_width(width: &str, full: &str) -> Result<usize, AbiError> {
    let bits: usize = width
        .parse()
        .map_err(|_| AbiError::InvalidType(full.to_string()))?;
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(AbiError::InvalidType(full.to_string()));
    }
    Ok(bits)
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_')
        && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

// Split at `separator` occurrences outside any parentheses or brackets.
// Whitespace separators split on runs; empty input yields no items.
fn split_top_level(s: &str, separator: char) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            _ if depth == 0 && c == separator => {
                items.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    items.push(&s[start..]);
    items
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}
