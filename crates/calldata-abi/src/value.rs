//! Runtime values carried through the codec.

use calldata_primitives::{Address, U256};

/// A value that can be ABI encoded.
///
/// Integers are carried as 256-bit words; the declared type's bit width is
/// checked at encode time. Signed integers are stored in 256-bit
/// two's-complement form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// 20-byte address
    Address(Address),
    /// Boolean
    Bool(bool),
    /// Unsigned integer
    Uint(U256),
    /// Signed integer, 256-bit two's-complement representation
    Int(U256),
    /// Fixed-size byte string (`bytesN`)
    FixedBytes(Vec<u8>),
    /// Dynamically sized byte string
    Bytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// Array value, for both `T[]` and `T[N]`
    Array(Vec<Value>),
    /// Positional tuple value
    Tuple(Vec<Value>),
    /// Named tuple value, matched to components by name
    NamedTuple(Vec<(String, Value)>),
}

impl Value {
    /// Unsigned integer value
    pub fn uint(value: impl Into<U256>) -> Self {
        Value::Uint(value.into())
    }

    /// Signed integer value from a native integer
    pub fn int(value: i128) -> Self {
        if value >= 0 {
            Value::Int(U256::from(value as u128))
        } else {
            let magnitude = U256::from(value.unsigned_abs());
            Value::Int((!magnitude).overflowing_add(U256::one()).0)
        }
    }

    /// Short description of the value variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Address(_) => "address",
            Value::Bool(_) => "bool",
            Value::Uint(_) => "uint",
            Value::Int(_) => "int",
            Value::FixedBytes(_) => "fixed bytes",
            Value::Bytes(_) => "bytes",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Tuple(_) | Value::NamedTuple(_) => "tuple",
        }
    }

    /// Borrow as an unsigned integer
    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Value::Uint(value) => Some(*value),
            _ => None,
        }
    }

    /// Borrow as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Borrow as an address
    pub fn as_address(&self) -> Option<&Address> {
        match self {
            Value::Address(address) => Some(address),
            _ => None,
        }
    }

    /// Borrow as a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow as a byte slice (fixed or dynamic bytes)
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::FixedBytes(data) | Value::Bytes(data) => Some(data),
            _ => None,
        }
    }

    /// Borrow as an array of values
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow as a positional tuple
    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

impl From<Address> for Value {
    fn from(address: Address) -> Self {
        Value::Address(address)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<U256> for Value {
    fn from(value: U256) -> Self {
        Value::Uint(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Uint(U256::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}
