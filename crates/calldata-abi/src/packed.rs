//! Non-standard packed encoding (`abi.encodePacked`).
//!
//! Values are serialized at their minimal native width and concatenated
//! with no padding and no offsets. Inside arrays each element is padded
//! to a full word; nested arrays and tuples cannot be packed.

use crate::encode::type_check;
use crate::error::AbiError;
use crate::ty::AbiType;
use crate::value::Value;
use bytes::{BufMut, BytesMut};
use calldata_primitives::word;

/// Tightly pack `values` against `types`
pub fn encode_packed(types: &[AbiType], values: &[Value]) -> Result<Vec<u8>, AbiError> {
    if types.len() != values.len() {
        return Err(AbiError::LengthMismatch {
            expected: types.len(),
            actual: values.len(),
        });
    }
    let mut out = BytesMut::new();
    for (ty, value) in types.iter().zip(values) {
        pack(ty, value, &mut out, false)?;
    }
    Ok(out.to_vec())
}

fn pack(ty: &AbiType, value: &Value, out: &mut BytesMut, in_array: bool) -> Result<(), AbiError> {
    match ty {
        AbiType::Address => {
            let Value::Address(address) = value else {
                return Err(AbiError::InvalidAddress);
            };
            if in_array {
                out.put_slice(&address.into_word());
            } else {
                out.put_slice(address.as_bytes());
            }
        }
        AbiType::Bool => {
            let Value::Bool(flag) = value else {
                return Err(AbiError::InvalidBooleanValue);
            };
            if in_array {
                out.put_slice(&word::bool_to_word(*flag));
            } else {
                out.put_u8(*flag as u8);
            }
        }
        AbiType::Uint(bits) => {
            let Value::Uint(int) = value else {
                return Err(type_check(ty, value));
            };
            let encoded = word::uint_to_word(*int, *bits)?;
            if in_array {
                out.put_slice(&encoded);
            } else {
                out.put_slice(&encoded[word::WORD_SIZE - bits / 8..]);
            }
        }
        AbiType::Int(bits) => {
            let Value::Int(int) = value else {
                return Err(type_check(ty, value));
            };
            let encoded = word::int_to_word(*int, *bits)?;
            if in_array {
                out.put_slice(&encoded);
            } else {
                out.put_slice(&encoded[word::WORD_SIZE - bits / 8..]);
            }
        }
        AbiType::FixedBytes(size) => {
            let Value::FixedBytes(data) = value else {
                return Err(type_check(ty, value));
            };
            if data.len() != *size {
                return Err(AbiError::BytesSizeMismatch {
                    expected: *size,
                    actual: data.len(),
                });
            }
            if in_array {
                out.put_slice(&word::pad_right(data, word::WORD_SIZE)?);
            } else {
                out.put_slice(data);
            }
        }
        AbiType::Bytes => {
            if in_array {
                return Err(AbiError::InvalidType(format!(
                    "{ty} cannot be packed inside an array"
                )));
            }
            let Value::Bytes(data) = value else {
                return Err(type_check(ty, value));
            };
            out.put_slice(data);
        }
        AbiType::String => {
            if in_array {
                return Err(AbiError::InvalidType(format!(
                    "{ty} cannot be packed inside an array"
                )));
            }
            let Value::String(text) = value else {
                return Err(type_check(ty, value));
            };
            out.put_slice(text.as_bytes());
        }
        AbiType::Array(element) => pack_array(ty, element, None, value, out, in_array)?,
        AbiType::FixedArray(element, len) => {
            pack_array(ty, element, Some(*len), value, out, in_array)?
        }
        AbiType::Tuple(_) => {
            return Err(AbiError::InvalidType(format!("{ty} cannot be packed")));
        }
    }
    Ok(())
}

fn pack_array(
    ty: &AbiType,
    element: &AbiType,
    len: Option<usize>,
    value: &Value,
    out: &mut BytesMut,
    in_array: bool,
) -> Result<(), AbiError> {
    if in_array || element.is_dynamic() {
        return Err(AbiError::InvalidType(format!("{ty} cannot be packed")));
    }
    let Value::Array(items) = value else {
        return Err(AbiError::InvalidArray);
    };
    if let Some(expected) = len {
        if items.len() != expected {
            return Err(AbiError::ArrayLengthMismatch {
                expected,
                actual: items.len(),
                ty: ty.to_string(),
            });
        }
    }
    for item in items {
        pack(element, item, out, true)?;
    }
    Ok(())
}
