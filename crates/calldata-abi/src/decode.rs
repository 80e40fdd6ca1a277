//! ABI parameter decoding.
//!
//! Mirrors the encoder: a cursor walks the head region positionally, and
//! dynamic entries are followed through their stored offset into the tail
//! region. Offsets are relative to the start of the current region, never
//! the outermost encoding. Every offset and length is validated against
//! the region length before slicing.

use crate::error::AbiError;
use crate::ty::{AbiParameter, AbiType};
use crate::value::Value;
use calldata_primitives::{word, Address, Word, U256, WORD_SIZE};

/// Decode `data` against `parameters`, returning one value per parameter.
///
/// Inverse of [`crate::encode_parameters`]: for any successfully encoded
/// value list, decoding the result yields equal values.
pub fn decode_parameters(
    parameters: &[AbiParameter],
    data: &[u8],
) -> Result<Vec<Value>, AbiError> {
    if parameters.is_empty() {
        return Ok(Vec::new());
    }
    if data.len() % WORD_SIZE != 0 {
        return Err(AbiError::InvalidDataSize(data.len()));
    }
    let head_size: usize = parameters.iter().map(|p| p.ty.head_size()).sum();
    if data.len() < head_size {
        return Err(AbiError::OutOfBounds {
            needed: head_size,
            len: data.len(),
        });
    }
    let mut values = Vec::with_capacity(parameters.len());
    let mut cursor = 0;
    for parameter in parameters {
        let (value, consumed) = decode_head(&parameter.ty, data, cursor)?;
        values.push(value);
        cursor += consumed;
    }
    Ok(values)
}

/// Decode one parameter at `pos` within the current region's head.
/// Returns the value and the number of head bytes consumed.
fn decode_head(ty: &AbiType, region: &[u8], pos: usize) -> Result<(Value, usize), AbiError> {
    if ty.is_dynamic() {
        let offset = read_usize(region, pos)?;
        if offset > region.len() {
            return Err(AbiError::OutOfBounds {
                needed: offset,
                len: region.len(),
            });
        }
        let value = decode_tail(ty, &region[offset..])?;
        return Ok((value, WORD_SIZE));
    }
    let value = match ty {
        AbiType::Address => Value::Address(Address::from_word(&read_word(region, pos)?)),
        AbiType::Bool => Value::Bool(word::word_to_bool(&read_word(region, pos)?)),
        AbiType::Uint(bits) => Value::Uint(word::truncate(&read_word(region, pos)?, *bits)),
        AbiType::Int(bits) => Value::Int(word::sign_extend(&read_word(region, pos)?, *bits)),
        AbiType::FixedBytes(len) => {
            let word = read_word(region, pos)?;
            Value::FixedBytes(word[..*len].to_vec())
        }
        AbiType::FixedArray(element, len) => {
            let mut items = Vec::with_capacity(*len);
            let mut cursor = pos;
            for _ in 0..*len {
                let (item, consumed) = decode_head(element, region, cursor)?;
                items.push(item);
                cursor += consumed;
            }
            Value::Array(items)
        }
        AbiType::Tuple(components) => {
            let mut items = Vec::with_capacity(components.len());
            let mut cursor = pos;
            for component in components {
                let (item, consumed) = decode_head(&component.ty, region, cursor)?;
                items.push(item);
                cursor += consumed;
            }
            Value::Tuple(items)
        }
        // Dynamic types were handled above
        AbiType::Bytes | AbiType::String | AbiType::Array(_) => {
            return Err(AbiError::InvalidType(ty.to_string()))
        }
    };
    Ok((value, ty.head_size()))
}

/// Decode a dynamic type's payload; `region` starts at the payload
fn decode_tail(ty: &AbiType, region: &[u8]) -> Result<Value, AbiError> {
    match ty {
        AbiType::Bytes => Ok(Value::Bytes(read_length_prefixed(region)?.to_vec())),
        AbiType::String => {
            let data = read_length_prefixed(region)?;
            let text = std::str::from_utf8(data).map_err(|_| AbiError::InvalidUtf8)?;
            Ok(Value::String(text.to_string()))
        }
        AbiType::Array(element) => {
            let count = read_usize(region, 0)?;
            let elements = &region[WORD_SIZE..];
            // Each element occupies at least its head span; reject counts
            // the remaining buffer cannot possibly satisfy
            let min = count
                .checked_mul(element.head_size())
                .ok_or(AbiError::LengthOverflow)?;
            if min > elements.len() {
                return Err(AbiError::OutOfBounds {
                    needed: min,
                    len: elements.len(),
                });
            }
            let mut items = Vec::with_capacity(count);
            let mut cursor = 0;
            for _ in 0..count {
                let (item, consumed) = decode_head(element, elements, cursor)?;
                items.push(item);
                cursor += consumed;
            }
            Ok(Value::Array(items))
        }
        AbiType::FixedArray(element, len) => {
            let mut items = Vec::with_capacity(*len);
            let mut cursor = 0;
            for _ in 0..*len {
                let (item, consumed) = decode_head(element, region, cursor)?;
                items.push(item);
                cursor += consumed;
            }
            Ok(Value::Array(items))
        }
        AbiType::Tuple(components) => {
            let mut items = Vec::with_capacity(components.len());
            let mut cursor = 0;
            for component in components {
                let (item, consumed) = decode_head(&component.ty, region, cursor)?;
                items.push(item);
                cursor += consumed;
            }
            Ok(Value::Tuple(items))
        }
        // Static types never reach the tail path
        _ => Err(AbiError::InvalidType(ty.to_string())),
    }
}

// [32-byte length][that many payload bytes]
fn read_length_prefixed(region: &[u8]) -> Result<&[u8], AbiError> {
    let len = read_usize(region, 0)?;
    let end = WORD_SIZE
        .checked_add(len)
        .ok_or(AbiError::LengthOverflow)?;
    if end > region.len() {
        return Err(AbiError::OutOfBounds {
            needed: end,
            len: region.len(),
        });
    }
    Ok(&region[WORD_SIZE..end])
}

fn read_word(region: &[u8], pos: usize) -> Result<Word, AbiError> {
    let end = pos.checked_add(WORD_SIZE).ok_or(AbiError::LengthOverflow)?;
    if end > region.len() {
        return Err(AbiError::OutOfBounds {
            needed: end,
            len: region.len(),
        });
    }
    let mut word = [0u8; 32];
    word.copy_from_slice(&region[pos..end]);
    Ok(word)
}

fn read_usize(region: &[u8], pos: usize) -> Result<usize, AbiError> {
    let value = word::word_to_uint(&read_word(region, pos)?);
    if value > U256::from(usize::MAX as u64) {
        return Err(AbiError::LengthOverflow);
    }
    Ok(value.as_usize())
}
