//! ABI parameter encoding.
//!
//! Each (type, value) pair is prepared into a `{dynamic, encoded}` unit;
//! an ordered unit list is then assembled into head and tail regions.

use crate::error::AbiError;
use crate::ty::{AbiParameter, AbiType};
use crate::value::Value;
use bytes::{BufMut, BytesMut};
use calldata_primitives::word;

/// One encoded parameter, tagged with whether its payload must be
/// relocated to the tail region. For non-dynamic units `encoded` is a
/// whole number of words; for dynamic units it is the payload before
/// offset relocation.
pub(crate) struct Prepared {
    pub dynamic: bool,
    pub encoded: Vec<u8>,
}

/// Encode `values` against `parameters` into canonical ABI bytes.
///
/// Returns the empty byte string for an empty parameter list.
pub fn encode_parameters(
    parameters: &[AbiParameter],
    values: &[Value],
) -> Result<Vec<u8>, AbiError> {
    if parameters.len() != values.len() {
        return Err(AbiError::LengthMismatch {
            expected: parameters.len(),
            actual: values.len(),
        });
    }
    let mut prepared = Vec::with_capacity(parameters.len());
    for (parameter, value) in parameters.iter().zip(values) {
        prepared.push(prepare(&parameter.ty, value)?);
    }
    Ok(assemble(&prepared))
}

/// Prepare a single (type, value) pair for assembly
pub(crate) fn prepare(ty: &AbiType, value: &Value) -> Result<Prepared, AbiError> {
    match ty {
        AbiType::Array(element) => prepare_array(ty, element, None, value),
        AbiType::FixedArray(element, len) => prepare_array(ty, element, Some(*len), value),
        AbiType::Tuple(components) => prepare_tuple(components, value),
        AbiType::Address => {
            let Value::Address(address) = value else {
                return Err(AbiError::InvalidAddress);
            };
            Ok(Prepared {
                dynamic: false,
                encoded: word::pad_left(address.as_bytes(), word::WORD_SIZE)?,
            })
        }
        AbiType::Bool => {
            let Value::Bool(flag) = value else {
                return Err(AbiError::InvalidBooleanValue);
            };
            Ok(Prepared {
                dynamic: false,
                encoded: word::bool_to_word(*flag).to_vec(),
            })
        }
        AbiType::Uint(bits) => {
            let Value::Uint(int) = value else {
                return Err(type_check(ty, value));
            };
            Ok(Prepared {
                dynamic: false,
                encoded: word::uint_to_word(*int, *bits)?.to_vec(),
            })
        }
        AbiType::Int(bits) => {
            let Value::Int(int) = value else {
                return Err(type_check(ty, value));
            };
            Ok(Prepared {
                dynamic: false,
                encoded: word::int_to_word(*int, *bits)?.to_vec(),
            })
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
            Ok(Prepared {
                dynamic: false,
                encoded: word::pad_right(data, word::WORD_SIZE)?,
            })
        }
        AbiType::Bytes => {
            let Value::Bytes(data) = value else {
                return Err(type_check(ty, value));
            };
            Ok(Prepared {
                dynamic: true,
                encoded: length_prefixed(data),
            })
        }
        AbiType::String => {
            let Value::String(text) = value else {
                return Err(type_check(ty, value));
            };
            Ok(Prepared {
                dynamic: true,
                encoded: length_prefixed(text.as_bytes()),
            })
        }
    }
}

fn prepare_array(
    ty: &AbiType,
    element: &AbiType,
    len: Option<usize>,
    value: &Value,
) -> Result<Prepared, AbiError> {
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
    let mut prepared = Vec::with_capacity(items.len());
    let mut dynamic_element = false;
    for item in items {
        let unit = prepare(element, item)?;
        dynamic_element |= unit.dynamic;
        prepared.push(unit);
    }
    if len.is_none() {
        // Unsized arrays prefix their element count
        let body = assemble(&prepared);
        let mut encoded = Vec::with_capacity(word::WORD_SIZE + body.len());
        encoded.extend_from_slice(&word::usize_word(prepared.len()));
        encoded.extend_from_slice(&body);
        Ok(Prepared {
            dynamic: true,
            encoded,
        })
    } else if dynamic_element {
        Ok(Prepared {
            dynamic: true,
            encoded: assemble(&prepared),
        })
    } else {
        Ok(Prepared {
            dynamic: false,
            encoded: concat(&prepared),
        })
    }
}

fn prepare_tuple(components: &[AbiParameter], value: &Value) -> Result<Prepared, AbiError> {
    let mut prepared = Vec::with_capacity(components.len());
    match value {
        Value::Tuple(items) => {
            if items.len() != components.len() {
                return Err(AbiError::LengthMismatch {
                    expected: components.len(),
                    actual: items.len(),
                });
            }
            for (component, item) in components.iter().zip(items) {
                prepared.push(prepare(&component.ty, item)?);
            }
        }
        Value::NamedTuple(pairs) => {
            for component in components {
                let name = component
                    .name
                    .as_deref()
                    .ok_or_else(|| AbiError::MissingComponent(component.ty.to_string()))?;
                let item = pairs
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, item)| item)
                    .ok_or_else(|| AbiError::MissingComponent(name.to_string()))?;
                prepared.push(prepare(&component.ty, item)?);
            }
        }
        _ => {
            return Err(AbiError::TypeCheck {
                ty: "tuple".to_string(),
                value: value.kind().to_string(),
            })
        }
    }
    let dynamic = prepared.iter().any(|unit| unit.dynamic);
    let encoded = if dynamic {
        assemble(&prepared)
    } else {
        concat(&prepared)
    };
    Ok(Prepared { dynamic, encoded })
}

/// Lay out prepared units as head words followed by tail payloads.
///
/// Each dynamic unit's head slot holds the byte offset of its payload,
/// measured from the start of this unit list's head region.
pub(crate) fn assemble(prepared: &[Prepared]) -> Vec<u8> {
    let static_size: usize = prepared
        .iter()
        .map(|unit| {
            if unit.dynamic {
                word::WORD_SIZE
            } else {
                unit.encoded.len()
            }
        })
        .sum();

    let mut head = BytesMut::with_capacity(static_size);
    let mut tail = BytesMut::new();
    let mut dynamic_size = 0usize;
    for unit in prepared {
        if unit.dynamic {
            head.put_slice(&word::usize_word(static_size + dynamic_size));
            tail.put_slice(&unit.encoded);
            dynamic_size += unit.encoded.len();
        } else {
            head.put_slice(&unit.encoded);
        }
    }
    head.put_slice(&tail);
    head.to_vec()
}

// [32-byte length][payload right-padded to the next word boundary]
fn length_prefixed(data: &[u8]) -> Vec<u8> {
    let padded = data.len().div_ceil(word::WORD_SIZE) * word::WORD_SIZE;
    let mut out = Vec::with_capacity(word::WORD_SIZE + padded);
    out.extend_from_slice(&word::usize_word(data.len()));
    out.extend_from_slice(data);
    out.resize(word::WORD_SIZE + padded, 0);
    out
}

fn concat(prepared: &[Prepared]) -> Vec<u8> {
    let mut out = Vec::new();
    for unit in prepared {
        out.extend_from_slice(&unit.encoded);
    }
    out
}

pub(crate) fn type_check(ty: &AbiType, value: &Value) -> AbiError {
    AbiError::TypeCheck {
        ty: ty.to_string(),
        value: value.kind().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calldata_primitives::{Address, U256, WordError};

    fn word_hex(n: u64) -> String {
        format!("{n:064x}")
    }

    fn encode_hex(types: &str, values: &[Value]) -> String {
        hex::encode(crate::encode(types, values).unwrap())
    }

    // ==================== Scalars ====================

    #[test]
    fn test_encode_address() {
        let address = Address::from_hex("0x14dC79964da2C08b23698B3D3cc7Ca32193d9955").unwrap();
        assert_eq!(
            encode_hex("address", &[Value::Address(address)]),
            "00000000000000000000000014dc79964da2c08b23698b3d3cc7ca32193d9955"
        );
    }

    #[test]
    fn test_encode_bool() {
        assert_eq!(encode_hex("bool", &[Value::Bool(true)]), word_hex(1));
        assert_eq!(encode_hex("bool", &[Value::Bool(false)]), word_hex(0));
    }

    #[test]
    fn test_encode_uint() {
        assert_eq!(encode_hex("uint256", &[Value::uint(420u64)]), word_hex(0x1a4));
        assert_eq!(encode_hex("uint8", &[Value::uint(255u64)]), word_hex(255));
    }

    #[test]
    fn test_encode_int_negative() {
        assert_eq!(encode_hex("int256", &[Value::int(-1)]), "ff".repeat(32));
        // Negative values are sign-extended over the whole word
        assert_eq!(encode_hex("int8", &[Value::int(-2)]), format!("{}fe", "ff".repeat(31)));
    }

    #[test]
    fn test_encode_fixed_bytes() {
        assert_eq!(
            encode_hex("bytes4", &[Value::FixedBytes(vec![0xde, 0xad, 0xbe, 0xef])]),
            format!("{:0<64}", "deadbeef")
        );
    }

    #[test]
    fn test_encode_dynamic_bytes() {
        let expected = [
            word_hex(0x20),
            word_hex(4),
            format!("{:0<64}", "deadbeef"),
        ]
        .concat();
        assert_eq!(
            encode_hex("bytes", &[Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef])]),
            expected
        );
    }

    #[test]
    fn test_encode_string_multiword() {
        let text = "a".repeat(33);
        let expected = [
            word_hex(0x20),
            word_hex(33),
            format!("{:0<128}", hex::encode(&text)),
        ]
        .concat();
        assert_eq!(encode_hex("string", &[Value::from(text.as_str())]), expected);
    }

    // ==================== Example scenario ====================

    #[test]
    fn test_encode_wagmi_example() {
        // encode(["string","uint256","bool"], ["wagmi", 420, true]):
        // three head words (offset, literal 420, literal 1), then the
        // length-prefixed padded UTF-8 tail
        let encoded = encode_hex(
            "string,uint256,bool",
            &[Value::from("wagmi"), Value::uint(420u64), Value::Bool(true)],
        );
        let expected = [
            word_hex(0x60),
            word_hex(420),
            word_hex(1),
            word_hex(5),
            format!("{:0<64}", hex::encode("wagmi")),
        ]
        .concat();
        assert_eq!(encoded, expected);
    }

    // ==================== Head/tail layout ====================

    #[test]
    fn test_encode_static_only_has_no_tail() {
        let encoded = crate::encode(
            "address,uint256,bool",
            &[
                Value::Address(Address::ZERO),
                Value::uint(7u64),
                Value::Bool(true),
            ],
        )
        .unwrap();
        assert_eq!(encoded.len(), 3 * 32);
    }

    #[test]
    fn test_encode_offset_in_mixed_list() {
        // The dynamic head word holds the full static size (96 bytes)
        let encoded = encode_hex(
            "uint256,string,bool",
            &[Value::uint(420u64), Value::from("abc"), Value::Bool(true)],
        );
        let expected = [
            word_hex(420),
            word_hex(0x60),
            word_hex(1),
            word_hex(3),
            format!("{:0<64}", hex::encode("abc")),
        ]
        .concat();
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_encode_two_dynamic_offsets() {
        // Second offset advances by the first payload's size
        let encoded = encode_hex(
            "string,string",
            &[Value::from("abc"), Value::from("defg")],
        );
        let expected = [
            word_hex(0x40),
            word_hex(0x80),
            word_hex(3),
            format!("{:0<64}", hex::encode("abc")),
            word_hex(4),
            format!("{:0<64}", hex::encode("defg")),
        ]
        .concat();
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_encode_empty_parameter_list() {
        assert_eq!(crate::encode("", &[]).unwrap(), Vec::<u8>::new());
    }

    // ==================== Arrays ====================

    #[test]
    fn test_encode_empty_dynamic_array() {
        // [] against uint256[]: offset word, then a zero count word
        let expected = [word_hex(0x20), word_hex(0)].concat();
        assert_eq!(encode_hex("uint256[]", &[Value::Array(vec![])]), expected);
    }

    #[test]
    fn test_encode_dynamic_array() {
        let expected = [word_hex(0x20), word_hex(2), word_hex(420), word_hex(69)].concat();
        assert_eq!(
            encode_hex(
                "uint256[]",
                &[Value::Array(vec![Value::uint(420u64), Value::uint(69u64)])]
            ),
            expected
        );
    }

    #[test]
    fn test_encode_static_array_inline() {
        // uint256[2] concatenates element words directly: no count, no offsets
        let expected = [word_hex(1), word_hex(2)].concat();
        assert_eq!(
            encode_hex(
                "uint256[2]",
                &[Value::Array(vec![Value::uint(1u64), Value::uint(2u64)])]
            ),
            expected
        );
    }

    #[test]
    fn test_encode_fixed_array_of_dynamic_elements() {
        // string[2] is dynamic: its payload is a head/tail region of its own
        let values = [Value::Array(vec![Value::from("a"), Value::from("b")])];
        let expected = [
            word_hex(0x20),
            word_hex(0x40),
            word_hex(0x80),
            word_hex(1),
            format!("{:0<64}", hex::encode("a")),
            word_hex(1),
            format!("{:0<64}", hex::encode("b")),
        ]
        .concat();
        assert_eq!(encode_hex("string[2]", &values), expected);
    }

    // ==================== Tuples ====================

    #[test]
    fn test_encode_static_tuple_inline() {
        let values = [
            Value::Tuple(vec![Value::uint(1u64), Value::Bool(true)]),
            Value::uint(2u64),
        ];
        let expected = [word_hex(1), word_hex(1), word_hex(2)].concat();
        assert_eq!(encode_hex("(uint256,bool),uint256", &values), expected);
    }

    #[test]
    fn test_encode_dynamic_tuple_nested() {
        // (string, uint256[]) nests head/tail regions per level
        let values = [Value::Tuple(vec![
            Value::from("abc"),
            Value::Array(vec![Value::uint(1u64), Value::uint(2u64)]),
        ])];
        let expected = [
            word_hex(0x20), // offset to the tuple payload
            word_hex(0x40), // tuple-relative offset of the string
            word_hex(0x80), // tuple-relative offset of the array
            word_hex(3),
            format!("{:0<64}", hex::encode("abc")),
            word_hex(2),
            word_hex(1),
            word_hex(2),
        ]
        .concat();
        assert_eq!(encode_hex("(string,uint256[])", &values), expected);
    }

    #[test]
    fn test_encode_named_tuple_matches_positional() {
        let ty = AbiType::Tuple(vec![
            AbiParameter::named("a", AbiType::Uint(256)),
            AbiParameter::named("b", AbiType::Bool),
        ]);
        let parameters = [AbiParameter::unnamed(ty)];
        let named = Value::NamedTuple(vec![
            ("b".to_string(), Value::Bool(true)),
            ("a".to_string(), Value::uint(7u64)),
        ]);
        let positional = Value::Tuple(vec![Value::uint(7u64), Value::Bool(true)]);
        assert_eq!(
            encode_parameters(&parameters, &[named]).unwrap(),
            encode_parameters(&parameters, &[positional]).unwrap()
        );
    }

    // ==================== Classified failures ====================

    #[test]
    fn test_encode_length_mismatch() {
        let result = crate::encode("uint256,bool", &[Value::uint(1u64)]);
        assert_eq!(
            result,
            Err(AbiError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_encode_bytes_size_mismatch() {
        for payload in [vec![0u8; 3], vec![0u8; 5]] {
            let actual = payload.len();
            let result = crate::encode("bytes4", &[Value::FixedBytes(payload)]);
            assert_eq!(
                result,
                Err(AbiError::BytesSizeMismatch {
                    expected: 4,
                    actual
                })
            );
        }
    }

    #[test]
    fn test_encode_array_length_mismatch() {
        let result = crate::encode(
            "uint256[3]",
            &[Value::Array(vec![Value::uint(1u64), Value::uint(2u64)])],
        );
        assert_eq!(
            result,
            Err(AbiError::ArrayLengthMismatch {
                expected: 3,
                actual: 2,
                ty: "uint256[3]".to_string()
            })
        );
    }

    #[test]
    fn test_encode_invalid_array() {
        let result = crate::encode("uint256[]", &[Value::uint(1u64)]);
        assert_eq!(result, Err(AbiError::InvalidArray));
    }

    #[test]
    fn test_encode_bool_strict() {
        // No truthy coercion: a uint is not a bool
        let result = crate::encode("bool", &[Value::uint(1u64)]);
        assert_eq!(result, Err(AbiError::InvalidBooleanValue));
    }

    #[test]
    fn test_encode_address_strict() {
        let result = crate::encode("address", &[Value::from("0x00")]);
        assert_eq!(result, Err(AbiError::InvalidAddress));
    }

    #[test]
    fn test_encode_uint_overflow() {
        let result = crate::encode("uint8", &[Value::uint(256u64)]);
        assert_eq!(
            result,
            Err(AbiError::Word(WordError::IntegerOutOfRange {
                bits: 8,
                signed: false
            }))
        );
    }

    #[test]
    fn test_encode_int_overflow() {
        let result = crate::encode("int8", &[Value::int(128)]);
        assert_eq!(
            result,
            Err(AbiError::Word(WordError::IntegerOutOfRange {
                bits: 8,
                signed: true
            }))
        );
    }

    #[test]
    fn test_encode_uint_max_no_overflow() {
        assert_eq!(
            encode_hex("uint256", &[Value::Uint(U256::MAX)]),
            "ff".repeat(32)
        );
    }

    #[test]
    fn test_encode_tuple_arity_mismatch() {
        let result = crate::encode(
            "(uint256,bool)",
            &[Value::Tuple(vec![Value::uint(1u64)])],
        );
        assert_eq!(
            result,
            Err(AbiError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_encode_named_tuple_missing_component() {
        let ty = AbiType::Tuple(vec![AbiParameter::named("a", AbiType::Uint(256))]);
        let parameters = [AbiParameter::unnamed(ty)];
        let value = Value::NamedTuple(vec![("other".to_string(), Value::uint(1u64))]);
        assert_eq!(
            encode_parameters(&parameters, &[value]),
            Err(AbiError::MissingComponent("a".to_string()))
        );
    }

    #[test]
    fn test_encode_type_check_failure() {
        let result = crate::encode("uint256", &[Value::Bool(true)]);
        assert_eq!(
            result,
            Err(AbiError::TypeCheck {
                ty: "uint256".to_string(),
                value: "bool".to_string()
            })
        );
    }
}
