//! Fixed-width byte-string operations.
//!
//! The ABI format is word-oriented: every head slot is 32 bytes, offsets
//! and lengths are 32-byte big-endian words, and payloads are padded to
//! word boundaries. This module provides the padding, slicing, and
//! numeric/boolean word conversions the codec is built from.

use primitive_types::U256;
use thiserror::Error;

/// A 32-byte word, the alignment granularity of the ABI format
pub type Word = [u8; 32];

/// Word size in bytes
pub const WORD_SIZE: usize = 32;

/// Byte-string operation error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordError {
    /// Integer value exceeds its declared bit width
    #[error("value out of range for a {bits}-bit integer")]
    IntegerOutOfRange {
        /// Declared bit width (8..=256)
        bits: usize,
        /// Whether the declared type is signed
        signed: bool,
    },
    /// Data is longer than the requested padded size
    #[error("cannot pad {len} bytes to {size} bytes")]
    PaddingOverflow {
        /// Input length
        len: usize,
        /// Requested target size
        size: usize,
    },
    /// Slice range exceeds the data length
    #[error("slice {start}..{end} out of bounds for {len} bytes")]
    SliceOutOfBounds {
        /// Range start
        start: usize,
        /// Range end
        end: usize,
        /// Data length
        len: usize,
    },
}

/// Left-pad `data` with zeros to `size` bytes
pub fn pad_left(data: &[u8], size: usize) -> Result<Vec<u8>, WordError> {
    if data.len() > size {
        return Err(WordError::PaddingOverflow {
            len: data.len(),
            size,
        });
    }
    let mut out = vec![0u8; size];
    out[size - data.len()..].copy_from_slice(data);
    Ok(out)
}

/// Right-pad `data` with zeros to `size` bytes
pub fn pad_right(data: &[u8], size: usize) -> Result<Vec<u8>, WordError> {
    if data.len() > size {
        return Err(WordError::PaddingOverflow {
            len: data.len(),
            size,
        });
    }
    let mut out = data.to_vec();
    out.resize(size, 0);
    Ok(out)
}

/// Bounds-checked subslice
pub fn checked_slice(data: &[u8], start: usize, end: usize) -> Result<&[u8], WordError> {
    if start > end || end > data.len() {
        return Err(WordError::SliceOutOfBounds {
            start,
            end,
            len: data.len(),
        });
    }
    Ok(&data[start..end])
}

/// Encode an unsigned integer as a 32-byte big-endian word, checking it
/// fits in the declared bit width
pub fn uint_to_word(value: U256, bits: usize) -> Result<Word, WordError> {
    if bits < 256 && value.bits() > bits {
        return Err(WordError::IntegerOutOfRange {
            bits,
            signed: false,
        });
    }
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    Ok(word)
}

/// Encode a signed integer (given as its 256-bit two's-complement
/// representation) as a 32-byte word, checking it fits in the declared
/// bit width
pub fn int_to_word(value: U256, bits: usize) -> Result<Word, WordError> {
    if bits < 256 {
        // The top 257-bits..bit(bits-1) must be a pure sign extension:
        // all zeros for non-negative values, all ones for negative ones.
        let in_range = if value.bit(255) {
            (!value) >> (bits - 1) == U256::zero()
        } else {
            value >> (bits - 1) == U256::zero()
        };
        if !in_range {
            return Err(WordError::IntegerOutOfRange { bits, signed: true });
        }
    }
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    Ok(word)
}

/// Parse a big-endian word (or shorter slice) as an unsigned integer
pub fn word_to_uint(data: &[u8]) -> U256 {
    U256::from_big_endian(data)
}

/// Sign-extend a word from the declared bit width to a full 256-bit
/// two's-complement value
pub fn sign_extend(word: &Word, bits: usize) -> U256 {
    let value = U256::from_big_endian(word);
    if bits >= 256 {
        return value;
    }
    if value.bit(bits - 1) {
        value | (U256::MAX << bits)
    } else {
        value & ((U256::one() << bits) - U256::one())
    }
}

/// Mask a word down to the low `bits` bits
pub fn truncate(word: &Word, bits: usize) -> U256 {
    let value = U256::from_big_endian(word);
    if bits >= 256 {
        value
    } else {
        value & ((U256::one() << bits) - U256::one())
    }
}

/// Encode a boolean as a left-padded word (0x1 / 0x0)
pub fn bool_to_word(value: bool) -> Word {
    let mut word = [0u8; 32];
    word[31] = value as u8;
    word
}

/// Decode a word as a boolean (nonzero check)
pub fn word_to_bool(word: &Word) -> bool {
    word.iter().any(|b| *b != 0)
}

/// Encode a usize (length or offset) as a 32-byte big-endian word
pub fn usize_word(value: usize) -> Word {
    let mut word = [0u8; 32];
    U256::from(value as u64).to_big_endian(&mut word);
    word
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Padding ====================

    #[test]
    fn test_pad_left() {
        let padded = pad_left(&[0xab, 0xcd], 4).unwrap();
        assert_eq!(padded, vec![0x00, 0x00, 0xab, 0xcd]);
    }

    #[test]
    fn test_pad_right() {
        let padded = pad_right(&[0xab, 0xcd], 4).unwrap();
        assert_eq!(padded, vec![0xab, 0xcd, 0x00, 0x00]);
    }

    #[test]
    fn test_pad_exact_size() {
        let data = [0x11; 32];
        assert_eq!(pad_left(&data, 32).unwrap(), data.to_vec());
        assert_eq!(pad_right(&data, 32).unwrap(), data.to_vec());
    }

    #[test]
    fn test_pad_overflow() {
        let result = pad_left(&[0u8; 33], 32);
        assert_eq!(result, Err(WordError::PaddingOverflow { len: 33, size: 32 }));
        let result = pad_right(&[0u8; 5], 4);
        assert_eq!(result, Err(WordError::PaddingOverflow { len: 5, size: 4 }));
    }

    #[test]
    fn test_pad_empty() {
        assert_eq!(pad_left(&[], 32).unwrap(), vec![0u8; 32]);
        assert_eq!(pad_right(&[], 0).unwrap(), Vec::<u8>::new());
    }

    // ==================== Slicing ====================

    #[test]
    fn test_checked_slice() {
        let data = [1u8, 2, 3, 4];
        assert_eq!(checked_slice(&data, 1, 3).unwrap(), &[2, 3]);
        assert_eq!(checked_slice(&data, 0, 4).unwrap(), &data[..]);
        assert_eq!(checked_slice(&data, 4, 4).unwrap(), &[]);
    }

    #[test]
    fn test_checked_slice_out_of_bounds() {
        let data = [1u8, 2, 3, 4];
        assert_eq!(
            checked_slice(&data, 2, 5),
            Err(WordError::SliceOutOfBounds {
                start: 2,
                end: 5,
                len: 4
            })
        );
        assert!(checked_slice(&data, 3, 2).is_err());
    }

    // ==================== Unsigned integers ====================

    #[test]
    fn test_uint_to_word() {
        let word = uint_to_word(U256::from(420u64), 256).unwrap();
        assert_eq!(&word[30..], &[0x01, 0xa4]);
        assert_eq!(&word[..30], &[0u8; 30]);
    }

    #[test]
    fn test_uint_range_check() {
        assert!(uint_to_word(U256::from(255u64), 8).is_ok());
        assert_eq!(
            uint_to_word(U256::from(256u64), 8),
            Err(WordError::IntegerOutOfRange {
                bits: 8,
                signed: false
            })
        );
        assert!(uint_to_word(U256::MAX, 256).is_ok());
    }

    #[test]
    fn test_word_to_uint_roundtrip() {
        let value = U256::from(123456789u64);
        let word = uint_to_word(value, 256).unwrap();
        assert_eq!(word_to_uint(&word), value);
    }

    // ==================== Signed integers ====================

    fn twos_complement(value: i128) -> U256 {
        if value >= 0 {
            U256::from(value as u128)
        } else {
            (!U256::from(value.unsigned_abs())).overflowing_add(U256::one()).0
        }
    }

    #[test]
    fn test_int_to_word_negative_one() {
        let word = int_to_word(twos_complement(-1), 8).unwrap();
        assert_eq!(word, [0xff; 32]);
    }

    #[test]
    fn test_int_range_check() {
        // int8 range is -128..=127
        assert!(int_to_word(twos_complement(127), 8).is_ok());
        assert!(int_to_word(twos_complement(-128), 8).is_ok());
        assert_eq!(
            int_to_word(twos_complement(128), 8),
            Err(WordError::IntegerOutOfRange {
                bits: 8,
                signed: true
            })
        );
        assert_eq!(
            int_to_word(twos_complement(-129), 8),
            Err(WordError::IntegerOutOfRange {
                bits: 8,
                signed: true
            })
        );
    }

    #[test]
    fn test_sign_extend() {
        // 0xff as int8 is -1: extends to all ones
        let mut word = [0u8; 32];
        word[31] = 0xff;
        assert_eq!(sign_extend(&word, 8), U256::MAX);

        // 0x7f as int8 is 127: stays 127
        word[31] = 0x7f;
        assert_eq!(sign_extend(&word, 8), U256::from(127u64));
    }

    #[test]
    fn test_sign_extend_roundtrip() {
        for value in [-170i128, -1, 0, 1, 32767] {
            let word = int_to_word(twos_complement(value), 16).unwrap();
            assert_eq!(sign_extend(&word, 16), twos_complement(value));
        }
    }

    #[test]
    fn test_truncate() {
        let mut word = [0xffu8; 32];
        assert_eq!(truncate(&word, 8), U256::from(0xffu64));
        word = [0u8; 32];
        word[31] = 0x2a;
        assert_eq!(truncate(&word, 256), U256::from(0x2au64));
    }

    // ==================== Booleans and lengths ====================

    #[test]
    fn test_bool_words() {
        let t = bool_to_word(true);
        assert_eq!(t[31], 1);
        assert!(word_to_bool(&t));

        let f = bool_to_word(false);
        assert_eq!(f, [0u8; 32]);
        assert!(!word_to_bool(&f));
    }

    #[test]
    fn test_word_to_bool_nonzero() {
        let mut word = [0u8; 32];
        word[0] = 0x80;
        assert!(word_to_bool(&word));
    }

    #[test]
    fn test_usize_word() {
        let word = usize_word(0x60);
        assert_eq!(word[31], 0x60);
        assert_eq!(&word[..31], &[0u8; 31]);
        assert_eq!(usize_word(0), [0u8; 32]);
    }
}
