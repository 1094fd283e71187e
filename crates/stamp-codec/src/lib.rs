//! # stamp-codec
//!
//! Reversible mapping between raw bytes and a compact 62-symbol text alphabet.
//!
//! The input bytes are read as one big-endian unsigned integer and rewritten
//! as a base-62 numeral over `0-9a-zA-Z` (digit value `0` first):
//!
//! ```
//! assert_eq!(stamp_codec::encode(&[62]), "10");
//! assert_eq!(stamp_codec::decode("10").unwrap(), vec![62]);
//! ```
//!
//! ## Leading zero bytes
//!
//! The codec works on integer *values*, so leading zero bytes carry no
//! weight and are dropped: `encode(&[0, 1]) == encode(&[1])`, and decoding
//! always renders the minimal big-endian byte sequence. Only byte strings
//! without a leading zero byte survive `decode(encode(b)) == b`. Callers that
//! need length fidelity must frame the bytes themselves (for example with an
//! explicit length prefix) before encoding.

pub mod error;

pub use error::CodecError;

use num_bigint::BigUint;
use num_traits::Zero;

/// Symbols of the numeral system, indexed by digit value.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Numeral base of the codec.
pub const BASE: u32 = 62;

/// Encode bytes as a base-62 numeral.
///
/// Returns the empty string when the bytes represent zero (including empty input).
pub fn encode(bytes: &[u8]) -> String {
    let value = BigUint::from_bytes_be(bytes);
    if value.is_zero() {
        return String::new();
    }

    value
        .to_radix_be(BASE)
        .into_iter()
        .map(|digit| ALPHABET[usize::from(digit)] as char)
        .collect()
}

/// Decode a base-62 numeral back into its minimal big-endian byte sequence.
///
/// The zero value (empty input, or only `0` digits) decodes to no bytes.
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    let digits = text
        .chars()
        .enumerate()
        .map(|(position, character)| {
            digit_value(character).ok_or(CodecError::InvalidCharacter { character, position })
        })
        .collect::<Result<Vec<u8>, _>>()?;

    // Every digit is below BASE, so the conversion cannot be rejected.
    let value = BigUint::from_radix_be(&digits, BASE).unwrap_or_default();

    if value.is_zero() {
        Ok(Vec::new())
    } else {
        Ok(value.to_bytes_be())
    }
}

/// Whether `c` is a symbol of the codec alphabet.
pub fn is_alphabet_char(c: char) -> bool {
    digit_value(c).is_some()
}

fn digit_value(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some(c as u8 - b'0'),
        'a'..='z' => Some(c as u8 - b'a' + 10),
        'A'..='Z' => Some(c as u8 - b'A' + 36),
        _ => None,
    }
}
