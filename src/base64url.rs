//! URL-safe base64 as used by JWK members ([RFC7515 § 2]).
//!
//! Decoding accepts padded and unpadded input: padding is restored before the
//! URL-safe alphabet is mapped back onto the standard one and the result is
//! decoded as standard base64. Unused low bits of the final character are
//! ignored, as JWK producers do not always clear them.
//!
//! [RFC7515 § 2]: https://datatracker.ietf.org/doc/html/rfc7515#section-2

use alloc::string::String;
use alloc::vec::Vec;
use base64ct::{Base64, Encoding};

/// Decode a base64url string.
pub fn decode(s: &str) -> Result<Vec<u8>, base64ct::Error> {
    let padded_len = s.len().div_ceil(4) * 4;
    let mut standard = String::with_capacity(padded_len);

    for c in s.chars() {
        standard.push(match c {
            '-' => '+',
            '_' => '/',
            c => c,
        });
    }

    while standard.len() < padded_len {
        standard.push('=');
    }

    clear_unused_bits(&mut standard);
    Base64::decode_vec(&standard)
}

const STANDARD_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Zero the bits of the last data character that fall beyond the final byte.
///
/// Invalid characters are left in place for the decoder to reject.
fn clear_unused_bits(standard: &mut String) {
    let data_len = standard.trim_end_matches('=').len();
    let unused_bits = match data_len % 4 {
        2 => 4,
        3 => 2,
        _ => return,
    };

    let last = data_len - 1;
    let Some(sextet) = standard.as_bytes().get(last).and_then(|&c| sextet(c)) else {
        return;
    };

    let cleared = STANDARD_ALPHABET[usize::from(sextet & !((1 << unused_bits) - 1))];
    let mut buf = [0u8; 4];
    standard.replace_range(last..data_len, char::from(cleared).encode_utf8(&mut buf));
}

fn sextet(c: u8) -> Option<u8> {
    match c {
        b'A'..=b'Z' => Some(c - b'A'),
        b'a'..=b'z' => Some(c - b'a' + 26),
        b'0'..=b'9' => Some(c - b'0' + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

/// Encode bytes as base64url.
///
/// Padding is kept: callers emitting JWK members strip trailing `=`
/// themselves.
pub fn encode(bytes: &[u8]) -> String {
    Base64::encode_string(bytes)
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn decode_public_exponent() {
        assert_eq!(decode("AQAB").unwrap(), hex!("010001"));
    }

    #[test]
    fn decode_restores_padding() {
        assert_eq!(decode("AQ").unwrap(), [0x01]);
        assert_eq!(decode("AQI").unwrap(), [0x01, 0x02]);
        assert_eq!(decode("AQ==").unwrap(), [0x01]);
    }

    #[test]
    fn decode_ignores_unused_trailing_bits() {
        assert_eq!(decode("AR").unwrap(), [0x01]);
        assert_eq!(decode("AR==").unwrap(), [0x01]);
        assert_eq!(decode("AQJ").unwrap(), [0x01, 0x02]);
        assert_eq!(decode("AQL").unwrap(), [0x01, 0x02]);
        // the last character of a full quartet has no unused bits
        assert_eq!(decode("AQAB").unwrap(), hex!("010001"));
    }

    #[test]
    fn decode_url_alphabet() {
        assert_eq!(decode("-_8").unwrap(), hex!("fbff"));
        assert_eq!(decode("_-8").unwrap(), decode("/+8").unwrap());
    }

    #[test]
    fn decode_rejects_invalid_input() {
        assert!(decode("AQ!B").is_err());
        // a single dangling character can never be valid base64
        assert!(decode("AQABA").is_err());
    }

    #[test]
    fn decode_empty() {
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn encode_url_alphabet() {
        assert_eq!(encode(&hex!("fbff")), "-_8=");
        assert_eq!(encode(&hex!("010001")), "AQAB");
    }
}
