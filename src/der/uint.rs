//! Canonical big-endian encoding of unsigned ASN.1 INTEGER contents.

use alloc::vec::Vec;

/// Canonicalize a big-endian unsigned integer for use as DER INTEGER contents.
///
/// Leading zero bytes are stripped, keeping at least one byte, and a single
/// `0x00` is prepended when the most significant bit is set so the value
/// reads as non-negative in two's complement. Empty input is treated as zero.
pub fn canonicalize(raw: &[u8]) -> Vec<u8> {
    let stripped = strip_leading_zeroes(raw);

    match stripped.first() {
        None => vec![0],
        Some(&first) if first & 0x80 != 0 => {
            let mut out = Vec::with_capacity(stripped.len() + 1);
            out.push(0);
            out.extend_from_slice(stripped);
            out
        }
        Some(_) => stripped.to_vec(),
    }
}

fn strip_leading_zeroes(raw: &[u8]) -> &[u8] {
    let start = raw.iter().position(|&b| b != 0).unwrap_or(raw.len());
    &raw[start..]
}
