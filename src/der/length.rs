//! Definite-length encoding in its shortest form ([X.690 § 10.1]).
//!
//! [X.690 § 10.1]: https://www.itu.int/rec/T-REC-X.690

use alloc::vec::Vec;

/// Append the DER length octets for a value of `len` bytes.
pub fn encode_length(len: usize, out: &mut Vec<u8>) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }

    let bytes = len.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    let significant = &bytes[skip..];

    out.push(0x80 | significant.len() as u8);
    out.extend_from_slice(significant);
}

/// Number of octets [`encode_length`] emits for `len`.
pub(crate) fn length_len(len: usize) -> usize {
    if len < 0x80 {
        1
    } else {
        1 + (usize::BITS - len.leading_zeros()).div_ceil(8) as usize
    }
}
