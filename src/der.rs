//! Minimal ASN.1 DER encoder.
//!
//! Covers exactly the universal types RSA key containers are built from:
//! INTEGER, BIT STRING, OCTET STRING, NULL, OBJECT IDENTIFIER and SEQUENCE.
//! Values form a strict tree; encoding computes each length from the children
//! and never fails.

mod length;
mod uint;

pub use self::length::encode_length;
pub use self::uint::canonicalize;

use alloc::vec::Vec;
use const_oid::ObjectIdentifier;
use zeroize::Zeroize;

/// Universal tag numbers used by this encoder.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Tag {
    /// `INTEGER`
    Integer = 0x02,
    /// `BIT STRING`
    BitString = 0x03,
    /// `OCTET STRING`
    OctetString = 0x04,
    /// `NULL`
    Null = 0x05,
    /// `OBJECT IDENTIFIER`
    ObjectIdentifier = 0x06,
    /// `SEQUENCE` (constructed)
    Sequence = 0x30,
}

/// A DER value: a tag together with its contents.
///
/// Primitive contents are stored already in their final form (canonical
/// integer bytes, BIT STRING with its leading unused-bits octet, packed OID
/// arcs), so encoding only has to prefix tags and lengths.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DerValue {
    /// Primitive value.
    Primitive {
        /// Universal tag.
        tag: Tag,
        /// Contents octets.
        contents: Vec<u8>,
    },
    /// `SEQUENCE` of child values, in order.
    Sequence(Vec<DerValue>),
}

impl DerValue {
    /// `INTEGER` holding the unsigned big-endian value `bytes`.
    pub fn integer(bytes: &[u8]) -> Self {
        Self::primitive(Tag::Integer, canonicalize(bytes))
    }

    /// `SEQUENCE` of `children`.
    pub fn sequence(children: Vec<DerValue>) -> Self {
        DerValue::Sequence(children)
    }

    /// `OBJECT IDENTIFIER`.
    pub fn object_identifier(oid: &ObjectIdentifier) -> Self {
        let mut arcs = oid.arcs();
        let mut contents = Vec::new();

        // every ObjectIdentifier has at least two arcs
        let first = arcs.next().unwrap_or(0);
        let second = arcs.next().unwrap_or(0);
        push_base128(u64::from(first) * 40 + u64::from(second), &mut contents);

        for arc in arcs {
            push_base128(u64::from(arc), &mut contents);
        }

        Self::primitive(Tag::ObjectIdentifier, contents)
    }

    /// `NULL`.
    pub fn null() -> Self {
        Self::primitive(Tag::Null, Vec::new())
    }

    /// `BIT STRING` with zero unused bits.
    pub fn bit_string(bytes: &[u8]) -> Self {
        let mut contents = Vec::with_capacity(bytes.len() + 1);
        contents.push(0);
        contents.extend_from_slice(bytes);
        Self::primitive(Tag::BitString, contents)
    }

    /// `OCTET STRING`.
    pub fn octet_string(bytes: &[u8]) -> Self {
        Self::primitive(Tag::OctetString, bytes.to_vec())
    }

    fn primitive(tag: Tag, contents: Vec<u8>) -> Self {
        DerValue::Primitive { tag, contents }
    }

    /// Tag of this value.
    pub fn tag(&self) -> Tag {
        match self {
            DerValue::Primitive { tag, .. } => *tag,
            DerValue::Sequence(_) => Tag::Sequence,
        }
    }

    /// Length of the contents octets.
    pub fn value_len(&self) -> usize {
        match self {
            DerValue::Primitive { contents, .. } => contents.len(),
            DerValue::Sequence(children) => children.iter().map(DerValue::encoded_len).sum(),
        }
    }

    /// Length of the full tag-length-value encoding.
    pub fn encoded_len(&self) -> usize {
        let value_len = self.value_len();
        1 + length::length_len(value_len) + value_len
    }

    /// Append the DER encoding of this value to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.push(self.tag() as u8);
        encode_length(self.value_len(), out);

        match self {
            DerValue::Primitive { contents, .. } => out.extend_from_slice(contents),
            DerValue::Sequence(children) => {
                for child in children {
                    child.encode_into(out);
                }
            }
        }
    }

    /// Serialize this value as DER.
    pub fn to_der(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut out);
        out
    }
}

impl Zeroize for DerValue {
    fn zeroize(&mut self) {
        match self {
            DerValue::Primitive { contents, .. } => contents.zeroize(),
            DerValue::Sequence(children) => {
                for child in children.iter_mut() {
                    child.zeroize();
                }
                children.clear();
            }
        }
    }
}

/// Append `value` as base-128 digits, most significant first, with the high
/// bit set on every octet but the last.
fn push_base128(value: u64, out: &mut Vec<u8>) {
    let groups = ((u64::BITS - value.leading_zeros()).div_ceil(7)).max(1);

    for i in (0..groups).rev() {
        let digit = ((value >> (7 * i)) & 0x7f) as u8;
        out.push(if i == 0 { digit } else { digit | 0x80 });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

    #[test]
    fn integer() {
        assert_eq!(DerValue::integer(&hex!("00")).to_der(), hex!("020100"));
        assert_eq!(DerValue::integer(&hex!("010001")).to_der(), hex!("0203010001"));
        assert_eq!(DerValue::integer(&hex!("00bb")).to_der(), hex!("020200bb"));
        assert_eq!(DerValue::integer(&hex!("bb")).to_der(), hex!("020200bb"));
    }

    #[test]
    fn rsa_encryption_oid() {
        let der = DerValue::object_identifier(&RSA_ENCRYPTION).to_der();
        assert_eq!(der, hex!("06092a864886f70d010101"));
        assert_eq!(&der[2..], RSA_ENCRYPTION.as_bytes());
    }

    #[test]
    fn oid_packs_first_two_arcs() {
        let oid = ObjectIdentifier::new_unwrap("2.5.4.3");
        assert_eq!(DerValue::object_identifier(&oid).to_der(), hex!("0603550403"));
    }

    #[test]
    fn null_and_strings() {
        assert_eq!(DerValue::null().to_der(), hex!("0500"));
        assert_eq!(DerValue::bit_string(&hex!("abcd")).to_der(), hex!("030300abcd"));
        assert_eq!(DerValue::octet_string(&hex!("abcd")).to_der(), hex!("0402abcd"));
        assert_eq!(DerValue::octet_string(&[]).to_der(), hex!("0400"));
    }

    #[test]
    fn algorithm_identifier() {
        let alg = DerValue::sequence(vec![
            DerValue::object_identifier(&RSA_ENCRYPTION),
            DerValue::null(),
        ]);
        assert_eq!(alg.to_der(), hex!("300d06092a864886f70d0101010500"));
        assert_eq!(alg.encoded_len(), 15);
    }

    #[test]
    fn nested_sequence_long_form_length() {
        let inner = DerValue::octet_string(&[0x5a; 200]);
        let outer = DerValue::sequence(vec![inner]);
        let der = outer.to_der();

        assert_eq!(&der[..6], hex!("3081cb0481c8"));
        assert_eq!(der.len(), 3 + 3 + 200);
        assert_eq!(outer.encoded_len(), der.len());
    }

    #[test]
    fn empty_sequence() {
        assert_eq!(DerValue::sequence(vec![]).to_der(), hex!("3000"));
    }

    #[test]
    fn zeroize_clears_contents() {
        let mut value = DerValue::sequence(vec![DerValue::integer(&hex!("0102"))]);
        value.zeroize();
        assert_eq!(value, DerValue::sequence(vec![]));
    }
}
