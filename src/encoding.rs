//! PKCS#1, PKCS#8 and SubjectPublicKeyInfo structures.
//!
//! ```text
//! SubjectPublicKeyInfo ::= SEQUENCE {
//!     algorithm         AlgorithmIdentifier,
//!     subjectPublicKey  BIT STRING  -- DER of RSAPublicKey
//! }
//!
//! PrivateKeyInfo ::= SEQUENCE {
//!     version              INTEGER (0),
//!     privateKeyAlgorithm  AlgorithmIdentifier,
//!     privateKey           OCTET STRING  -- DER of RSAPrivateKey
//! }
//! ```

use alloc::vec::Vec;
use const_oid::ObjectIdentifier;
use num_bigint::BigUint;
use zeroize::Zeroizing;

use crate::{
    der::DerValue,
    errors::{Error, Result},
    traits::{PrivateKeyParts, PublicKeyParts},
    RsaKey,
};

/// `rsaEncryption` object identifier ([RFC8017 Appendix C]).
///
/// [RFC8017 Appendix C]: https://datatracker.ietf.org/doc/html/rfc8017#appendix-C
pub const ALGORITHM_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// `AlgorithmIdentifier { rsaEncryption, NULL }`
fn algorithm_identifier() -> DerValue {
    DerValue::sequence(vec![
        DerValue::object_identifier(&ALGORITHM_OID),
        DerValue::null(),
    ])
}

fn uint(value: &BigUint) -> DerValue {
    DerValue::integer(&Zeroizing::new(value.to_bytes_be()))
}

/// Absent components encode as `INTEGER 0`.
fn optional_uint(value: Option<&BigUint>) -> DerValue {
    match value {
        Some(value) => uint(value),
        None => DerValue::integer(&[0]),
    }
}

/// PKCS#1 `RSAPublicKey ::= SEQUENCE { modulus INTEGER, publicExponent INTEGER }`
pub(crate) fn rsa_public_key<K: PublicKeyParts>(key: &K) -> DerValue {
    DerValue::sequence(vec![uint(key.n()), uint(key.e())])
}

pub(crate) fn subject_public_key_info<K: PublicKeyParts>(key: &K) -> DerValue {
    let subject_public_key = rsa_public_key(key).to_der();

    DerValue::sequence(vec![
        algorithm_identifier(),
        DerValue::bit_string(&subject_public_key),
    ])
}

/// PKCS#1 two-prime `RSAPrivateKey`.
pub(crate) fn rsa_private_key<K: PrivateKeyParts>(key: &K) -> Result<Zeroizing<DerValue>> {
    let d = key.d().ok_or(Error::InvalidKeyType)?;

    Ok(Zeroizing::new(DerValue::sequence(vec![
        DerValue::integer(&[0]),
        uint(key.n()),
        uint(key.e()),
        uint(d),
        optional_uint(key.p()),
        optional_uint(key.q()),
        optional_uint(key.dp()),
        optional_uint(key.dq()),
        optional_uint(key.qinv()),
    ])))
}

pub(crate) fn private_key_info<K: PrivateKeyParts>(key: &K) -> Result<Zeroizing<DerValue>> {
    let private_key = Zeroizing::new(rsa_private_key(key)?.to_der());

    Ok(Zeroizing::new(DerValue::sequence(vec![
        DerValue::integer(&[0]),
        algorithm_identifier(),
        DerValue::octet_string(&private_key),
    ])))
}

impl RsaKey {
    /// SubjectPublicKeyInfo for this key's public half.
    ///
    /// Available for both key kinds.
    pub fn to_public_key_info(&self) -> DerValue {
        subject_public_key_info(self)
    }

    /// PKCS#8 PrivateKeyInfo wrapping the PKCS#1 `RSAPrivateKey`.
    ///
    /// Absent CRT parameters are encoded as `INTEGER 0`. Fails with
    /// [`Error::InvalidKeyType`] for public keys.
    pub fn to_private_key_info(&self) -> Result<Zeroizing<DerValue>> {
        private_key_info(self)
    }

    /// DER-encoded SubjectPublicKeyInfo.
    pub fn to_public_key_der(&self) -> Vec<u8> {
        let der = self.to_public_key_info().to_der();
        tracing::trace!(len = der.len(), "encoded SubjectPublicKeyInfo");
        der
    }

    /// DER-encoded PKCS#8 PrivateKeyInfo.
    pub fn to_pkcs8_der(&self) -> Result<Zeroizing<Vec<u8>>> {
        let der = Zeroizing::new(self.to_private_key_info()?.to_der());
        tracing::trace!(len = der.len(), "encoded PKCS#8 PrivateKeyInfo");
        Ok(der)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JwkFields;
    use hex_literal::hex;

    fn public_key() -> RsaKey {
        RsaKey::from_jwk_fields(&JwkFields::public("ALs", "AQAB")).unwrap()
    }

    #[test]
    fn rsa_public_key_structure() {
        assert_eq!(
            rsa_public_key(&public_key()).to_der(),
            hex!("3009020200bb0203010001")
        );
    }

    #[test]
    fn public_key_info_structure() {
        assert_eq!(
            public_key().to_public_key_der(),
            hex!(
                "301d"
                "300d06092a864886f70d0101010500"
                "030c00" "3009020200bb0203010001"
            )
        );
    }

    #[test]
    fn private_key_info_structure() {
        let key = RsaKey::from_jwk_fields(&JwkFields {
            d: Some("AQ"),
            ..JwkFields::public("ALs", "AQAB")
        })
        .unwrap();

        assert_eq!(
            key.to_pkcs8_der().unwrap().as_slice(),
            hex!(
                "3034"
                "020100"
                "300d06092a864886f70d0101010500"
                "0420" "301e" "020100" "020200bb" "0203010001" "020101"
                "020100" "020100" "020100" "020100" "020100"
            )
        );
    }

    #[test]
    fn private_key_info_requires_private_exponent() {
        assert_eq!(
            public_key().to_private_key_info().err(),
            Some(Error::InvalidKeyType)
        );
        assert_eq!(public_key().to_pkcs8_der().err(), Some(Error::InvalidKeyType));
    }

    #[test]
    fn oid_matches_pkcs1_crate() {
        assert_eq!(ALGORITHM_OID.as_bytes(), pkcs1::ALGORITHM_OID.as_bytes());
    }
}
