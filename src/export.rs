//! PEM export of decoded keys.

use alloc::string::String;
use core::str::FromStr;
use zeroize::Zeroizing;

use crate::{
    errors::{Error, Result},
    pem::{self, LineEnding, PemLabel},
    RsaKey,
};

/// Output encodings of key material.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum KeyEncoding {
    /// PEM-wrapped SubjectPublicKeyInfo / PKCS#8 PrivateKeyInfo.
    #[default]
    PemPkcs8,
    /// PEM-wrapped PKCS#1 (`RSA PUBLIC KEY` / `RSA PRIVATE KEY`).
    ///
    /// Recognized but not supported: requesting it fails with
    /// [`Error::UnsupportedEncoding`].
    PemPkcs1,
}

impl FromStr for KeyEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PEM_PKCS8" | "pem-pkcs8" => Ok(KeyEncoding::PemPkcs8),
            "PEM_PKCS1" | "pem-pkcs1" => Ok(KeyEncoding::PemPkcs1),
            _ => Err(Error::UnsupportedEncoding),
        }
    }
}

fn ensure_supported(encoding: KeyEncoding) -> Result<()> {
    match encoding {
        KeyEncoding::PemPkcs8 => Ok(()),
        KeyEncoding::PemPkcs1 => Err(Error::UnsupportedEncoding),
    }
}

impl RsaKey {
    /// Public key as a `PUBLIC KEY` PEM document.
    ///
    /// Works for public and private keys alike.
    pub fn to_public_key_pem(&self, encoding: KeyEncoding) -> Result<String> {
        ensure_supported(encoding)?;
        pem::encode_string(PemLabel::PublicKey, LineEnding::LF, &self.to_public_key_der())
    }

    /// Private key as a PKCS#8 `PRIVATE KEY` PEM document.
    ///
    /// Fails with [`Error::InvalidKeyType`] if the key has no private exponent.
    pub fn to_private_key_pem(&self, encoding: KeyEncoding) -> Result<Zeroizing<String>> {
        ensure_supported(encoding)?;
        let der = self.to_pkcs8_der()?;
        pem::encode_string(PemLabel::PrivateKey, LineEnding::LF, &der).map(Zeroizing::new)
    }
}
