//! PEM encapsulation of DER documents ([RFC7468]).
//!
//! The body is standard (padded) base64 wrapped at 64 characters per line;
//! every line, the footer included, is terminated by the line ending.
//!
//! [RFC7468]: https://datatracker.ietf.org/doc/html/rfc7468

use alloc::string::String;

use crate::errors::{Error, Result};

pub use pem_rfc7468::LineEnding;

/// Type label of a PEM document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PemLabel {
    /// `PUBLIC KEY`: SubjectPublicKeyInfo
    PublicKey,
    /// `PRIVATE KEY`: PKCS#8 PrivateKeyInfo
    PrivateKey,
}

impl PemLabel {
    /// Label text as it appears in the encapsulation boundaries.
    pub fn as_str(self) -> &'static str {
        match self {
            PemLabel::PublicKey => "PUBLIC KEY",
            PemLabel::PrivateKey => "PRIVATE KEY",
        }
    }
}

/// Encode `der` as a PEM document.
///
/// Fails with [`Error::ConstructionFailure`] if the encoder rejects the
/// document.
///
/// ```
/// use rsa_jwk_pem::pem::{encode_string, LineEnding, PemLabel};
///
/// let pem = encode_string(PemLabel::PublicKey, LineEnding::LF, b"hello")?;
/// assert_eq!(pem, "-----BEGIN PUBLIC KEY-----\naGVsbG8=\n-----END PUBLIC KEY-----\n");
/// # Ok::<(), rsa_jwk_pem::Error>(())
/// ```
pub fn encode_string(label: PemLabel, line_ending: LineEnding, der: &[u8]) -> Result<String> {
    let pem = pem_rfc7468::encode_string(label.as_str(), line_ending, der).map_err(|err| {
        tracing::debug!(label = label.as_str(), error = %err, "PEM encoding failed");
        Error::ConstructionFailure
    })?;

    tracing::trace!(label = label.as_str(), der_len = der.len(), "encoded PEM document");
    Ok(pem)
}
