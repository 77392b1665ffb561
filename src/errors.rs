//! Error types.

use alloc::string::String;

/// Alias for [`core::result::Result`] with the `rsa-jwk-pem` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A mandatory JWK member is absent, empty or not a string, or `kty` is
    /// not `"RSA"`.
    #[error("missing or invalid JWK field: {field}")]
    MissingField {
        /// Name of the JWK member.
        field: &'static str,
    },

    /// A JWK member is not valid base64url.
    #[error("JWK field is not valid base64url: {field}")]
    Decoding {
        /// Name of the JWK member.
        field: &'static str,
    },

    /// The key does not carry the components the requested output needs.
    #[error("invalid key type")]
    InvalidKeyType,

    /// The requested output encoding is not supported.
    #[error("unsupported key encoding")]
    UnsupportedEncoding,

    /// The PEM encoder refused the document.
    #[error("key construction failed")]
    ConstructionFailure,

    /// Modulus is zero.
    #[error("invalid modulus")]
    InvalidModulus,

    /// Public exponent is zero.
    #[error("invalid exponent")]
    InvalidExponent,

    /// CRT parameters disagree with the modulus or private exponent.
    #[error("inconsistent CRT parameters")]
    InconsistentKey,

    /// JWK text is not a JSON object.
    #[error("parse error: {reason}")]
    ParseError {
        /// Parser message.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_names_the_field() {
        assert_eq!(
            Error::Decoding { field: "dq" }.to_string(),
            "JWK field is not valid base64url: dq"
        );
        assert_eq!(
            Error::MissingField { field: "kty" }.to_string(),
            "missing or invalid JWK field: kty"
        );
    }

    #[test]
    fn implements_error_trait() {
        let err: &dyn core::error::Error = &Error::InvalidModulus;
        assert_eq!(err.to_string(), "invalid modulus");
        assert!(err.source().is_none());
    }
}
