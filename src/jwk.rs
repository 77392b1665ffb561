//! JSON Web Key records ([RFC7517], [RFC7518 § 6.3]).
//!
//! [RFC7517]: https://datatracker.ietf.org/doc/html/rfc7517
//! [RFC7518 § 6.3]: https://datatracker.ietf.org/doc/html/rfc7518#section-6.3

use alloc::string::String;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::errors::{Error, Result};

/// `kty` value identifying RSA keys.
pub const KTY_RSA: &str = "RSA";

/// An RSA JSON Web Key as decoded from JSON.
///
/// Members other than the ones below are ignored when deserializing. The
/// private members are zeroized on drop.
#[derive(Clone, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Jwk {
    /// Key type, `"RSA"` for keys this crate accepts.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub kty: Option<String>,
    /// Key ID.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub kid: Option<String>,
    /// Modulus.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub n: Option<String>,
    /// Public exponent.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub e: Option<String>,
    /// Private exponent.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub d: Option<String>,
    /// First prime factor.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub p: Option<String>,
    /// Second prime factor.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub q: Option<String>,
    /// First factor CRT exponent.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub dp: Option<String>,
    /// Second factor CRT exponent.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub dq: Option<String>,
    /// First CRT coefficient.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub qi: Option<String>,
}

impl Jwk {
    /// Parse a JWK from its JSON text.
    ///
    /// A known member that is present but not a string fails with
    /// [`Error::MissingField`] naming it. Text that is not a JSON object fails
    /// with [`Error::ParseError`].
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        let mut document: serde_json::Value =
            serde_json::from_str(json).map_err(|e| Error::ParseError {
                reason: format!("{}", e),
            })?;
        let members = document.as_object_mut().ok_or_else(|| Error::ParseError {
            reason: "JWK is not a JSON object".into(),
        })?;

        let mut member = |field: &'static str| match members.remove(field) {
            None => Ok(None),
            Some(serde_json::Value::String(value)) => Ok(Some(value)),
            Some(_) => {
                tracing::debug!(field, "JWK member is not a string");
                Err(Error::MissingField { field })
            }
        };

        let mut jwk = Jwk::default();
        jwk.kty = member("kty")?;
        jwk.kid = member("kid")?;
        jwk.n = member("n")?;
        jwk.e = member("e")?;
        jwk.d = member("d")?;
        jwk.p = member("p")?;
        jwk.q = member("q")?;
        jwk.dp = member("dp")?;
        jwk.dq = member("dq")?;
        jwk.qi = member("qi")?;
        Ok(jwk)
    }

    /// Borrow the base64url members, checking `kty` and the mandatory `n` and `e`.
    pub fn fields(&self) -> Result<JwkFields<'_>> {
        if self.kty.as_deref() != Some(KTY_RSA) {
            return Err(Error::MissingField { field: "kty" });
        }

        let n = self.n.as_deref().ok_or(Error::MissingField { field: "n" })?;
        let e = self.e.as_deref().ok_or(Error::MissingField { field: "e" })?;

        Ok(JwkFields {
            n,
            e,
            d: self.d.as_deref(),
            p: self.p.as_deref(),
            q: self.q.as_deref(),
            dp: self.dp.as_deref(),
            dq: self.dq.as_deref(),
            qi: self.qi.as_deref(),
        })
    }
}

impl core::fmt::Debug for Jwk {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Jwk")
            .field("kty", &self.kty)
            .field("kid", &self.kid)
            .field("n", &self.n)
            .field("e", &self.e)
            .field("d", &self.d.as_ref().map(|_| ".."))
            .finish_non_exhaustive()
    }
}

impl Zeroize for Jwk {
    fn zeroize(&mut self) {
        for member in [
            &mut self.d,
            &mut self.p,
            &mut self.q,
            &mut self.dp,
            &mut self.dq,
            &mut self.qi,
        ] {
            member.zeroize();
        }
    }
}

impl Drop for Jwk {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Base64url-encoded RSA key members supplied directly, without a JSON envelope.
///
/// ```
/// use rsa_jwk_pem::JwkFields;
///
/// let fields = JwkFields {
///     d: Some("AQ"),
///     ..JwkFields::public("ALs", "AQAB")
/// };
/// assert!(fields.is_private());
/// ```
#[derive(Clone, Copy)]
pub struct JwkFields<'a> {
    /// Modulus.
    pub n: &'a str,
    /// Public exponent.
    pub e: &'a str,
    /// Private exponent.
    pub d: Option<&'a str>,
    /// First prime factor.
    pub p: Option<&'a str>,
    /// Second prime factor.
    pub q: Option<&'a str>,
    /// First factor CRT exponent.
    pub dp: Option<&'a str>,
    /// Second factor CRT exponent.
    pub dq: Option<&'a str>,
    /// First CRT coefficient.
    pub qi: Option<&'a str>,
}

impl<'a> JwkFields<'a> {
    /// Members of a public key.
    pub fn public(n: &'a str, e: &'a str) -> Self {
        Self {
            n,
            e,
            d: None,
            p: None,
            q: None,
            dp: None,
            dq: None,
            qi: None,
        }
    }

    /// Whether the private exponent is present.
    pub fn is_private(&self) -> bool {
        self.d.is_some()
    }
}
