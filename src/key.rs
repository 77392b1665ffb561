use num_bigint::BigUint;
use num_traits::{One, Zero};
use zeroize::{Zeroize, Zeroizing};

use crate::base64url;
use crate::errors::{Error, Result};
use crate::jwk::{Jwk, JwkFields};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Whether a key carries a private exponent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyKind {
    /// Modulus and public exponent only.
    Public,
    /// Private exponent present.
    Private,
}

/// An RSA key decoded from JWK members.
///
/// CRT parameters are kept exactly as supplied: nothing is recomputed from
/// the primes, and absent parameters stay absent. Private components are
/// zeroized on drop.
#[derive(Clone)]
pub struct RsaKey {
    /// Modulus
    n: BigUint,
    /// Public exponent
    e: BigUint,
    /// Private exponent
    d: Option<BigUint>,
    p: Option<BigUint>,
    q: Option<BigUint>,
    dp: Option<BigUint>,
    dq: Option<BigUint>,
    qinv: Option<BigUint>,
}

impl RsaKey {
    /// Decode a key from base64url JWK members.
    ///
    /// `n` and `e` must be non-empty and non-zero. The key is
    /// [`KeyKind::Private`] iff `d` is present; each CRT member is optional
    /// independently of the others.
    pub fn from_jwk_fields(fields: &JwkFields<'_>) -> Result<Self> {
        let n = decode_required("n", fields.n)?;
        let e = decode_required("e", fields.e)?;

        if n.is_zero() {
            return Err(Error::InvalidModulus);
        }
        if e.is_zero() {
            return Err(Error::InvalidExponent);
        }

        let key = RsaKey {
            n,
            e,
            d: decode_optional("d", fields.d)?,
            p: decode_optional("p", fields.p)?,
            q: decode_optional("q", fields.q)?,
            dp: decode_optional("dp", fields.dp)?,
            dq: decode_optional("dq", fields.dq)?,
            qinv: decode_optional("qi", fields.qi)?,
        };

        tracing::debug!(
            kind = ?key.kind(),
            modulus_bits = key.n.bits(),
            "decoded RSA key from JWK members"
        );

        Ok(key)
    }

    /// Decode a key from the text of a JSON Web Key.
    ///
    /// Fails with [`Error::MissingField`] if `kty` is not `"RSA"` or `n`/`e`
    /// are absent, and with [`Error::ParseError`] if the text is not a JSON
    /// object of string members.
    #[cfg(feature = "serde")]
    pub fn from_jwk_json(json: &str) -> Result<Self> {
        Self::try_from(&Jwk::from_json(json)?)
    }

    /// Key kind, derived from the presence of the private exponent.
    pub fn kind(&self) -> KeyKind {
        if self.d.is_some() {
            KeyKind::Private
        } else {
            KeyKind::Public
        }
    }

    /// Whether this key carries a private exponent.
    pub fn is_private(&self) -> bool {
        self.kind() == KeyKind::Private
    }

    /// Check the supplied CRT parameters against the modulus and private
    /// exponent.
    ///
    /// Only relations between present components are checked:
    /// `n = p·q`, `dp = d mod (p-1)`, `dq = d mod (q-1)` and
    /// `qi·q ≡ 1 (mod p)`. Transcoding never calls this; it is offered to
    /// callers who want to refuse inconsistent keys.
    pub fn validate(&self) -> Result<()> {
        if let (Some(p), Some(q)) = (&self.p, &self.q) {
            if p * q != self.n {
                return Err(Error::InconsistentKey);
            }
        }

        if let (Some(d), Some(p), Some(dp)) = (&self.d, &self.p, &self.dp) {
            if d % prime_minus_one(p)? != *dp {
                return Err(Error::InconsistentKey);
            }
        }

        if let (Some(d), Some(q), Some(dq)) = (&self.d, &self.q, &self.dq) {
            if d % prime_minus_one(q)? != *dq {
                return Err(Error::InconsistentKey);
            }
        }

        if let (Some(p), Some(q), Some(qinv)) = (&self.p, &self.q, &self.qinv) {
            prime_minus_one(p)?;
            if !((qinv * q) % p).is_one() {
                return Err(Error::InconsistentKey);
            }
        }

        Ok(())
    }
}

fn prime_minus_one(prime: &BigUint) -> Result<BigUint> {
    if prime <= &BigUint::one() {
        return Err(Error::InconsistentKey);
    }
    Ok(prime - BigUint::one())
}

fn decode_required(field: &'static str, value: &str) -> Result<BigUint> {
    if value.is_empty() {
        return Err(Error::MissingField { field });
    }
    decode_uint(field, value)
}

fn decode_optional(field: &'static str, value: Option<&str>) -> Result<Option<BigUint>> {
    value.map(|v| decode_uint(field, v)).transpose()
}

fn decode_uint(field: &'static str, value: &str) -> Result<BigUint> {
    let bytes = base64url::decode(value).map(Zeroizing::new).map_err(|_| {
        tracing::debug!(field, "JWK member is not valid base64url");
        Error::Decoding { field }
    })?;
    Ok(BigUint::from_bytes_be(&bytes))
}

impl TryFrom<&Jwk> for RsaKey {
    type Error = Error;

    fn try_from(jwk: &Jwk) -> Result<Self> {
        Self::from_jwk_fields(&jwk.fields()?)
    }
}

impl PublicKeyParts for RsaKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl PrivateKeyParts for RsaKey {
    fn d(&self) -> Option<&BigUint> {
        self.d.as_ref()
    }

    fn p(&self) -> Option<&BigUint> {
        self.p.as_ref()
    }

    fn q(&self) -> Option<&BigUint> {
        self.q.as_ref()
    }

    fn dp(&self) -> Option<&BigUint> {
        self.dp.as_ref()
    }

    fn dq(&self) -> Option<&BigUint> {
        self.dq.as_ref()
    }

    fn qinv(&self) -> Option<&BigUint> {
        self.qinv.as_ref()
    }
}

impl PartialEq for RsaKey {
    #[inline]
    fn eq(&self, other: &RsaKey) -> bool {
        self.n == other.n
            && self.e == other.e
            && self.d == other.d
            && self.p == other.p
            && self.q == other.q
            && self.dp == other.dp
            && self.dq == other.dq
            && self.qinv == other.qinv
    }
}

impl Eq for RsaKey {}

impl core::fmt::Debug for RsaKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RsaKey")
            .field("n", &self.n)
            .field("e", &self.e)
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

impl Zeroize for RsaKey {
    fn zeroize(&mut self) {
        for component in [
            &mut self.d,
            &mut self.p,
            &mut self.q,
            &mut self.dp,
            &mut self.dq,
            &mut self.qinv,
        ] {
            if let Some(value) = component.as_mut() {
                value.zeroize();
            }
            *component = None;
        }
    }
}

impl Drop for RsaKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}
