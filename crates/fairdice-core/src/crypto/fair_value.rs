//! Fair value derivation.
//!
//! A draw binds a fresh [`Secret`] to its parameters (draw id and modulus)
//! through an HMAC-SHA256 commitment. The drawn integer is read out of that
//! digest by rejection sampling over the full 256-bit range, so every value
//! in `[0, modulus)` is equally likely. Rejected digests are extended with a
//! counter under the same key, which keeps the outcome fixed at commit time.

use super::{Commitment, Secret};
use crate::error::{ConfigError, FairnessViolation, Result};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Domain separation tag prefixed to every draw message.
const DRAW_DOMAIN: &[u8] = b"fairdice/draw/v1";

/// Names one draw. Part of the committed message, so a reveal cannot be
/// replayed against another draw.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawId(Uuid);

impl DrawId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for DrawId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for DrawId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Debug for DrawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DrawId({})", self.0)
    }
}

impl fmt::Display for DrawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed parameters of one draw. The modulus is always greater than 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDrawParams")]
pub struct DrawParams {
    draw_id: DrawId,
    modulus: u64,
}

#[derive(Deserialize)]
struct RawDrawParams {
    draw_id: DrawId,
    modulus: u64,
}

impl TryFrom<RawDrawParams> for DrawParams {
    type Error = ConfigError;

    fn try_from(raw: RawDrawParams) -> std::result::Result<Self, Self::Error> {
        Self::with_id(raw.draw_id, raw.modulus)
    }
}

impl DrawParams {
    /// Parameters for a new draw with a fresh id
    pub fn new(modulus: u64) -> std::result::Result<Self, ConfigError> {
        Self::with_id(DrawId::new(), modulus)
    }

    pub fn with_id(draw_id: DrawId, modulus: u64) -> std::result::Result<Self, ConfigError> {
        if modulus <= 1 {
            return Err(ConfigError::InvalidModulus(modulus));
        }
        Ok(Self { draw_id, modulus })
    }

    pub fn draw_id(&self) -> DrawId {
        self.draw_id
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Message the secret is committed to: `tag || draw_id || modulus (BE)`
    pub fn message(&self) -> Vec<u8> {
        let mut message = Vec::with_capacity(DRAW_DOMAIN.len() + 16 + 8);
        message.extend_from_slice(DRAW_DOMAIN);
        message.extend_from_slice(self.draw_id.as_bytes());
        message.extend_from_slice(&self.modulus.to_be_bytes());
        message
    }
}

/// Map a digest to `[0, modulus)` without modulo bias.
///
/// The digest is a 256-bit big-endian integer `v`. With `r = 2^256 mod m`,
/// values `v >= 2^256 - r` lie in the incomplete top block and are rejected.
pub(crate) fn reduce_digest(digest: &[u8; 32], modulus: u64) -> Option<u64> {
    let m = u128::from(modulus);
    let r = (0..32).fold(1u128, |acc, _| (acc << 8) % m);

    // 2^256 - 1 - v is the bitwise complement; it exceeds u64 unless the
    // top 24 bytes are all ones.
    if digest[..24].iter().all(|&b| b == 0xff) {
        let mut low = [0u8; 8];
        low.copy_from_slice(&digest[24..]);
        if u128::from(!u64::from_be_bytes(low)) < r {
            return None;
        }
    }

    let value = digest
        .iter()
        .fold(0u128, |acc, &b| ((acc << 8) | u128::from(b)) % m);
    Some(value as u64)
}

/// Derive the committed integer for `secret` under `params`.
///
/// Returns the value and the number of digest extensions it took.
pub fn derive_value(
    secret: &Secret,
    params: &DrawParams,
) -> std::result::Result<(u64, u32), FairnessViolation> {
    let message = params.message();
    let base = Commitment::new(secret, &message);
    let (value, extensions) = settle(base.as_bytes(), params.modulus, u32::MAX, |counter| {
        *Commitment::extension(secret, &message, counter).as_bytes()
    })?;
    if extensions > 0 {
        tracing::debug!(draw_id = %params.draw_id, extensions, "draw needed digest extension");
    }
    Ok((value, extensions))
}

/// Reduce `base`, then extension digests `1..=limit` in order, until one is
/// accepted.
fn settle<F>(
    base: &[u8; 32],
    modulus: u64,
    limit: u32,
    mut extend: F,
) -> std::result::Result<(u64, u32), FairnessViolation>
where
    F: FnMut(u32) -> [u8; 32],
{
    if let Some(value) = reduce_digest(base, modulus) {
        return Ok((value, 0));
    }
    for counter in 1..=limit {
        if let Some(value) = reduce_digest(&extend(counter), modulus) {
            return Ok((value, counter));
        }
    }
    Err(FairnessViolation::ExtensionsExhausted)
}

/// Commit-side half of a draw. The secret and value stay private until
/// [`SealedDraw::open`] consumes it.
pub struct SealedDraw {
    params: DrawParams,
    secret: Secret,
    commitment: Commitment,
    value: u64,
    extensions: u32,
}

impl SealedDraw {
    /// Generate a fresh secret and fix the draw's digest and value
    pub fn seal<R>(params: DrawParams, rng: &mut R) -> Result<Self>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let secret = Secret::generate(rng)?;
        let commitment = Commitment::new(&secret, &params.message());
        let (value, extensions) = derive_value(&secret, &params)?;
        Ok(Self {
            params,
            secret,
            commitment,
            value,
            extensions,
        })
    }

    pub fn params(&self) -> &DrawParams {
        &self.params
    }

    /// Digest to publish before the counterpart acts
    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    /// Disclose the secret and the derived value
    pub fn open(self) -> FairValue {
        FairValue {
            params: self.params,
            commitment: self.commitment,
            secret: self.secret,
            value: self.value,
            extensions: self.extensions,
        }
    }
}

impl fmt::Debug for SealedDraw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SealedDraw")
            .field("params", &self.params)
            .field("commitment", &self.commitment)
            .finish_non_exhaustive()
    }
}

/// A revealed draw. Anyone holding the published commitment can replay it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FairValue {
    pub params: DrawParams,
    pub commitment: Commitment,
    pub secret: Secret,
    pub value: u64,
    /// Rejected digests skipped before `value` was read out
    pub extensions: u32,
}

impl FairValue {
    /// Check this reveal against what was published at commit time.
    ///
    /// Returns the independently derived value on success.
    pub fn verify(
        &self,
        params: &DrawParams,
        published: &Commitment,
    ) -> std::result::Result<u64, FairnessViolation> {
        if self.params != *params {
            return Err(FairnessViolation::ParameterMismatch);
        }
        if self.commitment != *published || !published.verify(&self.secret, &params.message()) {
            return Err(FairnessViolation::DigestMismatch);
        }
        let (derived, extensions) = derive_value(&self.secret, params)?;
        if derived != self.value {
            return Err(FairnessViolation::ValueMismatch {
                claimed: self.value,
                derived,
            });
        }
        if extensions != self.extensions {
            return Err(FairnessViolation::ExtensionMismatch {
                claimed: self.extensions,
                derived: extensions,
            });
        }
        Ok(derived)
    }
}
