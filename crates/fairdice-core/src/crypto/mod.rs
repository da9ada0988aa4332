//! Cryptographic primitives for fair value derivation.
//!
//! This module provides:
//! - Secret: the per-draw 256-bit key
//! - Commitment: HMAC-SHA256 digest binding a secret to one draw
//! - SealedDraw and FairValue: the commit-side and revealed halves of a draw

mod commitment;
mod fair_value;
mod secret;

pub use commitment::Commitment;
pub use fair_value::{derive_value, DrawId, DrawParams, FairValue, SealedDraw};
pub use secret::Secret;

/// Hex-string serde for fixed 32-byte values.
pub(crate) mod hex32_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        hex::encode(bytes).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let hex_str = String::deserialize(d)?;
        let bytes = hex::decode(&hex_str).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("expected 32 bytes"))
    }
}
