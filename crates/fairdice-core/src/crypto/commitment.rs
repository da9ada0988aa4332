//! Keyed-hash commitment for the commit-reveal scheme.

use super::Secret;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Commitment = HMAC-SHA256(key = secret, message)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment(#[serde(with = "super::hex32_serde")] [u8; 32]);

impl Commitment {
    /// Create a commitment to `message` keyed by `secret`
    pub fn new(secret: &Secret, message: &[u8]) -> Self {
        let mut mac = keyed(secret);
        mac.update(message);
        Self(mac.finalize().into_bytes().into())
    }

    /// Digest of `message || counter`, used to extend a rejected draw.
    pub(crate) fn extension(secret: &Secret, message: &[u8], counter: u32) -> Self {
        let mut mac = keyed(secret);
        mac.update(message);
        mac.update(&counter.to_be_bytes());
        Self(mac.finalize().into_bytes().into())
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Verify that the given secret and message produce this commitment.
    ///
    /// The comparison runs in constant time.
    pub fn verify(&self, secret: &Secret, message: &[u8]) -> bool {
        let mut mac = keyed(secret);
        mac.update(message);
        mac.verify_slice(&self.0).is_ok()
    }
}

fn keyed(secret: &Secret) -> HmacSha256 {
    // Infallible: HMAC pads or hashes keys of any length
    HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length")
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(byte: u8) -> Secret {
        Secret::from_bytes([byte; 32])
    }

    #[test]
    fn test_commitment_verification() {
        let s = secret(1);
        let commitment = Commitment::new(&s, b"draw");

        assert!(commitment.verify(&s, b"draw"));
    }

    #[test]
    fn test_commitment_is_deterministic() {
        assert_eq!(
            Commitment::new(&secret(3), b"draw"),
            Commitment::new(&secret(3), b"draw")
        );
    }

    #[test]
    fn test_different_messages_different_commitments() {
        let s = secret(1);
        assert_ne!(Commitment::new(&s, b"draw-1"), Commitment::new(&s, b"draw-2"));
    }

    #[test]
    fn test_wrong_secret_fails_verification() {
        let commitment = Commitment::new(&secret(1), b"draw");

        assert!(!commitment.verify(&secret(2), b"draw"));
    }

    #[test]
    fn test_wrong_message_fails_verification() {
        let s = secret(1);
        let commitment = Commitment::new(&s, b"draw");

        assert!(!commitment.verify(&s, b"other"));
    }

    #[test]
    fn test_extensions_are_distinct_from_base_digest() {
        let s = secret(9);
        let base = Commitment::new(&s, b"draw");
        let first = Commitment::extension(&s, b"draw", 1);
        let second = Commitment::extension(&s, b"draw", 2);

        assert_ne!(base, first);
        assert_ne!(first, second);
    }

    #[test]
    fn test_rfc4231_case_2() {
        // Known-answer check of the keyed hash itself
        let mut mac = HmacSha256::new_from_slice(b"Jefe").unwrap();
        mac.update(b"what do ya want for nothing?");
        assert_eq!(
            hex::encode(mac.finalize().into_bytes()),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }
}
