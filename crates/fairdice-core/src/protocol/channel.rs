//! Commitment channel: one fair value, committed then revealed.
//!
//! ```text
//! Uncommitted --commit()--> Committed --reveal()--> Revealed
//! ```
//!
//! Whatever the counterpart does happens between the two calls. The digest
//! is fixed before that, so the committing side cannot steer the value
//! after seeing the counterpart's move. `Revealed` is terminal; a new value
//! needs a new channel and therefore a new secret.

use super::CommitMessage;
use crate::crypto::{DrawParams, FairValue, SealedDraw};
use crate::error::{Error, Result};
use rand::{CryptoRng, RngCore};
use std::fmt;
use tracing::debug;

/// Externally visible channel state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelPhase {
    Uncommitted,
    Committed,
    Revealed,
}

impl ChannelPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelPhase::Uncommitted => "uncommitted",
            ChannelPhase::Committed => "committed",
            ChannelPhase::Revealed => "revealed",
        }
    }
}

impl fmt::Display for ChannelPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

enum State {
    Uncommitted,
    Committed(SealedDraw),
    Revealed,
}

impl State {
    fn phase(&self) -> ChannelPhase {
        match self {
            State::Uncommitted => ChannelPhase::Uncommitted,
            State::Committed(_) => ChannelPhase::Committed,
            State::Revealed => ChannelPhase::Revealed,
        }
    }
}

/// Single-use commit-reveal exchange for one fair value
pub struct CommitmentChannel {
    params: DrawParams,
    state: State,
}

impl CommitmentChannel {
    /// Open a channel for a value in `[0, modulus)` under a fresh draw id
    pub fn new(modulus: u64) -> Result<Self> {
        Ok(Self::with_params(DrawParams::new(modulus)?))
    }

    pub fn with_params(params: DrawParams) -> Self {
        Self {
            params,
            state: State::Uncommitted,
        }
    }

    pub fn params(&self) -> &DrawParams {
        &self.params
    }

    pub fn phase(&self) -> ChannelPhase {
        self.state.phase()
    }

    /// Draw the secret and publish only the digest and the parameters.
    pub fn commit<R>(&mut self, rng: &mut R) -> Result<CommitMessage>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        self.expect_phase(ChannelPhase::Uncommitted)?;

        let sealed = SealedDraw::seal(self.params, rng)?;
        let message = CommitMessage {
            params: self.params,
            commitment: *sealed.commitment(),
        };
        debug!(
            draw_id = %self.params.draw_id(),
            modulus = self.params.modulus(),
            commitment = %message.commitment,
            "Committed to draw"
        );
        self.state = State::Committed(sealed);
        Ok(message)
    }

    /// Disclose the secret and the value.
    ///
    /// The reveal is checked against the channel's own publication first;
    /// a mismatch is returned as a fairness violation.
    pub fn reveal(&mut self) -> Result<FairValue> {
        let sealed = match std::mem::replace(&mut self.state, State::Revealed) {
            State::Committed(sealed) => sealed,
            other => {
                let actual = other.phase();
                self.state = other;
                return Err(Error::Channel {
                    expected: ChannelPhase::Committed,
                    actual,
                });
            }
        };
        let published = CommitMessage {
            params: *sealed.params(),
            commitment: *sealed.commitment(),
        };
        let revealed = sealed.open();
        published.verify(&revealed)?;

        debug!(
            draw_id = %self.params.draw_id(),
            value = revealed.value,
            "Revealed draw"
        );
        Ok(revealed)
    }

    fn expect_phase(&self, expected: ChannelPhase) -> Result<()> {
        let actual = self.phase();
        if actual == expected {
            Ok(())
        } else {
            Err(Error::Channel { expected, actual })
        }
    }
}

impl fmt::Debug for CommitmentChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitmentChannel")
            .field("params", &self.params)
            .field("phase", &self.phase())
            .finish()
    }
}
