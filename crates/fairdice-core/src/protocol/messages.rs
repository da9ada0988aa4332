//! Protocol messages.
//!
//! The commit publication is a [`CommitMessage`]; the reveal publication is
//! the [`FairValue`] itself.

use crate::crypto::{Commitment, DrawParams, FairValue};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Published before the counterpart acts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMessage {
    pub params: DrawParams,
    pub commitment: Commitment,
}

impl CommitMessage {
    /// Observer check of a reveal against this publication.
    ///
    /// Returns the independently derived value.
    pub fn verify(&self, reveal: &FairValue) -> Result<u64> {
        reveal
            .verify(&self.params, &self.commitment)
            .map_err(|violation| {
                tracing::error!(
                    draw_id = %self.params.draw_id(),
                    commitment = %self.commitment,
                    %violation,
                    "Reveal does not match published commitment"
                );
                violation.into()
            })
    }
}
