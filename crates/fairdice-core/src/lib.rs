//! Fairdice Core Library
//!
//! This crate provides the commit-reveal fairness protocol and the dice
//! analysis used by the two-party non-transitive dice game:
//! - Fair values: committed, verifiable integers in `[0, modulus)`
//! - Commitment channel: the `commit()` / `reveal()` state machine
//! - Dice resolution: first-move and roll decisions backed by the channel
//! - Probability matrix: pairwise win advantage between dice

pub mod crypto;
pub mod error;
pub mod games;
pub mod protocol;

#[cfg(test)]
mod testing;

pub use crypto::{Commitment, DrawId, DrawParams, FairValue, SealedDraw, Secret};
pub use error::{ConfigError, Error, FairnessViolation, Result};
pub use games::{
    judge, resolve_first_player, roll, DiceSet, Die, FirstMove, MatrixEntry, PairStats,
    ProbabilityMatrix, Roll, DIAGONAL_SENTINEL, FACES,
};
pub use protocol::{ChannelPhase, CommitMessage, CommitmentChannel, Player, RoundResult};
