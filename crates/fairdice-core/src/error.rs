//! Error taxonomy shared by every fairdice component.

use crate::protocol::ChannelPhase;
use thiserror::Error;

/// Rejected input. Raised before any commitment is created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("each die must have exactly 6 faces, found {found}")]
    FaceCount { found: usize },

    #[error("face value {value:?} is not an integer")]
    InvalidFace { value: String },

    #[error("at least 3 dice are required, found {found}")]
    TooFewDice { found: usize },

    #[error("invalid die #{}: {source}", .index + 1)]
    InvalidDie {
        index: usize,
        #[source]
        source: Box<ConfigError>,
    },

    #[error("invalid modulus {0}: must be greater than 1")]
    InvalidModulus(u64),

    #[error("no die #{} in a set of {len}", .index + 1)]
    DieIndex { index: usize, len: usize },

    #[error("die #{} has already been chosen", .0 + 1)]
    SameDie(usize),

    #[error("guess {0} is not a bit, expected 0 or 1")]
    InvalidGuess(u64),
}

/// A revealed draw that does not match its published commitment.
///
/// This means the revealing party broke the protocol. It is never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FairnessViolation {
    #[error("revealed draw parameters differ from the published commitment")]
    ParameterMismatch,

    #[error("revealed secret does not reproduce the published digest")]
    DigestMismatch,

    #[error("revealed value {claimed} differs from the derived value {derived}")]
    ValueMismatch { claimed: u64, derived: u64 },

    #[error("revealed extension count {claimed} differs from the derived count {derived}")]
    ExtensionMismatch { claimed: u32, derived: u32 },

    #[error("extension counter exhausted without an unbiased value")]
    ExtensionsExhausted,
}

/// Errors from fairdice operations
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("fairness violation: {0}")]
    Fairness(#[from] FairnessViolation),

    #[error("secure randomness unavailable: {0}")]
    Randomness(String),

    #[error("commitment channel is {actual}, expected {expected}")]
    Channel {
        expected: ChannelPhase,
        actual: ChannelPhase,
    },
}

impl Error {
    /// Only configuration errors may be fixed by asking the caller again.
    ///
    /// A broken commitment or a dead randomness source stays broken; the
    /// caller must start over with a fresh channel.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    pub fn is_fairness_violation(&self) -> bool {
        matches!(self, Error::Fairness(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_config_errors_are_recoverable() {
        assert!(Error::from(ConfigError::TooFewDice { found: 2 }).is_recoverable());
        assert!(!Error::from(FairnessViolation::DigestMismatch).is_recoverable());
        assert!(!Error::Randomness("entropy pool closed".into()).is_recoverable());
        assert!(!Error::Channel {
            expected: ChannelPhase::Committed,
            actual: ChannelPhase::Revealed,
        }
        .is_recoverable());
    }

    #[test]
    fn test_fairness_violation_is_distinct() {
        let err = Error::from(FairnessViolation::DigestMismatch);
        assert!(err.is_fairness_violation());
        assert!(!Error::from(ConfigError::InvalidModulus(1)).is_fairness_violation());
    }

    #[test]
    fn test_messages_are_one_based() {
        let err = ConfigError::InvalidDie {
            index: 0,
            source: Box::new(ConfigError::FaceCount { found: 5 }),
        };
        assert_eq!(
            err.to_string(),
            "invalid die #1: each die must have exactly 6 faces, found 5"
        );
        assert_eq!(
            ConfigError::SameDie(2).to_string(),
            "die #3 has already been chosen"
        );
    }
}
