//! Protocol types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Round result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    HostWins,
    GuestWins,
    Tie,
}

impl RoundResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundResult::HostWins => "Host wins",
            RoundResult::GuestWins => "Guest wins",
            RoundResult::Tie => "Tie",
        }
    }

    /// Winner of the round, `None` on a tie
    pub fn winner(&self) -> Option<Player> {
        match self {
            RoundResult::HostWins => Some(Player::Host),
            RoundResult::GuestWins => Some(Player::Guest),
            RoundResult::Tie => None,
        }
    }
}

impl fmt::Display for RoundResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Player identifier.
///
/// The host runs the commitment channels; the guest is the counterpart who
/// acts between commit and reveal and verifies every reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    Host,
    Guest,
}

impl Player {
    /// Get the opponent
    pub fn opponent(&self) -> Player {
        match self {
            Player::Host => Player::Guest,
            Player::Guest => Player::Host,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Host => write!(f, "Host"),
            Player::Guest => write!(f, "Guest"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::Host.opponent(), Player::Guest);
        assert_eq!(Player::Guest.opponent(), Player::Host);
    }

    #[test]
    fn test_round_result_str() {
        assert_eq!(RoundResult::HostWins.as_str(), "Host wins");
        assert_eq!(RoundResult::GuestWins.as_str(), "Guest wins");
        assert_eq!(RoundResult::Tie.as_str(), "Tie");
    }

    #[test]
    fn test_tie_has_no_winner() {
        assert_eq!(RoundResult::Tie.winner(), None);
        assert_eq!(RoundResult::GuestWins.winner(), Some(Player::Guest));
    }
}
