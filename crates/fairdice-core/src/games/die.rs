//! Dice and dice sets.

use super::ProbabilityMatrix;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of faces on every die
pub const FACES: usize = 6;

/// A six-sided die with arbitrary integer faces (duplicates allowed)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Die([i64; FACES]);

impl Die {
    pub fn new(faces: &[i64]) -> Result<Self, ConfigError> {
        let faces: [i64; FACES] = faces
            .try_into()
            .map_err(|_| ConfigError::FaceCount { found: faces.len() })?;
        Ok(Self(faces))
    }

    pub fn faces(&self) -> &[i64; FACES] {
        &self.0
    }

    /// Face at a 0-based index
    pub fn face(&self, index: usize) -> Option<i64> {
        self.0.get(index).copied()
    }
}

impl From<[i64; FACES]> for Die {
    fn from(faces: [i64; FACES]) -> Self {
        Self(faces)
    }
}

impl FromStr for Die {
    type Err = ConfigError;

    /// Parse a comma separated list such as `2,2,4,4,9,9`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let faces = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<i64>().map_err(|_| ConfigError::InvalidFace {
                    value: part.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&faces)
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, face) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", face)?;
        }
        Ok(())
    }
}

/// The dice offered for a game. Always holds at least [`DiceSet::MIN_DICE`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiceSet(Vec<Die>);

impl DiceSet {
    pub const MIN_DICE: usize = 3;

    pub fn new(dice: Vec<Die>) -> Result<Self, ConfigError> {
        if dice.len() < Self::MIN_DICE {
            return Err(ConfigError::TooFewDice { found: dice.len() });
        }
        Ok(Self(dice))
    }

    /// Parse one die per spec string, reporting the first invalid one
    pub fn parse<I, S>(specs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let specs: Vec<S> = specs.into_iter().collect();
        if specs.len() < Self::MIN_DICE {
            return Err(ConfigError::TooFewDice { found: specs.len() });
        }

        let dice = specs
            .into_iter()
            .enumerate()
            .map(|(index, spec)| {
                spec.as_ref()
                    .parse::<Die>()
                    .map_err(|source| ConfigError::InvalidDie {
                        index,
                        source: Box::new(source),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(dice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Die> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Result<&Die, ConfigError> {
        self.0.get(index).ok_or(ConfigError::DieIndex {
            index,
            len: self.0.len(),
        })
    }

    /// Indices still open to a chooser once `taken` is out of play
    pub fn available(&self, taken: Option<usize>) -> Vec<usize> {
        (0..self.0.len()).filter(|&i| Some(i) != taken).collect()
    }

    /// Select a die, refusing the one the other player already holds
    pub fn select(&self, index: usize, taken: Option<usize>) -> Result<&Die, ConfigError> {
        if Some(index) == taken {
            return Err(ConfigError::SameDie(index));
        }
        self.get(index)
    }

    pub fn matrix(&self) -> ProbabilityMatrix {
        ProbabilityMatrix::compute(&self.0)
    }
}
