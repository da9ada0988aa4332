//! Dice, fair dice decisions and win-probability analysis.

mod die;
mod probability;
mod resolver;

pub use die::{DiceSet, Die, FACES};
pub use probability::{MatrixEntry, PairStats, ProbabilityMatrix, COMBINATIONS, DIAGONAL_SENTINEL};
pub use resolver::{judge, resolve_first_player, roll, FirstMove, Roll};
