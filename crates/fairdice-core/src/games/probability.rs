//! Pairwise win probabilities between dice.
//!
//! Every ordered pair of distinct dice is scored over all 36 face
//! combinations. Counts are kept as integers, so the matrix is exactly
//! antisymmetric: `advantage(i, j) == -advantage(j, i)`.

use super::{Die, FACES};
use std::cmp::Ordering;

/// Face combinations between two dice
pub const COMBINATIONS: u32 = (FACES * FACES) as u32;

/// Display marker for a die paired with itself. Not a probability.
pub const DIAGONAL_SENTINEL: f64 = -1.0 / 3.0;

/// Outcome counts of one die rolled against another
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairStats {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl PairStats {
    pub fn between(die: &Die, other: &Die) -> Self {
        let mut stats = Self {
            wins: 0,
            losses: 0,
            ties: 0,
        };
        for a in die.faces() {
            for b in other.faces() {
                match a.cmp(b) {
                    Ordering::Greater => stats.wins += 1,
                    Ordering::Less => stats.losses += 1,
                    Ordering::Equal => stats.ties += 1,
                }
            }
        }
        stats
    }

    /// The same pairing seen from the other die
    pub fn reversed(&self) -> Self {
        Self {
            wins: self.losses,
            losses: self.wins,
            ties: self.ties,
        }
    }

    pub fn win_probability(&self) -> f64 {
        f64::from(self.wins) / f64::from(COMBINATIONS)
    }

    pub fn loss_probability(&self) -> f64 {
        f64::from(self.losses) / f64::from(COMBINATIONS)
    }

    /// P(win) - P(loss), in `[-1, 1]`
    pub fn advantage(&self) -> f64 {
        self.win_probability() - self.loss_probability()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixEntry {
    /// A die cannot play itself
    SelfPairing,
    Pair(PairStats),
}

impl MatrixEntry {
    pub fn stats(&self) -> Option<&PairStats> {
        match self {
            MatrixEntry::SelfPairing => None,
            MatrixEntry::Pair(stats) => Some(stats),
        }
    }

    pub fn advantage(&self) -> Option<f64> {
        self.stats().map(PairStats::advantage)
    }

    /// Advantage, or [`DIAGONAL_SENTINEL`] on the diagonal
    pub fn display_value(&self) -> f64 {
        self.advantage().unwrap_or(DIAGONAL_SENTINEL)
    }
}

/// N x N advantage table, row die against column die
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbabilityMatrix {
    size: usize,
    entries: Vec<MatrixEntry>,
}

impl ProbabilityMatrix {
    pub fn compute(dice: &[Die]) -> Self {
        let size = dice.len();
        let mut entries = vec![MatrixEntry::SelfPairing; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let stats = PairStats::between(&dice[i], &dice[j]);
                entries[i * size + j] = MatrixEntry::Pair(stats);
                entries[j * size + i] = MatrixEntry::Pair(stats.reversed());
            }
        }
        Self { size, entries }
    }

    pub fn entry(&self, row: usize, col: usize) -> Option<&MatrixEntry> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.entries.get(row * self.size + col)
    }

    /// Signed advantage of `row` over `col`; `None` on the diagonal
    pub fn advantage(&self, row: usize, col: usize) -> Option<f64> {
        self.entry(row, col).and_then(MatrixEntry::advantage)
    }

    pub fn win_probability(&self, row: usize, col: usize) -> Option<f64> {
        self.entry(row, col)
            .and_then(MatrixEntry::stats)
            .map(PairStats::win_probability)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[MatrixEntry]> {
        // size 0 would make chunks() panic
        self.entries.chunks(self.size.max(1))
    }

    /// Dice that beat `col` on average, best first
    pub fn counters(&self, col: usize) -> Vec<usize> {
        let mut counters: Vec<(usize, PairStats)> = (0..self.size)
            .filter_map(|row| {
                let stats = *self.entry(row, col)?.stats()?;
                (stats.wins > stats.losses).then_some((row, stats))
            })
            .collect();
        counters.sort_by_key(|(row, stats)| {
            (std::cmp::Reverse(i64::from(stats.wins) - i64::from(stats.losses)), *row)
        });
        counters.into_iter().map(|(row, _)| row).collect()
    }
}
