//! Program configuration from arguments and environment.

use fairdice_core::{ConfigError, DiceSet};

const DEFAULT_PRECISION: usize = 4;
const MAX_PRECISION: usize = 8;

pub const USAGE: &str = "Usage: fairdice <die> <die> <die> [die...]\n\
    Each die is six comma separated integers, for example:\n  \
    fairdice 2,2,4,4,9,9 6,8,1,1,8,6 7,5,3,7,5,3";

#[derive(Debug, Clone)]
pub struct Config {
    pub dice: DiceSet,
    /// Decimal places in the probability table
    pub precision: usize,
}

impl Config {
    /// Dice from positional arguments, table precision from
    /// `FAIRDICE_PRECISION`.
    pub fn from_env_and_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let precision = std::env::var("FAIRDICE_PRECISION")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PRECISION);
        Self::new(args, precision)
    }

    pub fn new<I>(args: I, precision: usize) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        Ok(Self {
            dice: DiceSet::parse(args)?,
            precision: precision.min(MAX_PRECISION),
        })
    }
}
