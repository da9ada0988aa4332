//! Provably fair non-transitive dice game.
//!
//! The program is the host. Each random decision it makes is committed with
//! HMAC-SHA256 before the player acts and revealed afterwards so the player
//! can check it.

mod config;
mod render;
mod session;

use config::{Config, USAGE};
use rand::rngs::OsRng;
use session::{FlowError, Session};
use std::io;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> ExitCode {
    // stdout belongs to the game
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let config = match Config::from_env_and_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };
    info!(dice = config.dice.len(), precision = config.precision, "Starting game");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        config.dice,
        config.precision,
        stdin.lock(),
        stdout.lock(),
        OsRng,
    );

    match session.run() {
        Ok(()) | Err(FlowError::Quit) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Game aborted");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
