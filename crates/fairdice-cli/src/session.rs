//! Interactive game flow.
//!
//! The program plays the host: it runs every commitment channel and picks
//! its die at random. The user is the guest, who sees each commitment before
//! acting and every secret after the reveal.

use crate::render::probability_table;
use fairdice_core::{
    judge, resolve_first_player, roll, CommitMessage, ConfigError, DiceSet, Error, FairValue,
    Player, ProbabilityMatrix, RoundResult,
};
use rand::seq::SliceRandom;
use rand::{CryptoRng, RngCore};
use std::io::{self, BufRead, Write};
use thiserror::Error as ThisError;
use tracing::{error, info};

#[derive(Debug, ThisError)]
pub enum FlowError {
    #[error("player quit")]
    Quit,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Core(#[from] Error),
}

/// Line-based terminal
struct Console<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Console<I, O> {
    /// Next trimmed line, `None` once input is closed
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }

    /// Prompt for a line; closed input ends the game
    fn prompt(&mut self, text: &str) -> Result<String, FlowError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()?.ok_or(FlowError::Quit)
    }

    fn show_commitment(&mut self, what: &str, published: &CommitMessage) -> io::Result<()> {
        writeln!(
            self.output,
            "I've committed to {} (a value in [0, {})). Commitment: {}",
            what,
            published.params.modulus(),
            published.commitment
        )
    }

    fn show_reveal(&mut self, proof: &FairValue) -> io::Result<()> {
        writeln!(self.output, "Revealed value: {}", proof.value)?;
        writeln!(
            self.output,
            "Verification data - Draw: {}, Secret: {}",
            proof.params.draw_id(),
            proof.secret
        )
    }

    fn guess_bit(&mut self, dice: &DiceSet, table: &str) -> Result<u64, FlowError> {
        writeln!(self.output, "\nTry to guess my value:")?;
        writeln!(self.output, "0 - You think I picked 0")?;
        writeln!(self.output, "1 - You think I picked 1")?;
        writeln!(self.output, "? - help")?;
        writeln!(self.output, "x - exit")?;
        loop {
            match self.prompt("Your guess: ")?.as_str() {
                "0" => return Ok(0),
                "1" => return Ok(1),
                "?" => self.show_help(dice, table)?,
                "x" => return Err(FlowError::Quit),
                _ => writeln!(self.output, "Invalid input. Please try again.")?,
            }
        }
    }

    fn choose_die(
        &mut self,
        dice: &DiceSet,
        taken: Option<usize>,
        table: &str,
    ) -> Result<usize, FlowError> {
        writeln!(self.output, "\nChoose your die:")?;
        for index in dice.available(taken) {
            if let Ok(die) = dice.get(index) {
                writeln!(self.output, "{} - {}", index + 1, die)?;
            }
        }
        writeln!(self.output, "? - help")?;
        writeln!(self.output, "x - exit")?;
        loop {
            let line = self.prompt("Your selection: ")?;
            match line.as_str() {
                "?" => self.show_help(dice, table)?,
                "x" => return Err(FlowError::Quit),
                _ => match line.parse::<usize>() {
                    Ok(choice) if choice >= 1 => match dice.select(choice - 1, taken) {
                        Ok(_) => return Ok(choice - 1),
                        Err(e) => writeln!(self.output, "{}. Try again.", e)?,
                    },
                    _ => writeln!(
                        self.output,
                        "Invalid input. Enter a die number, '?' for help or 'x' to exit."
                    )?,
                },
            }
        }
    }

    fn await_reveal(&mut self, published: &CommitMessage, whose: &str) -> Result<(), FlowError> {
        self.show_commitment(&format!("{} roll", whose), published)?;
        self.prompt("Press Enter to see the roll...")?;
        Ok(())
    }

    fn show_help(&mut self, dice: &DiceSet, table: &str) -> io::Result<()> {
        writeln!(self.output, "\nWinning probabilities ({} dice):", dice.len())?;
        write!(self.output, "{}", table)
    }
}

/// One game session over a terminal and an entropy source
pub struct Session<I, O, G> {
    dice: DiceSet,
    table: String,
    console: Console<I, O>,
    rng: G,
}

impl<I, O, G> Session<I, O, G>
where
    I: BufRead,
    O: Write,
    G: RngCore + CryptoRng,
{
    pub fn new(dice: DiceSet, precision: usize, input: I, output: O, rng: G) -> Self {
        let matrix: ProbabilityMatrix = dice.matrix();
        let table = probability_table(&dice, &matrix, precision);
        Self {
            dice,
            table,
            console: Console { input, output },
            rng,
        }
    }

    /// Main menu loop. Returns when the player exits or input closes.
    pub fn run(&mut self) -> Result<(), FlowError> {
        writeln!(self.console.output, "\n=== Provably Fair Non-Transitive Dice ===")?;
        writeln!(
            self.console.output,
            "Every random decision is committed before you act and revealed after.\n"
        )?;
        loop {
            writeln!(self.console.output, "\nMain Menu:")?;
            writeln!(self.console.output, "1 - Start Game")?;
            writeln!(self.console.output, "2 - Help")?;
            writeln!(self.console.output, "x - Exit")?;
            let choice = match self.console.prompt("Your selection: ") {
                Ok(choice) => choice,
                Err(FlowError::Quit) => break,
                Err(e) => return Err(e),
            };
            match choice.as_str() {
                "1" => match self.play_round() {
                    Ok(result) => info!(%result, "Round finished"),
                    Err(FlowError::Quit) => break,
                    Err(FlowError::Core(e)) if e.is_fairness_violation() => {
                        error!(error = %e, "Round aborted");
                        writeln!(
                            self.console.output,
                            "FAIRNESS VIOLATION: {}. This round is void.",
                            e
                        )?;
                    }
                    Err(e) => return Err(e),
                },
                "2" => self.console.show_help(&self.dice, &self.table)?,
                "x" => break,
                _ => writeln!(self.console.output, "Invalid selection. Try again.")?,
            }
        }
        writeln!(self.console.output, "Thanks for playing!")?;
        Ok(())
    }

    /// First-move draw, die selection, both rolls and the verdict
    pub fn play_round(&mut self) -> Result<RoundResult, FlowError> {
        writeln!(
            self.console.output,
            "\nLet's determine who makes the first move."
        )?;
        let console = &mut self.console;
        let (dice, table) = (&self.dice, self.table.as_str());
        let first = resolve_first_player(&mut self.rng, |published| {
            console.show_commitment("my choice", published)?;
            console.guess_bit(dice, table)
        })?;
        self.console.show_reveal(&first.proof)?;

        let (host_index, guest_index) = match first.chooser {
            Player::Guest => {
                writeln!(
                    self.console.output,
                    "You guessed correctly! You choose your die first."
                )?;
                let guest = self.console.choose_die(&self.dice, None, &self.table)?;
                let host = self.host_pick(Some(guest))?;
                (host, guest)
            }
            Player::Host => {
                writeln!(self.console.output, "I make the first move.")?;
                let host = self.host_pick(None)?;
                let guest = self
                    .console
                    .choose_die(&self.dice, Some(host), &self.table)?;
                (host, guest)
            }
        };
        let host_die = *self
            .dice
            .select(host_index, Some(guest_index))
            .map_err(Error::from)?;
        let guest_die = *self
            .dice
            .select(guest_index, Some(host_index))
            .map_err(Error::from)?;
        writeln!(
            self.console.output,
            "I play die {} [{}], you play die {} [{}].",
            host_index + 1,
            host_die,
            guest_index + 1,
            guest_die
        )?;

        writeln!(self.console.output, "\nIt's time for my throw.")?;
        let console = &mut self.console;
        let host_roll = roll(&host_die, &mut self.rng, |published| {
            console.await_reveal(published, "my")
        })?;
        self.console.show_reveal(&host_roll.proof)?;
        writeln!(self.console.output, "My throw is {}.", host_roll.face)?;

        writeln!(self.console.output, "\nIt's time for your throw.")?;
        let console = &mut self.console;
        let guest_roll = roll(&guest_die, &mut self.rng, |published| {
            console.await_reveal(published, "your")
        })?;
        self.console.show_reveal(&guest_roll.proof)?;
        writeln!(self.console.output, "Your throw is {}.", guest_roll.face)?;

        let result = judge(host_roll.face, guest_roll.face);
        let (host, guest) = (host_roll.face, guest_roll.face);
        writeln!(self.console.output, "\nFinal result:")?;
        let out = &mut self.console.output;
        match result {
            RoundResult::GuestWins => writeln!(out, "You win ({} > {})!", guest, host)?,
            RoundResult::HostWins => writeln!(out, "I win ({} > {})!", host, guest)?,
            RoundResult::Tie => writeln!(out, "It's a tie ({} = {})!", guest, host)?,
        }
        Ok(result)
    }

    /// Host's die: uniform over the dice the guest does not hold
    fn host_pick(&mut self, taken: Option<usize>) -> Result<usize, FlowError> {
        let found = self.dice.len();
        let index = self
            .dice
            .available(taken)
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| Error::from(ConfigError::TooFewDice { found }))?;
        if taken.is_none() {
            let die = self.dice.get(index).map_err(Error::from)?;
            writeln!(self.console.output, "I choose die {}: {}", index + 1, die)?;
        }
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("no entropy"))
        }
    }

    impl CryptoRng for FailingRng {}

    fn dice() -> DiceSet {
        DiceSet::parse(["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"]).unwrap()
    }

    fn run_script<G>(script: &str, rng: G) -> (Result<(), FlowError>, String)
    where
        G: RngCore + CryptoRng,
    {
        let mut output = Vec::new();
        let result = {
            let mut session = Session::new(dice(), 4, Cursor::new(script), &mut output, rng);
            session.run()
        };
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_help_then_exit() {
        let (result, output) = run_script("2\nx\n", StdRng::seed_from_u64(1));
        assert!(result.is_ok());
        assert!(output.contains("Winning probabilities (3 dice)"));
        assert!(output.contains("0.5556 (+0.1111)"));
        assert!(output.ends_with("Thanks for playing!\n"));
    }

    #[test]
    fn test_full_round_transcript() {
        // Guess 0, then die 1 (or die 2 if the host already took die 1),
        // two reveals, then exit. Spare lines land on harmless prompts.
        for seed in 0..8 {
            let (result, output) =
                run_script("1\n0\n1\n2\n\n\nx\n", StdRng::seed_from_u64(seed));
            assert!(result.is_ok(), "seed {}: {:?}", seed, result);
            assert_eq!(output.matches("Commitment: ").count(), 3, "seed {}", seed);
            assert_eq!(output.matches("Verification data").count(), 3);
            assert!(
                output.contains("You win (")
                    || output.contains("I win (")
                    || output.contains("It's a tie ("),
                "seed {}: {}",
                seed,
                output
            );
            assert!(output.ends_with("Thanks for playing!\n"));
        }
    }

    #[test]
    fn test_closed_input_ends_cleanly() {
        let (result, output) = run_script("1\n", StdRng::seed_from_u64(2));
        assert!(result.is_ok());
        assert!(output.contains("Commitment: "));
        assert!(output.ends_with("Thanks for playing!\n"));
    }

    #[test]
    fn test_invalid_guess_reprompts() {
        let (result, output) = run_script("1\n7\n?\nx\n", StdRng::seed_from_u64(3));
        assert!(result.is_ok());
        assert!(output.contains("Invalid input. Please try again."));
        assert!(output.contains("Winning probabilities"));
    }

    #[test]
    fn test_randomness_failure_is_fatal() {
        let (result, _) = run_script("1\n", FailingRng);
        assert!(matches!(
            result,
            Err(FlowError::Core(Error::Randomness(_)))
        ));
    }
}
