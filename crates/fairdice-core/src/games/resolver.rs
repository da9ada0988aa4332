//! Fair decisions for the dice game.
//!
//! Each decision runs its own [`CommitmentChannel`]. The counterpart closure
//! is called after the commitment is published and before the reveal, which
//! is where the guest makes its move (a guess, or simply acknowledging the
//! commitment). Every reveal is verified against the publication before a
//! result is handed back.

use super::{Die, FACES};
use crate::crypto::FairValue;
use crate::error::{ConfigError, Error};
use crate::protocol::{CommitMessage, CommitmentChannel, Player, RoundResult};
use rand::{CryptoRng, RngCore};
use tracing::info;

/// Who picks a die first, and the draw that decided it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FirstMove {
    pub chooser: Player,
    pub guess: u64,
    pub proof: FairValue,
}

/// A verified roll of one die
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roll {
    /// 0-based index into the die's faces
    pub face_index: usize,
    pub face: i64,
    pub proof: FairValue,
}

/// Run one channel, letting the counterpart act between commit and reveal.
fn exchange<R, F, T, E>(modulus: u64, rng: &mut R, counterpart: F) -> Result<(T, FairValue), E>
where
    R: RngCore + CryptoRng + ?Sized,
    F: FnOnce(&CommitMessage) -> Result<T, E>,
    E: From<Error>,
{
    let mut channel = CommitmentChannel::new(modulus)?;
    let published = channel.commit(rng)?;
    let action = counterpart(&published)?;
    let proof = channel.reveal()?;
    published.verify(&proof)?;
    Ok((action, proof))
}

/// Decide which player chooses a die first.
///
/// The host commits to a bit, the guest guesses it. A correct guess lets
/// the guest choose first; otherwise the host does. A guess other than 0 or
/// 1 is rejected before the reveal.
pub fn resolve_first_player<R, F, E>(rng: &mut R, guess: F) -> Result<FirstMove, E>
where
    R: RngCore + CryptoRng + ?Sized,
    F: FnOnce(&CommitMessage) -> Result<u64, E>,
    E: From<Error>,
{
    let (guess, proof) = exchange::<_, _, _, E>(2, rng, |published| match guess(published)? {
        bit @ (0 | 1) => Ok(bit),
        other => Err(Error::from(ConfigError::InvalidGuess(other)).into()),
    })?;
    let chooser = if guess == proof.value {
        Player::Guest
    } else {
        Player::Host
    };
    info!(
        draw_id = %proof.params.draw_id(),
        bit = proof.value,
        guess,
        %chooser,
        "First move decided"
    );
    Ok(FirstMove {
        chooser,
        guess,
        proof,
    })
}

/// Roll `die` through a fresh channel.
pub fn roll<R, F, E>(die: &Die, rng: &mut R, acknowledge: F) -> Result<Roll, E>
where
    R: RngCore + CryptoRng + ?Sized,
    F: FnOnce(&CommitMessage) -> Result<(), E>,
    E: From<Error>,
{
    let ((), proof) = exchange(FACES as u64, rng, acknowledge)?;
    // value < FACES, checked by the verified reveal
    let face_index = proof.value as usize;
    let face = die.faces()[face_index];
    info!(
        draw_id = %proof.params.draw_id(),
        %die,
        face_index,
        face,
        "Roll resolved"
    );
    Ok(Roll {
        face_index,
        face,
        proof,
    })
}

/// Higher face wins; equal faces are a tie, not a win for either side.
pub fn judge(host_face: i64, guest_face: i64) -> RoundResult {
    match host_face.cmp(&guest_face) {
        std::cmp::Ordering::Greater => RoundResult::HostWins,
        std::cmp::Ordering::Less => RoundResult::GuestWins,
        std::cmp::Ordering::Equal => RoundResult::Tie,
    }
}
