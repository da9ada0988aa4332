//! Protocol types, messages and the commitment channel.

mod channel;
mod messages;
mod types;

pub use channel::{ChannelPhase, CommitmentChannel};
pub use messages::CommitMessage;
pub use types::{Player, RoundResult};
