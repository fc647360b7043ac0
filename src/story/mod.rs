//! The story writing game.
//!
//! A host opens a lobby, players join, and once started every player is
//! asked over DM, in a fixed shuffled order and for a number of rounds, to
//! continue the story from the previous sentence. The finished story is
//! posted back to the channel the lobby was opened in.

mod collector;
pub mod discord;
pub mod lobby;
pub mod orchestrator;
mod registry;
mod session;

pub use collector::{collect_turn, TurnOutcome};
pub use registry::SessionRegistry;
pub use session::{GameSession, SessionId, SessionState, StoryConfig, STORY_START};

use serenity::all::{ChannelId, Mentionable, UserId};
use serenity::async_trait;
use serenity::prelude::TypeMapKey;
use thiserror::Error;

use crate::error::Result;
use crate::subsystems::{Subsystem, SyncRwLock};

/// Rejections of lobby and game actions. All of them are reported to the
/// acting user and leave the session as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoryError {
    #[error("You are already hosting a game.")]
    AlreadyHosting,
    #[error("You are not hosting any games.")]
    NotHosting,
    #[error("This game no longer exists.")]
    NoSuchSession(SessionId),
    #[error("This game is full.")]
    SessionFull,
    #[error("You've already joined the game.")]
    AlreadyJoined,
    #[error("You haven't joined the game yet.")]
    NotJoined,
    #[error("The host cannot leave the game. Use /cancel-story to end the game.")]
    HostCannotLeave,
    #[error("Sorry, the game has already started.")]
    AlreadyStarted,
    #[error("Only the host can do that.")]
    Unauthorized,
    #[error("Cannot start game! {} have their DMs set to closed. \
             Please temporarily open your DMs if you wish to play this game.",
            mentions(.0))]
    DmUnreachable(Vec<UserId>),
    #[error("The game is not running.")]
    NotRunning,
    #[error("The story already has every contribution it can take.")]
    StoryFull,
    #[error("The player list changed while starting. Please try again.")]
    RosterChanged,
}

fn mentions(users: &[UserId]) -> String {
    users.iter()
        .map(|u| u.mention().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Delivery side of the game: everything the core needs from the chat
/// platform.
#[async_trait]
pub trait StoryMessenger: Send + Sync {
    /// Opens a DM with `player` and proves it accepts messages by sending
    /// a short notice. `Ok(None)` means the player refuses DMs.
    async fn check_dm(&self, player: UserId) -> Result<Option<ChannelId>>;

    async fn send_dm(&self, channel: ChannelId, text: &str) -> Result<()>;

    async fn broadcast(&self, channel: ChannelId, text: &str) -> Result<()>;

    /// Resolves with the next message `player` writes in `channel`, or
    /// `None` once no further messages can arrive. Waits indefinitely;
    /// the deadline is the caller's business.
    async fn next_dm(&self, player: UserId, channel: ChannelId) -> Result<Option<String>>;
}

/// TypeMap key for the process-wide session registry.
pub struct StoryGames;

impl TypeMapKey for StoryGames {
    type Value = SyncRwLock<SessionRegistry>;
}

impl Subsystem for StoryGames {
    fn name() -> String {
        "Story Games".to_string()
    }
}
