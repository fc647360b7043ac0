use std::time::Duration;

use serenity::all::{ChannelId, UserId};
use tokio::time::timeout;

use crate::error::Result;

use super::StoryMessenger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Contributed(String),
    TimedOut,
}

/// Waits up to `wait` for `player` to write in their DM `channel`.
///
/// Exactly one of the message and the deadline wins; the losing side is
/// dropped. A message stream that ends before the deadline counts as a
/// missed turn.
pub async fn collect_turn<M: StoryMessenger + ?Sized>(
    messenger: &M,
    player: UserId,
    channel: ChannelId,
    wait: Duration,
) -> Result<TurnOutcome> {
    match timeout(wait, messenger.next_dm(player, channel)).await {
        Ok(Ok(Some(text))) => Ok(TurnOutcome::Contributed(text)),
        Ok(Ok(None)) | Err(_) => Ok(TurnOutcome::TimedOut),
        Ok(Err(e)) => Err(e),
    }
}
