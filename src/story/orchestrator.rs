//! Drives a Running session through its rounds.

use std::sync::Arc;
use std::time::Duration;

use serenity::all::{ChannelId, UserId};
use tracing::{debug, info};

use crate::chunk::split_story;
use crate::error::Result;
use crate::subsystems::SyncRwLock;

use super::{collect_turn, SessionId, SessionRegistry, StoryError, StoryMessenger, TurnOutcome};

pub const NEXT_TURN: &str =
    "It's now the next person's turn to add to the story! Check your DM, you've been pinged!";
pub const CONTRIBUTION_ADDED: &str = "Your contribution has been added to the story!";
pub const TURN_SKIPPED: &str = "You didn't respond in time. Skipping your turn.";
pub const STORY_COMPLETE: &str = "The story is complete! Here's what you all wrote:";
pub const EMPTY_STORY: &str = "Nobody contributed to the story.";

/// Everything the loop needs, copied out of the session once so that no
/// lock is touched while waiting on players.
struct Plan {
    turns: Vec<(UserId, ChannelId)>,
    rounds: u32,
    wait: Duration,
    origin: ChannelId,
}

/// Plays session `id` to the end and posts the finished story.
///
/// Returns early, without posting anything, as soon as the session is
/// removed from the registry (i.e. cancelled), even in the middle of a
/// turn.
pub async fn run_story<M>(
    games: SyncRwLock<SessionRegistry>,
    messenger: Arc<M>,
    id: SessionId,
) -> Result<()>
where
    M: StoryMessenger + ?Sized,
{
    let Some(cancel) = games.read()?.cancellation(id) else {
        return Err(StoryError::NoSuchSession(id).into());
    };

    let finished = tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        res = play(&games, &*messenger, id) => res?,
    };

    match finished {
        Some((origin, story)) => {
            info!("Story game {} completed", id);
            announce(&*messenger, origin, &story).await
        }
        None => {
            info!("Story game {} stopped before completion", id);
            Ok(())
        }
    }
}

fn plan(games: &SyncRwLock<SessionRegistry>, id: SessionId) -> Result<Plan> {
    let reg = games.read()?;
    let session = reg.get(id).ok_or(StoryError::NoSuchSession(id))?;

    let turns = session.turn_order().iter()
        .map(|p| {
            session.dm_channel(*p)
                .map(|c| (*p, c))
                .ok_or_else(|| StoryError::DmUnreachable(vec![*p]))
        })
        .collect::<core::result::Result<Vec<_>, _>>()?;

    Ok(Plan {
        turns,
        rounds: session.config().num_rounds,
        wait: session.config().wait_time,
        origin: session.origin_channel(),
    })
}

/// The round loop. Yields the origin channel and the assembled story
/// once every turn has been played, or `None` if the session vanished.
async fn play<M>(
    games: &SyncRwLock<SessionRegistry>,
    messenger: &M,
    id: SessionId,
) -> Result<Option<(ChannelId, String)>>
where
    M: StoryMessenger + ?Sized,
{
    let plan = plan(games, id)?;

    for round in 1..=plan.rounds {
        messenger.broadcast(plan.origin, &format!("Starting Round {}", round)).await?;

        for &(player, dm) in &plan.turns {
            let previous = match games.read()?.get(id) {
                Some(session) => session.previous_sentence().to_string(),
                None => return Ok(None),
            };

            messenger.broadcast(plan.origin, NEXT_TURN).await?;
            messenger.send_dm(
                dm,
                &format!("It's your turn! The previous sentence was:\n\n{}", previous),
            ).await?;

            debug!("Story game {}: round {}, waiting on {}", id, round, player);
            match collect_turn(messenger, player, dm, plan.wait).await? {
                TurnOutcome::Contributed(text) => {
                    let appended = match games.write()?.get_mut(id) {
                        Some(session) => session.contribute(text).map(|_| true)?,
                        None => false,
                    };
                    if !appended {
                        return Ok(None);
                    }
                    messenger.send_dm(dm, CONTRIBUTION_ADDED).await?;
                }
                TurnOutcome::TimedOut => {
                    debug!("Story game {}: {} missed their turn", id, player);
                    messenger.send_dm(dm, TURN_SKIPPED).await?;
                }
            }
        }
    }

    let mut reg = games.write()?;
    let Some(session) = reg.get_mut(id) else {
        return Ok(None);
    };
    let story = session.complete()?;
    let origin = session.origin_channel();
    reg.remove(id);

    Ok(Some((origin, story)))
}

async fn announce<M>(messenger: &M, origin: ChannelId, story: &str) -> Result<()>
where
    M: StoryMessenger + ?Sized,
{
    messenger.broadcast(origin, STORY_COMPLETE).await?;

    if story.is_empty() {
        return messenger.broadcast(origin, EMPTY_STORY).await;
    }
    for part in split_story(story) {
        messenger.broadcast(origin, &part).await?;
    }
    Ok(())
}
