//! Join / leave / start / cancel, as triggered by commands and lobby
//! buttons. Every action names a session id and the acting user; nothing
//! else is carried between events.

use std::collections::HashMap;
use std::sync::Arc;

use serenity::all::{ChannelId, Mentionable, UserId};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::subsystems::SyncRwLock;

use super::orchestrator::run_story;
use super::{SessionId, SessionRegistry, SessionState, StoryConfig, StoryError, StoryMessenger};

pub const GAME_STARTING: &str = "The game is starting now! Check your DMs for your turn.";
pub const GAME_CANCELLED: &str = "The game has been cancelled.";
pub const GAME_FAILED: &str =
    "Something went wrong with the story game. The host can use /cancel-story to end it.";

pub fn host(
    games: &SyncRwLock<SessionRegistry>,
    host: UserId,
    origin_channel: ChannelId,
    config: StoryConfig,
) -> Result<SessionId> {
    let id = games.write()?.create(host, origin_channel, config)?;
    info!("Story game {} opened by {}", id, host);
    Ok(id)
}

pub async fn join<M>(
    games: &SyncRwLock<SessionRegistry>,
    messenger: &M,
    id: SessionId,
    user: UserId,
) -> Result<()>
where
    M: StoryMessenger + ?Sized,
{
    let origin = {
        let mut reg = games.write()?;
        let session = reg.session_mut(id)?;
        session.join(user)?;
        session.origin_channel()
    };

    messenger.broadcast(origin, &format!("{} has joined the game!", user.mention())).await
}

pub async fn leave<M>(
    games: &SyncRwLock<SessionRegistry>,
    messenger: &M,
    id: SessionId,
    user: UserId,
) -> Result<()>
where
    M: StoryMessenger + ?Sized,
{
    let origin = {
        let mut reg = games.write()?;
        let session = reg.session_mut(id)?;
        session.leave(user)?;
        session.origin_channel()
    };

    messenger.broadcast(origin, &format!("{} has left the game.", user.mention())).await
}

/// Starts the game if `requester` hosts it and every player accepts DMs.
///
/// Each player's DMs are checked once. Players who join while checks are
/// in flight get checked too before anything is committed. On success the
/// round loop is spawned and its handle returned.
pub async fn start<M>(
    games: &SyncRwLock<SessionRegistry>,
    messenger: Arc<M>,
    id: SessionId,
    requester: UserId,
) -> Result<JoinHandle<()>>
where
    M: StoryMessenger + ?Sized + 'static,
{
    {
        let reg = games.read()?;
        let session = reg.get(id).ok_or(StoryError::NoSuchSession(id))?;
        if session.host() != requester {
            return Err(StoryError::Unauthorized.into());
        }
        if session.state() != SessionState::Lobby {
            return Err(StoryError::AlreadyStarted.into());
        }
    }

    let mut checked: HashMap<UserId, Option<ChannelId>> = HashMap::new();
    let origin = loop {
        let pending: Vec<UserId> = {
            let mut reg = games.write()?;
            let session = reg.session_mut(id)?;

            let pending: Vec<UserId> = session.players().iter()
                .filter(|p| !checked.contains_key(p))
                .copied()
                .collect();

            if pending.is_empty() {
                let dms: HashMap<UserId, ChannelId> = session.players().iter()
                    .filter_map(|p| checked.get(p).copied().flatten().map(|c| (*p, c)))
                    .collect();
                let order = session.shuffled_players(&mut rand::thread_rng());
                if let Err(e) = session.begin(order, dms) {
                    if let StoryError::DmUnreachable(ref players) = e {
                        warn!("Story game {} cannot start, {} player(s) refuse DMs", id, players.len());
                    }
                    return Err(e.into());
                }
                break session.origin_channel();
            }
            pending
        };

        for player in pending {
            let dm = messenger.check_dm(player).await?;
            checked.insert(player, dm);
        }
    };

    info!("Story game {} started", id);
    messenger.broadcast(origin, GAME_STARTING).await?;

    let games = games.clone();
    Ok(tokio::spawn(async move {
        if let Err(e) = run_story(games, messenger.clone(), id).await {
            error!("Story game {} aborted: {}", id, e);
            if let Err(e) = messenger.broadcast(origin, GAME_FAILED).await {
                error!("Story game {}: could not report the failure: {}", id, e);
            }
        }
    }))
}

/// Cancels session `id` on behalf of its host, whatever its state.
pub async fn cancel<M>(
    games: &SyncRwLock<SessionRegistry>,
    messenger: &M,
    id: SessionId,
    requester: UserId,
) -> Result<()>
where
    M: StoryMessenger + ?Sized,
{
    let origin = {
        let mut reg = games.write()?;
        let session = reg.get(id).ok_or(StoryError::NoSuchSession(id))?;
        if session.host() != requester {
            return Err(StoryError::Unauthorized.into());
        }
        let mut session = reg.remove(id).ok_or(StoryError::NoSuchSession(id))?;
        session.cancel()?;
        session.origin_channel()
    };

    info!("Story game {} cancelled", id);
    messenger.broadcast(origin, GAME_CANCELLED).await
}

/// Cancels whichever game `requester` is hosting.
pub async fn cancel_hosted<M>(
    games: &SyncRwLock<SessionRegistry>,
    messenger: &M,
    requester: UserId,
) -> Result<()>
where
    M: StoryMessenger + ?Sized,
{
    let id = games.read()?
        .find_by_host(requester)
        .map(|s| s.id())
        .ok_or(StoryError::NotHosting)?;

    cancel(games, messenger, id, requester).await
}
