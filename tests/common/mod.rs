#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use mayabot::error::{BotError, Result};
use mayabot::story::StoryMessenger;
use serenity::all::{ChannelId, UserId};
use serenity::async_trait;

/// Where a message went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Dm(UserId, String),
    Channel(ChannelId, String),
}

/// How a player answers their next turn prompt.
#[derive(Debug, Clone)]
pub enum Reply {
    After(Duration, String),
    Silent,
}

/// In-memory [StoryMessenger] with scripted players.
///
/// A player's DM channel id is their user id plus [DM_OFFSET].
#[derive(Default)]
pub struct ScriptedMessenger {
    closed_dms: HashSet<UserId>,
    broken_dm_lookups: HashSet<UserId>,
    failing_dms: HashSet<UserId>,
    replies: Mutex<HashMap<UserId, VecDeque<Reply>>>,
    sent: Mutex<Vec<Sent>>,
    dm_checks: Mutex<Vec<UserId>>,
}

pub const DM_OFFSET: u64 = 10_000;

/// Virtual time each DM check takes.
pub const DM_CHECK_DELAY: Duration = Duration::from_secs(1);

pub fn user(n: u64) -> UserId {
    UserId::new(n)
}

pub fn dm_of(player: UserId) -> ChannelId {
    ChannelId::new(player.get() + DM_OFFSET)
}

fn player_of(channel: ChannelId) -> Option<UserId> {
    channel.get().checked_sub(DM_OFFSET).filter(|n| *n > 0).map(UserId::new)
}

impl ScriptedMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_closed_dms(mut self, player: UserId) -> Self {
        self.closed_dms.insert(player);
        self
    }

    /// Opening a DM with `player` fails outright.
    pub fn with_broken_dm_lookup(mut self, player: UserId) -> Self {
        self.broken_dm_lookups.insert(player);
        self
    }

    /// Every DM sent to `player` fails.
    pub fn with_failing_dms(mut self, player: UserId) -> Self {
        self.failing_dms.insert(player);
        self
    }

    pub fn script(self, player: UserId, reply: Reply) -> Self {
        self.replies.lock().unwrap()
            .entry(player)
            .or_default()
            .push_back(reply);
        self
    }

    pub fn says_after(self, player: UserId, secs: u64, text: &str) -> Self {
        self.script(player, Reply::After(Duration::from_secs(secs), text.to_string()))
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn dm_checks(&self) -> Vec<UserId> {
        self.dm_checks.lock().unwrap().clone()
    }

    pub fn channel_messages(&self, channel: ChannelId) -> Vec<String> {
        self.sent().into_iter()
            .filter_map(|s| match s {
                Sent::Channel(c, text) if c == channel => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn dms_to(&self, player: UserId) -> Vec<String> {
        self.sent().into_iter()
            .filter_map(|s| match s {
                Sent::Dm(p, text) if p == player => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn turn_prompts(&self) -> Vec<UserId> {
        self.sent().into_iter()
            .filter_map(|s| match s {
                Sent::Dm(p, text) if text.starts_with("It's your turn!") => Some(p),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl StoryMessenger for ScriptedMessenger {
    async fn check_dm(&self, player: UserId) -> Result<Option<ChannelId>> {
        self.dm_checks.lock().unwrap().push(player);
        tokio::time::sleep(DM_CHECK_DELAY).await;
        if self.broken_dm_lookups.contains(&player) {
            Err(BotError::Other("DM lookup failed".to_string()))
        } else if self.closed_dms.contains(&player) {
            Ok(None)
        } else {
            Ok(Some(dm_of(player)))
        }
    }

    async fn send_dm(&self, channel: ChannelId, text: &str) -> Result<()> {
        let player = player_of(channel).expect("not a scripted DM channel");
        if self.failing_dms.contains(&player) {
            return Err(BotError::Other("DM delivery failed".to_string()));
        }
        self.sent.lock().unwrap().push(Sent::Dm(player, text.to_string()));
        Ok(())
    }

    async fn broadcast(&self, channel: ChannelId, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::Channel(channel, text.to_string()));
        Ok(())
    }

    async fn next_dm(&self, player: UserId, _channel: ChannelId) -> Result<Option<String>> {
        let reply = self.replies.lock().unwrap()
            .get_mut(&player)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Reply::Silent);

        match reply {
            Reply::After(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(Some(text))
            }
            Reply::Silent => std::future::pending().await,
        }
    }
}
