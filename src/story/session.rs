use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use serenity::all::{ChannelId, UserId};

use super::StoryError;

/// Shown to the first player of a story in place of a previous sentence.
pub const STORY_START: &str = "Start the story!";

/// Handle of one hosted game. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryConfig {
    pub wait_time: Duration,
    pub num_rounds: u32,
    pub max_players: usize,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            wait_time: Duration::from_secs(120),
            num_rounds: 1,
            max_players: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Lobby,
    Running,
    Completed,
    Cancelled,
}

impl SessionState {
    /// Lobby and Running sessions count against the one-per-host rule.
    pub fn is_active(self) -> bool {
        matches!(self, SessionState::Lobby | SessionState::Running)
    }
}

/// One story game from creation to completion or cancellation.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: SessionId,
    host: UserId,
    /// Join order. Membership is what matters; the turn order is fixed
    /// separately at start.
    players: Vec<UserId>,
    config: StoryConfig,
    state: SessionState,
    story: Vec<String>,
    origin_channel: ChannelId,
    turn_order: Vec<UserId>,
    dm_channels: HashMap<UserId, ChannelId>,
}

impl GameSession {
    pub fn new(id: SessionId, host: UserId, origin_channel: ChannelId, config: StoryConfig) -> Self {
        Self {
            id,
            host,
            players: vec![host],
            config,
            state: SessionState::Lobby,
            story: vec![],
            origin_channel,
            turn_order: vec![],
            dm_channels: HashMap::new(),
        }
    }

    pub fn id(&self) -> SessionId { self.id }
    pub fn host(&self) -> UserId { self.host }
    pub fn players(&self) -> &[UserId] { &self.players }
    pub fn config(&self) -> &StoryConfig { &self.config }
    pub fn state(&self) -> SessionState { self.state }
    pub fn story(&self) -> &[String] { &self.story }
    pub fn origin_channel(&self) -> ChannelId { self.origin_channel }
    pub fn turn_order(&self) -> &[UserId] { &self.turn_order }

    pub fn has_player(&self, user: UserId) -> bool {
        self.players.contains(&user)
    }

    pub fn dm_channel(&self, user: UserId) -> Option<ChannelId> {
        self.dm_channels.get(&user).copied()
    }

    /// Sentence the next player continues from.
    pub fn previous_sentence(&self) -> &str {
        self.story.last().map(String::as_str).unwrap_or(STORY_START)
    }

    pub fn join(&mut self, user: UserId) -> Result<(), StoryError> {
        if self.state != SessionState::Lobby {
            return Err(StoryError::AlreadyStarted);
        }
        if self.has_player(user) {
            return Err(StoryError::AlreadyJoined);
        }
        if self.players.len() >= self.config.max_players {
            return Err(StoryError::SessionFull);
        }
        self.players.push(user);
        Ok(())
    }

    pub fn leave(&mut self, user: UserId) -> Result<(), StoryError> {
        if self.state != SessionState::Lobby {
            return Err(StoryError::AlreadyStarted);
        }
        if user == self.host {
            return Err(StoryError::HostCannotLeave);
        }
        let Some(pos) = self.players.iter().position(|p| *p == user) else {
            return Err(StoryError::NotJoined);
        };
        self.players.remove(pos);
        Ok(())
    }

    /// A uniformly random permutation of the current roster.
    pub fn shuffled_players<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<UserId> {
        let mut order = self.players.clone();
        order.shuffle(rng);
        order
    }

    /// Lobby -> Running. `order` must be a permutation of the roster and
    /// every player needs an open DM channel, otherwise nothing changes.
    pub fn begin(
        &mut self,
        order: Vec<UserId>,
        dm_channels: HashMap<UserId, ChannelId>,
    ) -> Result<(), StoryError> {
        if self.state != SessionState::Lobby {
            return Err(StoryError::AlreadyStarted);
        }

        let unreachable: Vec<UserId> = self.players.iter()
            .filter(|p| !dm_channels.contains_key(p))
            .copied()
            .collect();
        if !unreachable.is_empty() {
            return Err(StoryError::DmUnreachable(unreachable));
        }

        let mut sorted_order = order.clone();
        let mut sorted_players = self.players.clone();
        sorted_order.sort();
        sorted_players.sort();
        if sorted_order != sorted_players {
            return Err(StoryError::RosterChanged);
        }

        self.turn_order = order;
        self.dm_channels = dm_channels;
        self.state = SessionState::Running;
        Ok(())
    }

    /// Appends one contributed fragment. Only legal while Running and
    /// never past `num_rounds * players` fragments.
    pub fn contribute(&mut self, text: String) -> Result<(), StoryError> {
        if self.state != SessionState::Running {
            return Err(StoryError::NotRunning);
        }
        let capacity = self.config.num_rounds as usize * self.turn_order.len();
        if self.story.len() >= capacity {
            return Err(StoryError::StoryFull);
        }
        self.story.push(text);
        Ok(())
    }

    /// Running -> Completed. Returns the assembled story.
    pub fn complete(&mut self) -> Result<String, StoryError> {
        if self.state != SessionState::Running {
            return Err(StoryError::NotRunning);
        }
        self.state = SessionState::Completed;
        Ok(self.full_story())
    }

    /// Lobby | Running -> Cancelled. The partial story is dropped.
    pub fn cancel(&mut self) -> Result<(), StoryError> {
        if !self.state.is_active() {
            return Err(StoryError::NotRunning);
        }
        self.state = SessionState::Cancelled;
        self.story.clear();
        Ok(())
    }

    pub fn full_story(&self) -> String {
        self.story.join(" ")
    }
}
