use std::collections::HashMap;

use serenity::all::{ChannelId, UserId};
use tokio_util::sync::CancellationToken;

use super::session::{GameSession, SessionId, StoryConfig};
use super::StoryError;

#[derive(Debug)]
struct Entry {
    session: GameSession,
    cancel: CancellationToken,
}

/// Every live session, keyed by a monotonically increasing id.
///
/// Ids are never handed out twice, even after the session they named is
/// removed.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    last_id: u64,
    sessions: HashMap<SessionId, Entry>,
}

impl SessionRegistry {
    /// Opens a lobby for `host`, unless they already host an active one.
    pub fn create(
        &mut self,
        host: UserId,
        origin_channel: ChannelId,
        config: StoryConfig,
    ) -> Result<SessionId, StoryError> {
        if self.find_by_host(host).is_some() {
            return Err(StoryError::AlreadyHosting);
        }

        self.last_id += 1;
        let id = SessionId(self.last_id);
        let entry = Entry {
            session: GameSession::new(id, host, origin_channel, config),
            cancel: CancellationToken::new(),
        };
        self.sessions.insert(id, entry);
        Ok(id)
    }

    pub fn get(&self, id: SessionId) -> Option<&GameSession> {
        self.sessions.get(&id).map(|e| &e.session)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut GameSession> {
        self.sessions.get_mut(&id).map(|e| &mut e.session)
    }

    /// Like [SessionRegistry::get_mut], but a missing session is an error.
    pub fn session_mut(&mut self, id: SessionId) -> Result<&mut GameSession, StoryError> {
        self.get_mut(id).ok_or(StoryError::NoSuchSession(id))
    }

    /// Token that fires when the session is removed.
    pub fn cancellation(&self, id: SessionId) -> Option<CancellationToken> {
        self.sessions.get(&id).map(|e| e.cancel.clone())
    }

    /// Retires a session and stops anything still working on it.
    pub fn remove(&mut self, id: SessionId) -> Option<GameSession> {
        self.sessions.remove(&id).map(|e| {
            e.cancel.cancel();
            e.session
        })
    }

    /// The Lobby or Running session hosted by `host`, if any.
    pub fn find_by_host(&self, host: UserId) -> Option<&GameSession> {
        self.sessions.values()
            .map(|e| &e.session)
            .find(|s| s.host() == host && s.state().is_active())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::SessionState;

    fn user(n: u64) -> UserId {
        UserId::new(n)
    }

    fn channel() -> ChannelId {
        ChannelId::new(100)
    }

    #[test]
    fn one_active_session_per_host() {
        let mut reg = SessionRegistry::default();
        let id = reg.create(user(1), channel(), StoryConfig::default()).unwrap();
        reg.get_mut(id).unwrap().join(user(2)).unwrap();

        let again = reg.create(user(1), channel(), StoryConfig { num_rounds: 9, ..Default::default() });
        assert_eq!(again, Err(StoryError::AlreadyHosting));

        let original = reg.get(id).unwrap();
        assert_eq!(original.players(), &[user(1), user(2)]);
        assert_eq!(original.config().num_rounds, 1);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn players_can_host_their_own_game() {
        let mut reg = SessionRegistry::default();
        let a = reg.create(user(1), channel(), StoryConfig::default()).unwrap();
        let b = reg.create(user(2), channel(), StoryConfig::default()).unwrap();
        assert_ne!(a, b);
        assert_eq!(reg.find_by_host(user(2)).map(|s| s.id()), Some(b));
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut reg = SessionRegistry::default();
        let a = reg.create(user(1), channel(), StoryConfig::default()).unwrap();
        let b = reg.create(user(2), channel(), StoryConfig::default()).unwrap();
        reg.remove(a);
        let c = reg.create(user(3), channel(), StoryConfig::default()).unwrap();
        assert_ne!(c, a);
        assert_ne!(c, b);
    }

    #[test]
    fn removal_fires_the_cancellation_token() {
        let mut reg = SessionRegistry::default();
        let id = reg.create(user(1), channel(), StoryConfig::default()).unwrap();
        let token = reg.cancellation(id).unwrap();
        assert!(!token.is_cancelled());

        let removed = reg.remove(id).unwrap();
        assert_eq!(removed.state(), SessionState::Lobby);
        assert!(token.is_cancelled());
        assert!(reg.get(id).is_none());
        assert!(reg.find_by_host(user(1)).is_none());
    }

    #[test]
    fn host_may_host_again_after_removal() {
        let mut reg = SessionRegistry::default();
        let id = reg.create(user(1), channel(), StoryConfig::default()).unwrap();
        reg.remove(id);
        assert!(reg.create(user(1), channel(), StoryConfig::default()).is_ok());
    }
}
