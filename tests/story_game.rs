mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use mayabot::error::BotError;
use mayabot::story::lobby::{self, GAME_CANCELLED, GAME_FAILED, GAME_STARTING};
use mayabot::story::orchestrator::{self, EMPTY_STORY, NEXT_TURN, STORY_COMPLETE, TURN_SKIPPED};
use mayabot::story::{SessionId, SessionRegistry, SessionState, StoryConfig, StoryError};
use mayabot::subsystems::SyncRwLock;
use serenity::all::{ChannelId, UserId};

use common::{dm_of, user, Reply, ScriptedMessenger, DM_CHECK_DELAY};

const ORIGIN: u64 = 500;

fn origin() -> ChannelId {
    ChannelId::new(ORIGIN)
}

fn config(wait_secs: u64, num_rounds: u32, max_players: usize) -> StoryConfig {
    StoryConfig {
        wait_time: Duration::from_secs(wait_secs),
        num_rounds,
        max_players,
    }
}

fn story_error(err: BotError) -> StoryError {
    match err {
        BotError::Story(e) => e,
        other => panic!("expected a story rejection, got {:?}", other),
    }
}

/// Forces a known turn order, bypassing the shuffle in [lobby::start].
fn begin_in_order(games: &SyncRwLock<SessionRegistry>, id: SessionId, order: Vec<UserId>) {
    let dms: HashMap<UserId, ChannelId> = order.iter().map(|p| (*p, dm_of(*p))).collect();
    games.write().unwrap()
        .get_mut(id).unwrap()
        .begin(order, dms).unwrap();
}

/// Everything posted to `channel` after the completion header.
fn posted_story(messenger: &ScriptedMessenger, channel: ChannelId) -> Vec<String> {
    let msgs = messenger.channel_messages(channel);
    let pos = msgs.iter().position(|m| m == STORY_COMPLETE)
        .expect("story was never announced");
    msgs[pos + 1..].to_vec()
}

#[tokio::test(start_paused = true)]
async fn two_players_write_a_story() {
    let games = SyncRwLock::<SessionRegistry>::default();
    let (host, joiner) = (user(1), user(2));
    let messenger = Arc::new(
        ScriptedMessenger::new()
            .says_after(joiner, 1, "Once upon a time")
            .says_after(host, 2, "the end."),
    );

    let id = lobby::host(&games, host, origin(), config(5, 1, 2)).unwrap();
    lobby::join(&games, &*messenger, id, joiner).await.unwrap();
    begin_in_order(&games, id, vec![joiner, host]);

    orchestrator::run_story(games.clone(), messenger.clone(), id).await.unwrap();

    assert_eq!(posted_story(&messenger, origin()), vec!["Once upon a time the end.".to_string()]);
    assert!(games.read().unwrap().is_empty());

    let host_dms = messenger.dms_to(host);
    assert_eq!(host_dms[0], "It's your turn! The previous sentence was:\n\nOnce upon a time");
    assert!(messenger.dms_to(joiner)[0].ends_with("Start the story!"));
}

#[tokio::test(start_paused = true)]
async fn silent_player_is_skipped() {
    let games = SyncRwLock::<SessionRegistry>::default();
    let (host, joiner) = (user(1), user(2));
    let messenger = Arc::new(
        ScriptedMessenger::new()
            .script(joiner, Reply::Silent)
            .says_after(host, 1, "the end."),
    );

    let id = lobby::host(&games, host, origin(), config(5, 1, 2)).unwrap();
    lobby::join(&games, &*messenger, id, joiner).await.unwrap();
    begin_in_order(&games, id, vec![joiner, host]);

    orchestrator::run_story(games.clone(), messenger.clone(), id).await.unwrap();

    assert_eq!(posted_story(&messenger, origin()), vec!["the end.".to_string()]);
    assert!(messenger.dms_to(joiner).contains(&TURN_SKIPPED.to_string()));
    assert!(!messenger.dms_to(host).contains(&TURN_SKIPPED.to_string()));
    assert!(games.read().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn everyone_silent_yields_an_empty_story_notice() {
    let games = SyncRwLock::<SessionRegistry>::default();
    let messenger = Arc::new(ScriptedMessenger::new());

    let id = lobby::host(&games, user(1), origin(), config(3, 2, 1)).unwrap();
    begin_in_order(&games, id, vec![user(1)]);
    orchestrator::run_story(games.clone(), messenger.clone(), id).await.unwrap();

    assert_eq!(posted_story(&messenger, origin()), vec![EMPTY_STORY.to_string()]);
    assert_eq!(messenger.turn_prompts().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn turn_order_is_fixed_across_rounds_and_gaps_never_reorder() {
    let games = SyncRwLock::<SessionRegistry>::default();
    let players = [user(1), user(2), user(3)];

    let mut messenger = ScriptedMessenger::new();
    for round in 1..=3 {
        for p in players {
            // Player 2 sleeps through the second round.
            if p == user(2) && round == 2 {
                messenger = messenger.script(p, Reply::Silent);
            } else {
                messenger = messenger.says_after(p, 1, &format!("p{}r{}", p.get(), round));
            }
        }
    }
    let messenger = Arc::new(messenger);

    let id = lobby::host(&games, players[0], origin(), config(10, 3, 3)).unwrap();
    for p in &players[1..] {
        lobby::join(&games, &*messenger, id, *p).await.unwrap();
    }
    let handle = lobby::start(&games, messenger.clone(), id, players[0]).await.unwrap();
    handle.await.unwrap();

    let prompts = messenger.turn_prompts();
    assert_eq!(prompts.len(), 9);
    let order = prompts[0..3].to_vec();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(sorted, players.to_vec());
    assert_eq!(prompts[3..6], order[..]);
    assert_eq!(prompts[6..9], order[..]);

    let expected: Vec<String> = (1..=3)
        .flat_map(|round| order.iter().map(move |p| (round, *p)))
        .filter(|(round, p)| !(*p == user(2) && *round == 2))
        .map(|(round, p)| format!("p{}r{}", p.get(), round))
        .collect();
    assert_eq!(posted_story(&messenger, origin()), vec![expected.join(" ")]);

    let msgs = messenger.channel_messages(origin());
    assert_eq!(msgs.iter().filter(|m| m.starts_with("Starting Round")).count(), 3);
    assert_eq!(msgs.iter().filter(|m| *m == NEXT_TURN).count(), 9);
    assert!(msgs.contains(&GAME_STARTING.to_string()));
}

#[tokio::test(start_paused = true)]
async fn long_story_is_split_on_1999_characters() {
    let games = SyncRwLock::<SessionRegistry>::default();
    let long = "x".repeat(2500);
    let messenger = Arc::new(ScriptedMessenger::new().says_after(user(1), 1, &long));

    let id = lobby::host(&games, user(1), origin(), config(5, 1, 1)).unwrap();
    begin_in_order(&games, id, vec![user(1)]);
    orchestrator::run_story(games.clone(), messenger.clone(), id).await.unwrap();

    let parts = posted_story(&messenger, origin());
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].len(), 1999);
    assert_eq!(parts[1].len(), 501);
}

#[tokio::test(start_paused = true)]
async fn start_is_refused_while_a_player_blocks_dms() {
    let games = SyncRwLock::<SessionRegistry>::default();
    let (host, joiner) = (user(1), user(2));
    let messenger = Arc::new(ScriptedMessenger::new().with_closed_dms(joiner));

    let id = lobby::host(&games, host, origin(), config(5, 1, 3)).unwrap();
    lobby::join(&games, &*messenger, id, joiner).await.unwrap();

    let err = lobby::start(&games, messenger.clone(), id, host).await.unwrap_err();
    assert_eq!(story_error(err), StoryError::DmUnreachable(vec![joiner]));

    let reg = games.read().unwrap();
    let session = reg.get(id).unwrap();
    assert_eq!(session.state(), SessionState::Lobby);
    assert!(session.turn_order().is_empty());
    assert!(!messenger.channel_messages(origin()).contains(&GAME_STARTING.to_string()));
    assert!(messenger.turn_prompts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn only_the_host_starts_and_cancels() {
    let games = SyncRwLock::<SessionRegistry>::default();
    let (host, joiner) = (user(1), user(2));
    let messenger = Arc::new(ScriptedMessenger::new());

    let id = lobby::host(&games, host, origin(), config(5, 1, 3)).unwrap();
    lobby::join(&games, &*messenger, id, joiner).await.unwrap();

    let err = lobby::start(&games, messenger.clone(), id, joiner).await.unwrap_err();
    assert_eq!(story_error(err), StoryError::Unauthorized);
    let err = lobby::cancel(&games, &*messenger, id, joiner).await.unwrap_err();
    assert_eq!(story_error(err), StoryError::Unauthorized);
    let err = lobby::cancel_hosted(&games, &*messenger, joiner).await.unwrap_err();
    assert_eq!(story_error(err), StoryError::NotHosting);

    assert!(messenger.dm_checks().is_empty());
    assert_eq!(games.read().unwrap().get(id).unwrap().state(), SessionState::Lobby);
}

#[tokio::test(start_paused = true)]
async fn lobby_buttons_are_idempotent() {
    let games = SyncRwLock::<SessionRegistry>::default();
    let (host, joiner) = (user(1), user(2));
    let messenger = Arc::new(ScriptedMessenger::new());

    let id = lobby::host(&games, host, origin(), config(5, 1, 2)).unwrap();
    lobby::join(&games, &*messenger, id, joiner).await.unwrap();

    let err = lobby::join(&games, &*messenger, id, joiner).await.unwrap_err();
    assert_eq!(story_error(err), StoryError::AlreadyJoined);
    let err = lobby::join(&games, &*messenger, id, user(3)).await.unwrap_err();
    assert_eq!(story_error(err), StoryError::SessionFull);
    let err = lobby::leave(&games, &*messenger, id, host).await.unwrap_err();
    assert_eq!(story_error(err), StoryError::HostCannotLeave);

    lobby::leave(&games, &*messenger, id, joiner).await.unwrap();
    let err = lobby::leave(&games, &*messenger, id, joiner).await.unwrap_err();
    assert_eq!(story_error(err), StoryError::NotJoined);

    assert_eq!(games.read().unwrap().get(id).unwrap().players(), &[host]);
    assert_eq!(
        messenger.channel_messages(origin()),
        vec!["<@2> has joined the game!".to_string(), "<@2> has left the game.".to_string()],
    );
}

#[tokio::test(start_paused = true)]
async fn second_session_for_a_host_is_refused() {
    let games = SyncRwLock::<SessionRegistry>::default();
    let messenger = Arc::new(ScriptedMessenger::new());

    let id = lobby::host(&games, user(1), origin(), config(30, 1, 1)).unwrap();
    let handle = lobby::start(&games, messenger.clone(), id, user(1)).await.unwrap();

    let err = lobby::host(&games, user(1), ChannelId::new(501), config(5, 4, 4)).unwrap_err();
    assert_eq!(story_error(err), StoryError::AlreadyHosting);

    {
        let reg = games.read().unwrap();
        assert_eq!(reg.len(), 1);
        let session = reg.get(id).unwrap();
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.config().num_rounds, 1);
    }

    handle.await.unwrap();
    assert!(lobby::host(&games, user(1), origin(), config(5, 1, 1)).is_ok());
}

#[tokio::test(start_paused = true)]
async fn cancelling_a_running_game_stops_the_rounds() {
    let games = SyncRwLock::<SessionRegistry>::default();
    let (host, joiner) = (user(1), user(2));
    let messenger = Arc::new(
        ScriptedMessenger::new()
            .script(host, Reply::Silent)
            .script(joiner, Reply::Silent),
    );

    let id = lobby::host(&games, host, origin(), config(60, 3, 2)).unwrap();
    lobby::join(&games, &*messenger, id, joiner).await.unwrap();
    let handle = lobby::start(&games, messenger.clone(), id, host).await.unwrap();

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(messenger.turn_prompts().len(), 1);

    lobby::cancel_hosted(&games, &*messenger, host).await.unwrap();
    handle.await.unwrap();
    tokio::time::sleep(Duration::from_secs(600)).await;

    assert_eq!(messenger.turn_prompts().len(), 1);
    assert!(games.read().unwrap().is_empty());

    let msgs = messenger.channel_messages(origin());
    assert_eq!(msgs.last().map(String::as_str), Some(GAME_CANCELLED));
    assert!(!msgs.contains(&STORY_COMPLETE.to_string()));
}

#[tokio::test(start_paused = true)]
async fn cancelling_a_lobby_frees_the_host() {
    let games = SyncRwLock::<SessionRegistry>::default();
    let messenger = Arc::new(ScriptedMessenger::new());

    let id = lobby::host(&games, user(1), origin(), config(5, 1, 3)).unwrap();
    lobby::cancel(&games, &*messenger, id, user(1)).await.unwrap();

    assert!(games.read().unwrap().get(id).is_none());
    let err = lobby::join(&games, &*messenger, id, user(2)).await.unwrap_err();
    assert_eq!(story_error(err), StoryError::NoSuchSession(id));
    assert_eq!(messenger.channel_messages(origin()), vec![GAME_CANCELLED.to_string()]);

    let again = lobby::host(&games, user(1), origin(), config(5, 1, 3)).unwrap();
    assert_ne!(again, id);
}

#[tokio::test(start_paused = true)]
async fn concurrent_sessions_stay_separate() {
    let games = SyncRwLock::<SessionRegistry>::default();
    let (chan_a, chan_b) = (ChannelId::new(601), ChannelId::new(602));
    let messenger = Arc::new(
        ScriptedMessenger::new()
            .says_after(user(1), 3, "alpha one")
            .says_after(user(2), 1, "alpha two")
            .says_after(user(3), 2, "beta one")
            .says_after(user(4), 2, "beta two"),
    );

    let a = lobby::host(&games, user(1), chan_a, config(10, 1, 2)).unwrap();
    let b = lobby::host(&games, user(3), chan_b, config(10, 1, 2)).unwrap();
    lobby::join(&games, &*messenger, a, user(2)).await.unwrap();
    lobby::join(&games, &*messenger, b, user(4)).await.unwrap();

    let ha = lobby::start(&games, messenger.clone(), a, user(1)).await.unwrap();
    let hb = lobby::start(&games, messenger.clone(), b, user(3)).await.unwrap();
    ha.await.unwrap();
    hb.await.unwrap();

    let story_a = posted_story(&messenger, chan_a).join("");
    let story_b = posted_story(&messenger, chan_b).join("");
    assert!(story_a.contains("alpha one") && story_a.contains("alpha two"));
    assert!(!story_a.contains("beta"));
    assert!(story_b.contains("beta one") && story_b.contains("beta two"));
    assert!(!story_b.contains("alpha"));
    assert!(games.read().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn players_joining_mid_check_are_checked_before_start() {
    let games = SyncRwLock::<SessionRegistry>::default();
    let messenger = Arc::new(ScriptedMessenger::new().with_closed_dms(user(3)));

    let id = lobby::host(&games, user(1), origin(), config(5, 1, 3)).unwrap();
    lobby::join(&games, &*messenger, id, user(2)).await.unwrap();

    let start = {
        let games = games.clone();
        let messenger = messenger.clone();
        tokio::spawn(async move { lobby::start(&games, messenger, id, user(1)).await })
    };
    // Land in the middle of the first DM check.
    tokio::time::sleep(DM_CHECK_DELAY / 2).await;
    lobby::join(&games, &*messenger, id, user(3)).await.unwrap();

    let err = start.await.unwrap().unwrap_err();
    assert_eq!(story_error(err), StoryError::DmUnreachable(vec![user(3)]));
    assert_eq!(messenger.dm_checks(), vec![user(1), user(2), user(3)]);
    assert_eq!(games.read().unwrap().get(id).unwrap().state(), SessionState::Lobby);
}

#[tokio::test(start_paused = true)]
async fn dm_lookup_fault_keeps_the_lobby_open() {
    let games = SyncRwLock::<SessionRegistry>::default();
    let (host, joiner) = (user(1), user(2));
    let messenger = Arc::new(ScriptedMessenger::new().with_broken_dm_lookup(joiner));

    let id = lobby::host(&games, host, origin(), config(5, 1, 3)).unwrap();
    lobby::join(&games, &*messenger, id, joiner).await.unwrap();

    let err = lobby::start(&games, messenger.clone(), id, host).await.unwrap_err();
    assert!(matches!(err, BotError::Other(_)));
    assert!(!err.is_user_facing());

    let reg = games.read().unwrap();
    let session = reg.get(id).unwrap();
    assert_eq!(session.state(), SessionState::Lobby);
    assert!(session.turn_order().is_empty());
    assert!(!messenger.channel_messages(origin()).contains(&GAME_STARTING.to_string()));
}

#[tokio::test(start_paused = true)]
async fn aborted_game_tells_the_channel_how_to_end_it() {
    let games = SyncRwLock::<SessionRegistry>::default();
    let host = user(1);
    let messenger = Arc::new(ScriptedMessenger::new().with_failing_dms(host));

    let id = lobby::host(&games, host, origin(), config(5, 1, 1)).unwrap();
    let handle = lobby::start(&games, messenger.clone(), id, host).await.unwrap();
    handle.await.unwrap();

    let msgs = messenger.channel_messages(origin());
    assert_eq!(msgs.last(), Some(&GAME_FAILED.to_string()));
    assert!(!msgs.contains(&STORY_COMPLETE.to_string()));
    assert_eq!(games.read().unwrap().get(id).unwrap().state(), SessionState::Running);

    lobby::cancel_hosted(&games, &*messenger, host).await.unwrap();
    assert!(games.read().unwrap().is_empty());
}
