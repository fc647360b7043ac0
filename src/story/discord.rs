//! Serenity side of the story game: DM delivery, the lobby message and
//! its buttons.

use std::fmt;
use std::sync::Arc;

use serenity::all::{
    ButtonStyle, ChannelId, ComponentInteraction, Context, CreateActionRow, CreateButton,
    CreateEmbed, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, EditMessage, HttpError, MessageCollector, UserId,
};
use serenity::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::subsystems::Subsystem;

use super::{lobby, SessionId, StoryConfig, StoryGames, StoryMessenger};

pub const DM_CHECK: &str = "Checking if DMs are open.";

/// Discord JSON error code for "Cannot send messages to this user".
const CANNOT_MESSAGE_USER: isize = 50007;

/// [StoryMessenger] backed by a live gateway connection.
#[derive(Clone)]
pub struct DiscordMessenger {
    ctx: Context,
}

impl DiscordMessenger {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }
}

fn refuses_dm(err: &serenity::Error) -> bool {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(resp)) =>
            resp.error.code == CANNOT_MESSAGE_USER,
        _ => false,
    }
}

#[async_trait]
impl StoryMessenger for DiscordMessenger {
    async fn check_dm(&self, player: UserId) -> Result<Option<ChannelId>> {
        let channel = player.create_dm_channel(&self.ctx).await?;
        match channel.id.say(&self.ctx.http, DM_CHECK).await {
            Ok(_) => Ok(Some(channel.id)),
            Err(e) if refuses_dm(&e) => {
                debug!("{} does not accept DMs", player);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn send_dm(&self, channel: ChannelId, text: &str) -> Result<()> {
        channel.say(&self.ctx.http, text).await?;
        Ok(())
    }

    async fn broadcast(&self, channel: ChannelId, text: &str) -> Result<()> {
        channel.say(&self.ctx.http, text).await?;
        Ok(())
    }

    async fn next_dm(&self, player: UserId, channel: ChannelId) -> Result<Option<String>> {
        let msg = MessageCollector::new(&self.ctx.shard)
            .author_id(player)
            .channel_id(channel)
            .next()
            .await;
        Ok(msg.map(|m| m.content))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyAction {
    Start,
    Join,
    Leave,
}

impl fmt::Display for LobbyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LobbyAction::Start => "start",
            LobbyAction::Join => "join",
            LobbyAction::Leave => "leave",
        };
        write!(f, "{}", s)
    }
}

/// A lobby button press, as encoded in the button's custom id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LobbyButton {
    pub action: LobbyAction,
    pub session: SessionId,
}

impl LobbyButton {
    const PREFIX: &'static str = "story";

    pub fn custom_id(&self) -> String {
        format!("{}:{}:{}", Self::PREFIX, self.action, self.session)
    }

    pub fn parse(custom_id: &str) -> Option<Self> {
        let mut parts = custom_id.split(':');
        if parts.next()? != Self::PREFIX {
            return None;
        }
        let action = match parts.next()? {
            "start" => LobbyAction::Start,
            "join" => LobbyAction::Join,
            "leave" => LobbyAction::Leave,
            _ => return None,
        };
        let session = SessionId(parts.next()?.parse().ok()?);
        if parts.next().is_some() {
            return None;
        }
        Some(Self { action, session })
    }
}

pub fn lobby_embed(host_name: &str, config: &StoryConfig) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("{} is hosting a game of story writers!", host_name))
        .field("Max Players", config.max_players.to_string(), true)
        .field("Rounds", config.num_rounds.to_string(), true)
        .field("Wait Time", format!("{} seconds", config.wait_time.as_secs()), true)
        .field(
            "How to Play",
            "1. Players take turns adding a sentence to the story in secret.\n\
             2. You will receive a DM when it's your turn.\n\
             3. You have a limited time to respond (as set by the host).\n\
             4. If you fail to respond in time, your turn is skipped.\n\
             5. The game lasts for a set number of rounds, and the full story is revealed at the end!",
            false,
        )
}

pub fn lobby_buttons(session: SessionId, disabled: bool) -> Vec<CreateActionRow> {
    let button = |action, label: &str, style| {
        CreateButton::new(LobbyButton { action, session }.custom_id())
            .label(label)
            .style(style)
            .disabled(disabled)
    };

    vec![CreateActionRow::Buttons(vec![
        button(LobbyAction::Start, "Start", ButtonStyle::Success),
        button(LobbyAction::Join, "Join", ButtonStyle::Primary),
        button(LobbyAction::Leave, "Leave", ButtonStyle::Danger),
    ])]
}

async fn reply_ephemeral(ctx: &Context, component: &ComponentInteraction, text: String) -> Result<()> {
    let msg = CreateInteractionResponseMessage::new()
        .content(text)
        .ephemeral(true);
    component.create_response(&ctx.http, CreateInteractionResponse::Message(msg)).await?;
    Ok(())
}

/// Resolves a lobby button press against the registry.
pub async fn handle_button(
    ctx: &Context,
    component: &ComponentInteraction,
    button: LobbyButton,
) -> Result<()> {
    let games = StoryGames::lock(ctx).await?;
    let messenger = Arc::new(DiscordMessenger::new(ctx.clone()));
    let user = component.user.id;
    let id = button.session;

    let res = match button.action {
        LobbyAction::Join => lobby::join(&games, &*messenger, id, user).await
            .map(|_| "You've joined the game!"),
        LobbyAction::Leave => lobby::leave(&games, &*messenger, id, user).await
            .map(|_| "You've left the game."),
        LobbyAction::Start => {
            // Checking every player's DMs can outlast the interaction deadline.
            component.defer_ephemeral(&ctx.http).await?;

            let text = match lobby::start(&games, messenger, id, user).await {
                Ok(_) => {
                    let mut message = (*component.message).clone();
                    message.edit(ctx, EditMessage::new().components(lobby_buttons(id, true))).await?;
                    "The game has started.".to_string()
                }
                Err(e) if e.is_user_facing() => e.to_string(),
                Err(e) => return Err(e),
            };
            let followup = CreateInteractionResponseFollowup::new()
                .content(text)
                .ephemeral(true);
            component.create_followup(&ctx.http, followup).await?;
            return Ok(());
        }
    };

    match res {
        Ok(text) => reply_ephemeral(ctx, component, text.to_string()).await,
        Err(e) if e.is_user_facing() => reply_ephemeral(ctx, component, e.to_string()).await,
        Err(e) => Err(e),
    }
}
