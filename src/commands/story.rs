use std::time::Duration;

use poise::CreateReply;

use crate::error::Result;
use crate::story::discord::{lobby_buttons, lobby_embed, DiscordMessenger};
use crate::story::lobby::{self, GAME_CANCELLED};
use crate::story::{StoryConfig, StoryGames};
use crate::subsystems::Subsystem;

use super::Context;

/// Host a game of story writers
#[poise::command(slash_command, guild_only, rename = "host-story")]
pub async fn host_story(
    ctx: Context<'_>,
    #[description = "Seconds each player gets per turn (default 120)"]
    #[min = 1]
    #[max = 3600]
    wait_time: Option<u64>,
    #[description = "Number of rounds (default 1)"]
    #[min = 1]
    #[max = 20]
    num_rounds: Option<u32>,
    #[description = "Maximum number of players (default 5)"]
    #[min = 1]
    #[max = 25]
    max_players: Option<u32>,
) -> Result<()> {
    let defaults = StoryConfig::default();
    let config = StoryConfig {
        wait_time: wait_time.map(Duration::from_secs).unwrap_or(defaults.wait_time),
        num_rounds: num_rounds.unwrap_or(defaults.num_rounds),
        max_players: max_players.map(|n| n as usize).unwrap_or(defaults.max_players),
    };

    let games = StoryGames::lock(ctx.serenity_context()).await?;
    let embed = lobby_embed(&ctx.author().name, &config);
    let id = lobby::host(&games, ctx.author().id, ctx.channel_id(), config)?;

    let reply = CreateReply::default()
        .embed(embed)
        .components(lobby_buttons(id, false));
    ctx.send(reply).await?;

    Ok(())
}

/// Cancel the story game you are hosting
#[poise::command(slash_command, guild_only, rename = "cancel-story")]
pub async fn cancel_story(ctx: Context<'_>) -> Result<()> {
    let games = StoryGames::lock(ctx.serenity_context()).await?;
    let messenger = DiscordMessenger::new(ctx.serenity_context().clone());

    lobby::cancel_hosted(&games, &messenger, ctx.author().id).await?;

    let reply = CreateReply::default()
        .content(GAME_CANCELLED)
        .ephemeral(true);
    ctx.send(reply).await?;
    Ok(())
}
