use std::time::Duration;

use poise::CreateReply;
use serenity::all::{
    ButtonStyle, Colour, ComponentInteractionCollector, CreateActionRow, CreateButton, CreateEmbed,
    CreateEmbedFooter, CreateInteractionResponse, CreateInteractionResponseMessage, Mentionable,
    Timestamp, UserId,
};

use crate::db::db_conn;
use crate::error::Result;
use crate::models::DeletedMessage;

use super::Context;

const DEFAULT_COUNT: u8 = 10;

/// How long the Previous / Next buttons keep working.
const PAGE_TIMEOUT: Duration = Duration::from_secs(60);

/// Position within a fixed number of pages. Stops at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pager {
    index: usize,
    len: usize,
}

impl Pager {
    fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Moves back one page. False if already on the first.
    fn previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Moves forward one page. False if already on the last.
    fn next(&mut self) -> bool {
        if self.index + 1 >= self.len {
            return false;
        }
        self.index += 1;
        true
    }
}

fn snipe_embed(message: &DeletedMessage, page: usize, pages: usize) -> CreateEmbed {
    let author = UserId::new(message.user_id as u64);
    let mut embed = CreateEmbed::new()
        .title("Sniped Message")
        .description(&message.content)
        .colour(Colour::RED)
        .field("Author", author.mention().to_string(), true)
        .footer(CreateEmbedFooter::new(format!("Message {} of {}", page + 1, pages)));

    if let Ok(deleted_at) = Timestamp::parse(&message.deleted_at) {
        embed = embed.timestamp(deleted_at);
    }
    embed
}

/// Shows recently deleted messages in this channel
#[poise::command(slash_command, guild_only)]
pub async fn snipe(
    ctx: Context<'_>,
    #[description = "How many deleted messages to look back on (default 10)"]
    #[min = 1]
    #[max = 25]
    count: Option<u8>,
) -> Result<()> {
    let count = count.unwrap_or(DEFAULT_COUNT);
    let messages = {
        let conn = &mut db_conn()?;
        DeletedMessage::recent_in_channel(conn, ctx.channel_id().get(), count as i64)?
    };

    if messages.is_empty() {
        let reply = CreateReply::default()
            .content("There are no deleted messages to snipe in this channel.")
            .ephemeral(true);
        ctx.send(reply).await?;
        return Ok(());
    }

    let ctx_id = ctx.id();
    let prev_button_id = format!("{}prev", ctx_id);
    let next_button_id = format!("{}next", ctx_id);

    let buttons = vec![CreateActionRow::Buttons(vec![
        CreateButton::new(&prev_button_id)
            .label("Previous")
            .emoji('⬅')
            .style(ButtonStyle::Secondary),
        CreateButton::new(&next_button_id)
            .label("Next")
            .emoji('➡')
            .style(ButtonStyle::Secondary),
    ])];

    let mut pager = Pager::new(messages.len());
    let reply = CreateReply::default()
        .embed(snipe_embed(&messages[0], 0, messages.len()))
        .components(buttons);
    ctx.send(reply).await?;

    while let Some(press) = ComponentInteractionCollector::new(ctx)
        .filter(move |press| press.data.custom_id.starts_with(&ctx_id.to_string()))
        .timeout(PAGE_TIMEOUT)
        .await
    {
        let moved = if press.data.custom_id == next_button_id {
            pager.next()
        } else if press.data.custom_id == prev_button_id {
            pager.previous()
        } else {
            continue;
        };

        let response = if moved {
            let page = snipe_embed(&messages[pager.index], pager.index, messages.len());
            CreateInteractionResponse::UpdateMessage(CreateInteractionResponseMessage::new().embed(page))
        } else {
            CreateInteractionResponse::Acknowledge
        };
        press.create_response(ctx.serenity_context(), response).await?;
    }

    Ok(())
}
