use chrono::{DateTime, Utc};
use serenity::all::{GetMessages, Mentionable, Message, UserId};
use tracing::warn;

use crate::chunk::split_message;
use crate::error::Result;

use super::Context;

const DEFAULT_HISTORY: u8 = 50;

/// One line of channel history as the model sees it.
fn history_line(author_id: UserId, author_name: &str, sent_at: DateTime<Utc>, content: &str) -> String {
    format!(
        "{} {} {} @ {}: {}",
        author_id,
        author_name,
        author_id.mention(),
        sent_at.format("%Y-%m-%d %H:%M:%S"),
        content,
    )
}

/// Formats `messages` (newest first, as Discord returns them) oldest
/// first, leaving out anything `bot_id` wrote.
fn format_history(messages: &[Message], bot_id: UserId) -> String {
    messages.iter()
        .rev()
        .filter(|m| m.author.id != bot_id)
        .map(|m| history_line(m.author.id, &m.author.name, *m.timestamp, &m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Chat with the AI
#[poise::command(slash_command)]
pub async fn chat(
    ctx: Context<'_>,
    #[description = "Your message to the AI"] message: String,
    #[description = "Number of past messages to consider (default 50)"]
    #[min = 1]
    #[max = 100]
    message_limit: Option<u8>,
) -> Result<()> {
    ctx.defer().await?;

    let limit = message_limit.unwrap_or(DEFAULT_HISTORY);
    let bot_id = ctx.framework().bot_id;
    let past = ctx.channel_id()
        .messages(ctx.http(), GetMessages::new().limit(limit))
        .await?;
    let history = format_history(&past, bot_id);

    match ctx.data().openai.complete(&history, &message).await {
        Ok(reply) => {
            for part in split_message(&reply) {
                ctx.say(part).await?;
            }
        }
        Err(e) => {
            warn!("Chat completion failed: {}", e);
            ctx.say(format!("An error occurred: {}", e)).await?;
        }
    }

    Ok(())
}
