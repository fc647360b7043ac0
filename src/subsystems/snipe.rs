//! Captures deleted guild messages for `/snipe`.

use chrono::{SecondsFormat, Utc};
use serenity::all::{ChannelId, GuildId, MessageId, UserId};
use serenity::prelude::*;
use tracing::debug;

use crate::db::db_conn;
use crate::error::Result;
use crate::models::{DeletedMessage, NewDeletedMessage};

/// The row to store for a deletion, or `None` if it is not worth sniping.
fn deleted_row(
    author: UserId,
    author_is_bot: bool,
    guild_id: GuildId,
    channel_id: ChannelId,
    content: &str,
    deleted_at: &str,
) -> Option<NewDeletedMessage> {
    if author_is_bot || content.trim().is_empty() {
        return None;
    }
    Some(NewDeletedMessage {
        user_id: author.get() as i64,
        guild_id: guild_id.get() as i64,
        channel_id: channel_id.get() as i64,
        content: content.to_string(),
        deleted_at: deleted_at.to_string(),
    })
}

/// Stores a deleted message, provided the cache still remembers it.
pub async fn record_deleted(
    ctx: &Context,
    channel_id: ChannelId,
    message_id: MessageId,
    guild_id: Option<GuildId>,
) -> Result<()> {
    let Some(guild_id) = guild_id else { return Ok(()) };

    let row = {
        let Some(msg) = ctx.cache.message(channel_id, message_id) else {
            debug!("Deleted message {} was not cached", message_id);
            return Ok(());
        };
        let deleted_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false);
        deleted_row(msg.author.id, msg.author.bot, guild_id, channel_id, &msg.content, &deleted_at)
    };

    if let Some(row) = row {
        let conn = &mut db_conn()?;
        DeletedMessage::insert(conn, &row)?;
        debug!("Recorded deleted message {} in {}", message_id, channel_id);
    }
    Ok(())
}
