use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::db::models::{DeletedMessage, NewDeletedMessage};
use crate::error::{BotError, Result};
use crate::schema::deleted_messages;

impl DeletedMessage {
    pub fn insert(conn: &mut SqliteConnection, message: &NewDeletedMessage) -> Result<usize> {
        diesel::insert_into(deleted_messages::table)
            .values(message)
            .execute(conn)
            .map_err(BotError::from)
    }

    /// The `limit` most recently deleted messages of a channel, newest first.
    pub fn recent_in_channel(conn: &mut SqliteConnection, channel_id: u64, limit: i64) -> Result<Vec<Self>> {
        deleted_messages::table
            .filter(deleted_messages::channel_id.eq(channel_id as i64))
            .order_by(deleted_messages::id.desc())
            .limit(limit)
            .select(Self::as_select())
            .load(conn)
            .map_err(BotError::from)
    }
}
