pub mod models;
pub mod schema;

mod health;
mod migrations;
mod snipe;

pub use migrations::run_migrations;

use dotenvy::dotenv;

use diesel::sqlite::SqliteConnection;
use diesel::prelude::*;

use crate::env_str;
use crate::error::{BotError, Result};

/// Creates a connection to the bot's database.
pub fn db_conn() -> Result<SqliteConnection> {
    dotenv().ok();

    let database_url = env_str("DATABASE_URL")?;
    SqliteConnection::establish(&database_url)
        .map_err(BotError::from)
}

/// Fresh in-memory database with every migration applied.
#[cfg(test)]
pub(crate) fn test_conn() -> SqliteConnection {
    let mut conn = SqliteConnection::establish(":memory:")
        .expect("in-memory sqlite");
    run_migrations(&mut conn).expect("migrations");
    conn
}
