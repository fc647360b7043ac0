//! Runtime configuration pulled from the environment.

use dotenvy::dotenv;
use serenity::all::GuildId;

use crate::error::Result;
use crate::{env_snowflake_opt, env_str};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: String,
    pub openai_key: String,
    pub openai_model: String,
    /// Register commands in this guild only. Global registration otherwise.
    pub guild_id: Option<GuildId>,
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            bot_token: env_str("BOT_TOKEN")?,
            openai_key: env_str("GPT_TOKEN")?,
            openai_model: env_str("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            guild_id: env_snowflake_opt("GUILD_ID")?,
        })
    }
}
