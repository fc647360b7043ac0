use tracing::info;
use tracing_subscriber::EnvFilter;

use dotenvy::dotenv;

use mayabot::commands::mayabot_framework;
use mayabot::config::BotConfig;
use mayabot::db::{db_conn, run_migrations};
use mayabot::error::{BotError, Result};
use mayabot::handler::Handler;
use mayabot::story::StoryGames;
use mayabot::subsystems::Subsystem;
use serenity::cache::Settings as CacheSettings;
use serenity::prelude::*;

/// Deleted messages can only be sniped while they are still cached.
const CACHED_MESSAGES_PER_CHANNEL: usize = 500;

#[tokio::main]
async fn main() -> Result<()> {

    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Running pending migrations");
    {
        let conn = &mut db_conn()?;
        run_migrations(conn)?;
    }
    info!("Done");

    let config = BotConfig::from_env()?;
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    info!("Building poise framework");
    let framework = mayabot_framework(&config);
    info!("Done");

    let mut cache_settings = CacheSettings::default();
    cache_settings.max_messages = CACHED_MESSAGES_PER_CHANNEL;

    info!("Building serenity client");
    let builder = Client::builder(&config.bot_token, intents)
        .framework(framework)
        .cache_settings(cache_settings)
        .event_handler(Handler);
    let mut client = StoryGames::install(builder).await?;
    info!("Done");

    info!("Now starting Maya!");
    client.start()
        .await
        .map_err(BotError::from)
}
