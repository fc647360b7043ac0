//! Slash commands and the poise framework that dispatches them.

use poise::CreateReply;
use tracing::{error, info};

use crate::config::BotConfig;
use crate::error::BotError;
use crate::openai::OpenAiClient;

pub mod chat;
pub mod health;
pub mod snipe;
pub mod story;
pub mod study;

/// Shared by every command invocation.
pub struct Data {
    pub openai: OpenAiClient,
}

pub type Context<'a> = poise::Context<'a, Data, BotError>;
pub type ApplicationContext<'a> = poise::ApplicationContext<'a, Data, BotError>;

/// Reply for faults the acting user can do nothing about.
pub const GENERIC_FAILURE: &str = "Oh noes, something went wrong on my end. Please try again later.";

/// What the acting user is told about `err`.
/// Faults are logged here, rejections are not.
pub fn failure_text(err: &BotError) -> String {
    if err.is_user_facing() {
        err.to_string()
    } else {
        error!("{:?}", err);
        GENERIC_FAILURE.to_string()
    }
}

async fn on_error(error: poise::FrameworkError<'_, Data, BotError>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            if !error.is_user_facing() {
                error!("Command `{}` failed", ctx.command().qualified_name);
            }
            let reply = CreateReply::default()
                .content(failure_text(&error))
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Unable to send error reply: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Wrapper for the framework building
pub fn mayabot_framework(config: &BotConfig) -> poise::Framework<Data, BotError> {
    let options = poise::FrameworkOptions {
        commands: vec![
            chat::chat(),
            health::health_profile(),
            health::sleep_track(),
            health::diet_track(),
            health::exercise_track(),
            health::body_track(),
            health::todo(),
            health::journal(),
            health::calculate_tdee(),
            health::health_help(),
            snipe::snipe(),
            story::host_story(),
            story::cancel_story(),
            study::study_help(),
        ],
        on_error: |error| Box::pin(on_error(error)),
        ..Default::default()
    };

    let guild_id = config.guild_id;
    let openai = OpenAiClient::new(config.openai_key.clone(), config.openai_model.clone());

    poise::Framework::builder()
        .options(options)
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                let commands = &framework.options().commands;
                match guild_id {
                    Some(guild_id) => {
                        poise::builtins::register_in_guild(ctx, commands, guild_id).await?;
                        info!("Registered {} commands in guild {}", commands.len(), guild_id);
                    }
                    None => {
                        poise::builtins::register_globally(ctx, commands).await?;
                        info!("Registered {} commands globally", commands.len());
                    }
                }
                Ok(Data { openai })
            })
        })
        .build()
}
