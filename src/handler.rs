use serenity::all::{ChannelId, GuildId, Interaction, Message, MessageId, Ready};
use serenity::async_trait;
use serenity::prelude::*;
use tracing::{debug, error, info};

use crate::error::BotError;
use crate::story::discord::{handle_button, LobbyButton};
use crate::subsystems::{replies, snipe};

/// This unit struct denominates all gateway event handlers
/// via Serenity's EventHandler trait
pub struct Handler;

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Logged in as {}", ready.user.name);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // No bots!
        if msg.author.bot { return }

        if let Err(e) = replies::message_handler(&ctx, &msg).await {
            error_handler("Canned replies", e);
        }
    }

    async fn message_delete(
        &self,
        ctx: Context,
        channel_id: ChannelId,
        deleted_message_id: MessageId,
        guild_id: Option<GuildId>,
    ) {
        if let Err(e) = snipe::record_deleted(&ctx, channel_id, deleted_message_id, guild_id).await {
            error_handler("Snipe", e);
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        // Slash commands and modals are poise's business.
        let Interaction::Component(component) = interaction else { return };
        let Some(button) = LobbyButton::parse(&component.data.custom_id) else { return };

        debug!("{} pressed {}", component.user.id, button.custom_id());
        if let Err(e) = handle_button(&ctx, &component, button).await {
            error_handler("Story lobby", e);
        }
    }
}

fn error_handler(subsystem: &str, err: BotError) {
    error!("[{} Error] {}: {:?}", subsystem, err, err);
}
