//! Phrase-triggered canned replies.

use serenity::all::Message;
use serenity::prelude::*;
use tracing::debug;

use crate::error::Result;

/// Checked in order; the first phrase found in a message wins.
/// Phrases are lowercase.
const REPLIES: &[(&str, &str)] = &[
    ("good morning", "Good morning! ☀️ Don't forget to drink some water."),
    ("good night", "Good night, sleep well! 🌙"),
    ("thank you maya", "You're welcome! 💜"),
    ("thanks maya", "You're welcome! 💜"),
    ("hi maya", "Hi there! 💜"),
    ("hello maya", "Hi there! 💜"),
    ("i'm tired", "Make sure you get some rest! /sleep-track can help you keep an eye on your sleep."),
    ("i need to study", "You've got this! Try /study-help for some tips."),
];

/// The canned reply for `content`, if any phrase matches.
pub fn canned_reply(content: &str) -> Option<&'static str> {
    let content = content.to_lowercase();
    REPLIES.iter()
        .find(|(phrase, _)| content.contains(phrase))
        .map(|(_, reply)| *reply)
}

/// Replies are only made to people, and only inside a server.
fn reply_for(from_bot: bool, in_guild: bool, content: &str) -> Option<&'static str> {
    if from_bot || !in_guild {
        return None;
    }
    canned_reply(content)
}

pub async fn message_handler(ctx: &Context, msg: &Message) -> Result<()> {
    let Some(reply) = reply_for(msg.author.bot, msg.guild_id.is_some(), &msg.content) else {
        return Ok(());
    };

    debug!("Canned reply to message {}", msg.id);
    msg.channel_id.say(&ctx.http, reply).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_case() {
        assert_eq!(canned_reply("GOOD MORNING everyone"), Some(REPLIES[0].1));
        assert_eq!(canned_reply("ok Thank You Maya!"), Some("You're welcome! 💜"));
    }

    #[test]
    fn first_listed_phrase_wins() {
        assert_eq!(canned_reply("good night and good morning"), Some(REPLIES[0].1));
    }

    #[test]
    fn unrelated_messages_get_nothing() {
        assert_eq!(canned_reply("what is the homework for tomorrow"), None);
        assert_eq!(canned_reply(""), None);
    }

    #[test]
    fn direct_messages_and_bots_get_nothing() {
        assert_eq!(reply_for(false, true, "good night"), Some("Good night, sleep well! 🌙"));
        assert_eq!(reply_for(false, false, "good night"), None);
        assert_eq!(reply_for(true, true, "good night"), None);
    }
}
