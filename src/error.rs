use std::{env::VarError, error::Error, num::ParseIntError};

use thiserror::Error;

use crate::health::HealthError;
use crate::story::StoryError;
use crate::subsystems::SubsystemError;

/// Big error class
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Database (diesel) error")]
    DbError (#[from] diesel::result::Error),

    #[error("Error connecting to database")]
    DbConnError (#[from] diesel::ConnectionError),

    #[error("Discord (serenity) error")]
    DiscordError (#[from] serenity::Error),

    #[error("OpenAI request failed: {0}")]
    HttpError (#[from] reqwest::Error),

    #[error("OpenAI returned {status}: {body}")]
    OpenAiError {
        status: u16,
        body: String,
    },

    #[error("Error retrieving environment variable `{key}`")]
    EnvVarError {
        key: String,
        #[source]
        source: VarError
    },

    #[error("Unable to convert `{snowflake}` into snowflake")]
    SnowflakeParseError {
        snowflake: String,
        source: ParseIntError,
    },

    #[error("{0}")]
    Story(#[from] StoryError),

    #[error("{0}")]
    Health(#[from] HealthError),

    #[error("{0}")]
    SubsystemError(#[from] SubsystemError),

    #[error("Global data does not have key {0}")]
    TypeMapMissingKeyError(String),

    #[error("Migration error")]
    MigrationError(Box<dyn Error + Send + Sync + 'static>),

    #[error("Other: {0}")]
    Other(String),
}

impl BotError {
    /// Rejections caused by the acting user rather than by a fault.
    /// These are answered privately with their message and never logged
    /// as errors.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, BotError::Story(_) | BotError::Health(_))
    }
}

pub type Result<T> = core::result::Result<T, BotError>;
