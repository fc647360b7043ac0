pub mod db;
use db::{models, schema};

pub mod chunk;
pub mod commands;
pub mod config;
pub mod error;
pub mod handler;
pub mod health;
pub mod openai;
pub mod story;
pub mod subsystems;

use std::env;
use error::{BotError, Result};

/// Convenience function for getting a type whose underlying
/// id data type is a snowflake (e.g a user id).
pub fn env_snowflake<T: From<u64>> (key: &str) -> Result<T> {
    Ok(T::from(
        env_str(key)?
            .parse::<u64>()
            .map_err(|e|
                     BotError::SnowflakeParseError {
                         snowflake: key.to_string(),
                         source: e
                     })?
    ))
}

pub fn env_str(key: &str) -> Result<String> {
    env::var(key)
        .map_err(|e|
                 BotError::EnvVarError {
                     key: key.to_string(),
                     source: e
                 })
}

/// Like [env_snowflake], but absent variables are `None` instead of an error.
pub fn env_snowflake_opt<T: From<u64>> (key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(_) => env_snowflake(key).map(Some),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(BotError::EnvVarError { key: key.to_string(), source: e }),
    }
}
