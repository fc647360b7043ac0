//! A subsystem of the bot: state shared between command invocations and
//! gateway events, installed into serenity's global TypeMap.
//!

use std::sync::Arc;

use serenity::{all::ClientBuilder, prelude::*};

use crate::error::{BotError, Result};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubsystemError {
    #[error("Error acquiring subsystem lock (read): {0}")]
    LockReadError(String),
    #[error("Error acquiring subsystem lock (write): {0}")]
    LockWriteError(String),
}

pub trait LockData: Send + Sync + Sized + Default {}
impl<T: Send + Sync + Sized + Default> LockData for T {}

/// Shared, synchronously locked subsystem state.
///
/// Guards must never be held across an `.await`: every read-decide-write
/// happens inside one guard scope, which is what makes check-and-insert
/// operations atomic across tasks.
#[derive(Debug, Default)]
pub struct SyncRwLock<T: LockData>(Arc<std::sync::RwLock<T>>);

impl<T: LockData> Clone for SyncRwLock<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> SyncRwLock<T>
where
    T: LockData
{
    pub fn new(data: T) -> Self {
        Self(Arc::new(std::sync::RwLock::new(data)))
    }

    pub fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, T>> {
        self.0.read()
            .map_err(|e| SubsystemError::LockReadError(format!("{}", e)))
            .map_err(BotError::from)
    }

    pub fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, T>> {
        self.0.write()
            .map_err(|e| SubsystemError::LockWriteError(format!("{}", e)))
            .map_err(BotError::from)
    }
}

pub trait Subsystem: TypeMapKey + Sized
where
    <Self as TypeMapKey>::Value: Clone + Default
{
    fn name() -> String;

    #[allow(async_fn_in_trait)]
    async fn lock(ctx: &Context) -> Result<Self::Value> {
        ctx.data.read().await.get::<Self>()
            .ok_or(BotError::TypeMapMissingKeyError(Self::name()))
            .cloned()
    }

    fn install(client: ClientBuilder) -> ClientBuilder {
        client.type_map_insert::<Self>(<Self as TypeMapKey>::Value::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let a: SyncRwLock<Vec<u32>> = SyncRwLock::default();
        let b = a.clone();
        a.write().unwrap().push(7);
        assert_eq!(*b.read().unwrap(), vec![7]);
    }
}
