mod subsystem;
pub use subsystem::{Subsystem, SubsystemError, SyncRwLock};

pub mod replies;
pub mod snipe;
