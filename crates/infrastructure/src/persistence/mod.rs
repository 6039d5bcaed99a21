//! SQLite persistence layer

pub mod connection;
pub mod error;
pub mod usage_log;

pub use connection::{Database, DatabaseError, DatabasePoolConfig};
pub use usage_log::SqliteUsageLog;
