//! Settings for the SQLite connection pools.

use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Where the auction data lives and how the pools connect to it.
///
/// ```
/// use auction_sqlite::config::SqliteConfig;
/// use std::path::PathBuf;
///
/// let in_memory = SqliteConfig::default();
/// assert!(in_memory.database_path.is_none());
///
/// let on_disk = SqliteConfig {
///     database_path: Some(PathBuf::from("auction.db")),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SqliteConfig {
    /// Database file path. If None, uses in-memory database
    pub database_path: Option<PathBuf>,

    /// Whether to create the database if it doesn't exist
    pub create_if_missing: bool,

    /// Upper bound on concurrent read connections
    pub max_readers: u32,

    /// How long a connection waits on a locked database before failing
    #[serde(with = "humantime_serde")]
    pub busy_timeout: Duration,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            create_if_missing: true,
            max_readers: 8,
            busy_timeout: Duration::from_secs(5),
        }
    }
}
