//! Application configuration management.
//!
//! Settings are layered, lowest precedence first: built-in defaults, the file
//! named on the command line, then `APP_`-prefixed environment variables.

use crate::Cli;
use serde::{Deserialize, Serialize};

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Web server configuration (bind address, page limit, CORS)
    #[serde(default)]
    pub server: auction_axum::config::AxumConfig,

    /// Database configuration (file path, pool settings)
    #[serde(default)]
    pub database: auction_sqlite::config::SqliteConfig,

    /// Auction rules (default listing duration)
    #[serde(default)]
    pub auction: auction_core::models::AuctionConfig,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern
    /// `APP_<SECTION>__<KEY>` to `<section>.<key>`, for example:
    ///
    /// ```bash
    /// export APP_SERVER__BIND_ADDRESS="0.0.0.0:3000"
    /// export APP_DATABASE__DATABASE_PATH="/data/auction.db"
    /// export APP_AUCTION__DEFAULT_DURATION="3days"
    /// ```
    ///
    /// List settings such as `APP_SERVER__ALLOWED_ORIGINS` take a
    /// comma-separated value.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        Self::layered(cli, None)
    }

    /// Build the configuration, reading variables from `env` instead of the
    /// process environment when given.
    fn layered(cli: &Cli, env: Option<config::Map<String, String>>) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = &cli.config {
            if path.exists() {
                config = config.add_source(config::File::from(path.as_path()))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // APP_SERVER__BIND_ADDRESS becomes server.bind_address
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.allowed_origins")
                .try_parsing(true)
                .source(env),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}
