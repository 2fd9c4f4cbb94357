use std::fs::File;

use auction_axum::{openapi_schema, start_server};
use auction_sqlite::Db;
use auctiondemo::{AppConfig, Cli, impls::DemoApp};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Everything in the workspace reports through `tracing`; RUST_LOG picks
    // what reaches stdout.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;

    // If requested, dump the schema and exit.
    if let Some(path) = &cli.schema {
        let schema = openapi_schema::<DemoApp>();
        serde_json::to_writer_pretty(File::create(path)?, &schema)?;
        return Ok(());
    }

    let key = cli
        .secret_key()
        .ok_or_else(|| anyhow::anyhow!("--secret (or APP_SECRET) is required to serve"))?;

    let AppConfig {
        server,
        database,
        auction,
    } = AppConfig::load(&cli)?;

    let db = Db::open(&database).await?;
    let app = DemoApp {
        db,
        key,
        config: auction,
    };

    tracing::info!(
        default_duration = ?app.config.default_duration,
        "auction house ready"
    );

    start_server(server, app).await?;
    Ok(())
}
