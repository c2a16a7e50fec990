//! Marketplace HTTP server

mod config;

use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use config::{AppConfig, LoggingConfig};
use marketplace_service::MarketplaceModule;
use sea_orm::{ConnectOptions, Database};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "marketplace-server", about = "Marketplace REST API server")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address
    #[arg(long)]
    bind: Option<String>,

    /// Do not create the first administrator at startup
    #[arg(long)]
    skip_seed: bool,
}

fn init_tracing(cfg: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.level))
        .context("invalid log filter")?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if cfg.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    init_tracing(&config.logging)?;

    let mut options = ConnectOptions::new(config.database_url.clone());
    options.sqlx_logging(false);
    let db = Arc::new(
        Database::connect(options)
            .await
            .context("connecting to database")?,
    );

    let module = MarketplaceModule::default();
    module.migrate(&db).await?;
    module.init(config.marketplace.clone(), db)?;

    if !cli.skip_seed {
        // A failed seed leaves the server usable for existing accounts
        if let Err(e) = module.seed_admin().await {
            tracing::error!(error = %e, "administrator seed failed");
        }
    }

    let router = module
        .register_rest(Router::new())?
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;
    tracing::info!(bind = %config.bind, "marketplace server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("marketplace server stopped");
    Ok(())
}
