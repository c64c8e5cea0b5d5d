use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use contacts_api::config::{AppConfig, Environment};
use contacts_api::database::{MemoryStore, PgStore, Store};
use contacts_api::state::AppState;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "contacts-api")]
#[command(about = "Contact management API server")]
#[command(version)]
struct Args {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Keep all data in process memory instead of PostgreSQL")]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up JWT_SECRET, DATABASE_URL, etc.
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting contacts API in {:?} mode", config.environment);
    if config.environment != Environment::Development && args.in_memory {
        tracing::warn!("Running with the in-memory store; data is lost on restart");
    }

    let store: Arc<dyn Store> = if args.in_memory {
        Arc::new(MemoryStore::new())
    } else {
        config.require_database_url()?;
        Arc::new(PgStore::connect(&config.database).await.context("database connection failed")?)
    };

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let app = contacts_api::app(AppState::new(config, store));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
