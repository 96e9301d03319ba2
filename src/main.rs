//! litepolis-router server binary

use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use litepolis_router::api::{create_router, normalize_prefix, AppState};
use litepolis_router::config::{AppConfig, LogFormat};
use litepolis_router::database::{create_database, DatabaseActor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config)?;

    let database_config = config
        .database_runtime()
        .context("invalid database configuration")?;
    tracing::info!(backend = ?database_config, "Opening database");

    let database = create_database(database_config)
        .await
        .context("failed to open database")?;
    let database: Arc<dyn DatabaseActor> = Arc::from(database);

    let prefix = normalize_prefix(&config.router.prefix);
    tracing::info!(%prefix, "Mounting router");

    let mut router = create_router(AppState::new(database), &prefix);
    if config.server.cors {
        tracing::info!("Permissive CORS enabled");
        router = router.layer(CorsLayer::permissive());
    }

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, "Listening for HTTP traffic");

    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.logging.level.clone()))
        .unwrap_or_else(|_| EnvFilter::new("litepolis_router=info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format {
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
        LogFormat::Text => {
            registry.with(tracing_subscriber::fmt::layer()).try_init()?;
        }
    }

    Ok(())
}
