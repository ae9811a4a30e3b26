//! Context relay server entry point.
//!
//! Loads configuration, installs logging, opens the Redis connection and
//! serves the context API until Ctrl+C.

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use context_relay::adapters::ai::{OpenAIConfig, OpenAIProvider};
use context_relay::adapters::http::{router, BearerAllowList, ContextAppState, HttpSettings};
use context_relay::adapters::redis::RedisKeyValueStore;
use context_relay::config::{AppConfig, ConfigError};
use context_relay::ports::{AIError, StoreError};
use secrecy::ExposeSecret;

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Redis connection failed: {0}")]
    Store(#[from] StoreError),

    #[error("AI provider setup failed: {0}")]
    Provider(#[from] AIError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate().map_err(ConfigError::from)?;

    tracing::info!(
        environment = ?config.server.environment,
        model = %config.ai.model,
        "Starting context relay"
    );

    let store = RedisKeyValueStore::connect(&config.redis.url, config.redis.timeout()).await?;
    tracing::info!("Redis connection established");

    let api_key = config
        .ai
        .openai_api_key
        .as_ref()
        .map(|key| key.expose_secret().clone())
        .unwrap_or_default();
    let provider = OpenAIProvider::new(
        OpenAIConfig::new(api_key)
            .with_model(&config.ai.model)
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.timeout()),
    )?;

    let state = ContextAppState::new(Arc::new(store), Arc::new(provider));
    let allow_list = BearerAllowList::new(config.auth.tokens());
    let settings = HttpSettings {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins_list(),
    };
    let app = router(state, allow_list, &settings);

    let addr = config
        .server
        .socket_addr()
        .map_err(ConfigError::from)?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Context relay stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured directive; JSON lines in production.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Ctrl+C received, shutting down");
}
