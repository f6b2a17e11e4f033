pub mod api;
pub mod config;
pub mod inference;
pub mod models;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::api::ServerError;
use crate::config::{ConfigError, ServiceConfig};
use crate::inference::PredictionService;

/// Startup failures that stop the process.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Server error: {0}")]
    Server(#[from] ServerError),
    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(#[source] std::io::Error),
}

/// Run the prediction service until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let service_config = ServiceConfig::from_env()?;
    let service = Arc::new(PredictionService::initialize(&service_config));

    let mut server = api::start_server_on(service, service_config.socket_addr()).await?;
    tracing::info!(
        session_id = %server.session.session_id,
        addr = %server.session.server_addr,
        "Listening"
    );

    tokio::signal::ctrl_c().await.map_err(StartupError::Signal)?;
    server.shutdown();
    server.join().await?;

    tracing::info!("{} stopped", config::APP_NAME);
    Ok(())
}
