pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

use crate::domain::error::{AppError, Result};
use crate::infrastructure::bootstrap::bootstrap;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::connection;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over the configured filter.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Opens the record store, serves HTTP until shutdown, then closes the store.
pub async fn run(config: AppConfig) -> Result<()> {
    let booted = bootstrap(&config).await?;

    let server = crate::interfaces::http::start_server(booted.state, &config.host, config.port)
        .map_err(|e| AppError::IoError(format!("Failed to bind {}:{}: {}", config.host, config.port, e)))?;

    let served = server.await;

    connection::close(&booted.pool).await;

    served.map_err(|e| {
        error!(error = %e, "HTTP server stopped with an error");
        AppError::IoError(e.to_string())
    })
}
