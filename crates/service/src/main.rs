//! Estimator Service - cost and risk estimates over HTTP
//!
//! Accepts fact snapshots produced by a cluster inspector and returns
//! cost ranges, optimization scenarios and security risk exposure.

use anyhow::{Context, Result};
use estimator_lib::Estimator;
use estimator_service::{api, config::ServiceConfig};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // JSON logs, filtered by RUST_LOG
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting estimator-service");

    let config = ServiceConfig::load().context("Failed to load service configuration")?;
    info!(
        cluster = %config.cluster_name,
        default_industry = %config.default_industry,
        "Service configured"
    );

    // Registers the Prometheus metrics
    let estimator = Estimator::new(&config.cluster_name);
    estimator.logger().log_startup(
        api::SERVICE_VERSION,
        config.api_port,
        &config.default_industry,
    );

    let app_state = Arc::new(api::AppState::new(
        estimator.clone(),
        config.default_industry.clone(),
    ));

    let api_handle = tokio::spawn(api::serve(config.api_port, app_state));

    tokio::select! {
        result = api_handle => {
            match result {
                Ok(Ok(())) => info!("API server stopped"),
                Ok(Err(err)) => error!(error = %err, "API server failed"),
                Err(err) => error!(error = %err, "API server task panicked"),
            }
            estimator.logger().log_shutdown("API server exited");
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for shutdown signal")?;
            estimator.logger().log_shutdown("SIGINT received");
            info!("Shutting down");
        }
    }

    Ok(())
}
