//! ClickHouseInstallation Status Controller
//!
//! Watches `ClickHouseInstallation` resources and maintains their status:
//! reconcile progress, per-host counters, bounded action/error histories and
//! the last successfully applied configuration.

mod config;
mod controller;
mod error;
mod reconciler;
#[cfg(test)]
mod test_utils;
mod watcher;

use crate::config::Config;
use crate::error::ControllerError;
use controller::Controller;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ControllerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if rustls::crypto::ring::default_provider().install_default().is_err() {
        debug!("rustls crypto provider already installed");
    }

    info!("Starting ClickHouseInstallation status controller {}", crds::version::VERSION);

    let config = Config::from_env()?;
    info!("Configuration:");
    info!("  Namespace: {}", config.namespace.as_deref().unwrap_or("all namespaces"));
    info!("  Operator IP: {}", if config.operator_ip.is_empty() { "<unset>" } else { config.operator_ip.as_str() });
    info!(
        "  Status updates: {} attempts, {:?} apart",
        config.sync.max_attempts, config.sync.retry_interval
    );
    info!("  Concurrency: {}", config.concurrency);

    let controller = Controller::new(config).await?;
    controller.run().await?;

    Ok(())
}
