//! PhoneFinder - Main entry point
//!
//! Serves the admin phone lookup endpoint over HTTP.

use anyhow::Result;
use phonefinder::phone::{LibPhoneNormalizer, PhoneNormalizer};
use phonefinder::server::{run_server, AppState};
use phonefinder::services::{LookupService, PhoneLookupHandler};
use phonefinder::{directory, Config, Metrics};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // RUST_LOG wins; otherwise LOG_LEVEL from the config
    let fallback = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let metrics = Metrics::new();

    let directory = directory::from_config(&config, metrics.clone())?;
    let normalizer = Arc::new(LibPhoneNormalizer::from_config(&config)?) as Arc<dyn PhoneNormalizer>;

    info!(
        "Default phone region: {}",
        config.default_region.as_deref().unwrap_or("none")
    );

    let lookup = Arc::new(
        PhoneLookupHandler::new(directory, normalizer, metrics.clone())
            .with_page_size(config.page_size),
    ) as Arc<dyn LookupService>;

    let state = AppState::new(lookup, metrics, &config.admin_token);

    run_server(&config.bind_addr, state).await
}
