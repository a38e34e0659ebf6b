//! Application startup: configuration, logging and state wiring.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::config::{load_config, ConfigV1};
use crate::state::AppState;
use crate::utils::logger::init_logging;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] figment::Error),
    #[error("{0}")]
    Logging(String),
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] crate::client::ApiError),
}

/// Load the configuration at `config_path`, install logging and build the
/// shared state.
///
/// # Errors
///
/// Returns an error if the configuration cannot be parsed, the logging
/// settings are invalid, or the HTTP client cannot be constructed.
pub fn init(config_path: &Path) -> Result<AppState, StartupError> {
    let config = Arc::new(load_config(config_path)?);
    init_logging(&config.logging).map_err(StartupError::Logging)?;
    build(config)
}

/// Build state from an already-loaded configuration.
pub fn build(config: Arc<ConfigV1>) -> Result<AppState, StartupError> {
    let state = AppState::from_config(config)?;
    info!(
        event_name = "client.startup.ready",
        event_domain = "startup",
        base_url = state.client.base_url(),
        store = state.session.store_name(),
        "client ready"
    );
    Ok(state)
}
