//! Shared application state.
//!
//! Contains what every view needs: configuration, the session, the request
//! pipeline and the navigator.

use std::sync::Arc;

use crate::client::{ApiClient, ApiError};
use crate::config::ConfigV1;
use crate::navigation::Navigator;
use crate::session::SessionHandle;
use crate::store::create_store;

/// Application state shared across all views.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Session lifecycle over the configured token store.
    pub session: SessionHandle,
    /// Request pipeline every backend call goes through.
    pub client: ApiClient,
    /// Active route plus the session guard.
    pub navigator: Arc<Navigator>,
}

impl AppState {
    /// Wire store, session, pipeline and navigator from `config`.
    pub fn from_config(config: Arc<ConfigV1>) -> Result<Self, ApiError> {
        let store = create_store(&config.store);
        let session = SessionHandle::new(store);
        let client = ApiClient::new(&config.api, session.clone())?;
        let navigator = Arc::new(Navigator::new(&session));
        Ok(AppState {
            config,
            session,
            client,
            navigator,
        })
    }
}
