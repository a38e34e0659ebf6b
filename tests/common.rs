use std::sync::Arc;

use jsonwebtoken::{encode, EncodingKey, Header};
use phishguard::config::{ApiConfig, ConfigV1, StoreConfig};
use phishguard::models::Session;
use phishguard::startup;
use phishguard::state::AppState;
use serde_json::Value;

/// State talking to `base_url` with an in-memory token store.
pub fn build_state(base_url: String) -> AppState {
    let config = ConfigV1 {
        api: ApiConfig {
            base_url,
            timeout_in_ms: Some(5_000),
        },
        store: StoreConfig::Memory,
        ..ConfigV1::default()
    };
    startup::build(Arc::new(config)).expect("failed to build state")
}

/// Same, but already logged in with `session`.
pub async fn logged_in_state(base_url: String, session: Session) -> AppState {
    let state = build_state(base_url);
    state
        .session
        .establish(session)
        .await
        .expect("failed to seed session");
    state
}

/// Signed the way a backend would; the client never checks the signature.
#[allow(dead_code)]
pub fn mint_token(claims: Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"backend-secret"),
    )
    .expect("Failed to encode JWT")
}
