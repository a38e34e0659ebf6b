use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the phishing-detection backend lives and how we talk to it.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to, e.g. "http://localhost:8000/api".
    pub base_url: String,
    /// Optional per-request timeout. Unset means a slow backend is waited on indefinitely.
    #[serde(default)]
    pub timeout_in_ms: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_in_ms: None,
        }
    }
}

/// Google sign-in settings. Only the client id is needed on our side.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct GoogleConfig {
    pub client_id: Option<String>,
}
