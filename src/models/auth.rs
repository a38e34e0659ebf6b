use serde::{Deserialize, Serialize};

/// Credentials for `POST /token/`. The backend keys accounts by email but
/// calls the field `username`.
#[derive(Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body for `POST /auth/google/`: the OAuth access token obtained from Google.
#[derive(Serialize, Debug, Clone)]
pub struct GoogleLoginRequest {
    pub access_token: String,
}

/// Body for `POST /register/`.
#[derive(Serialize, Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// What both login endpoints hand back.
#[derive(Deserialize, Clone, Default, PartialEq, Eq)]
pub struct TokenPair {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Plain acknowledgement bodies, e.g. `{"message": "..."}`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}
