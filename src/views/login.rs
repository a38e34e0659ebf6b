use tracing::{info, warn};

use super::{ValidationError, ViewError};
use crate::client::ApiError;
use crate::models::{LoginRequest, Session, TokenPair};
use crate::navigation::{Navigation, Route};
use crate::state::AppState;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::Missing("Email"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::Missing("Password"));
        }
        Ok(LoginRequest {
            username: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Log in with email and password. On success the session is written and
/// the user is taken to the dashboard.
pub async fn submit(state: &AppState, form: &LoginForm) -> Result<Navigation, ViewError> {
    let request = form.validate()?;
    let pair = state
        .client
        .obtain_token(&request)
        .await
        .map_err(|e| login_error(e, &["detail"], "Invalid email or password"))?;
    complete(state, pair).await
}

/// Log in with an access token obtained from Google's OAuth flow.
pub async fn submit_google(state: &AppState, oauth_access_token: &str) -> Result<Navigation, ViewError> {
    if oauth_access_token.trim().is_empty() {
        return Err(ValidationError::Missing("Google access token").into());
    }
    let pair = state
        .client
        .google_login(oauth_access_token.trim())
        .await
        .map_err(|e| login_error(e, &["error_description"], "Google sign-in failed"))?;
    complete(state, pair).await
}

/// Bad credentials come back as 401 from the token endpoint; on the login
/// view that is a wrong password, not an expired session.
fn login_error(err: ApiError, keys: &[&str], fallback: &str) -> ViewError {
    if err.is_unauthorized() {
        let message = err
            .server_message(keys)
            .unwrap_or_else(|| fallback.to_string());
        return ViewError::Request {
            message,
            source: err,
        };
    }
    ViewError::from_api(err, keys, fallback)
}

/// Store a freshly issued token pair and go to the dashboard. A reply
/// without an access token is a failed login; nothing is written.
pub async fn complete(state: &AppState, pair: TokenPair) -> Result<Navigation, ViewError> {
    if pair.access.as_deref().map_or(true, str::is_empty) {
        warn!(
            event_name = "client.session.no_access_token",
            event_domain = "session",
            "login reply carried no access token"
        );
        return Err(ViewError::Request {
            message: "Login failed: the server did not return an access token".to_string(),
            source: ApiError::Decode("response has no access token".to_string()),
        });
    }
    state
        .session
        .establish(Session::from(pair))
        .await
        .map_err(ViewError::Store)?;
    let navigation = state.navigator.navigate(Route::Dashboard).await;
    info!("Logged in; now at {}", navigation.route);
    Ok(navigation)
}

/// Forget the stored credentials. The navigator moves to login.
pub async fn logout(state: &AppState) -> Result<Route, ViewError> {
    state.session.logout().await.map_err(ViewError::Store)?;
    Ok(state.navigator.current_route())
}
