use super::{ValidationError, ViewError};
use crate::models::RegisterRequest;
use crate::navigation::{Navigation, Route};
use crate::state::AppState;

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::Missing("Email"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::Missing("Password"));
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(RegisterRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Registered {
    pub message: String,
    pub navigation: Navigation,
}

/// Create an account, then send the user to log in. Registration does not
/// sign the user in.
pub async fn submit(state: &AppState, form: &RegisterForm) -> Result<Registered, ViewError> {
    let request = form.validate()?;
    let reply = state.client.register(&request).await.map_err(|e| {
        ViewError::from_api(
            e,
            &["email", "error"],
            "This email may already be in use, or something went wrong",
        )
    })?;
    let navigation = state.navigator.navigate(Route::Login).await;
    Ok(Registered {
        message: reply
            .message
            .unwrap_or_else(|| "Registration successful! Please log in.".to_string()),
        navigation,
    })
}
