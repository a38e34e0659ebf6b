use super::{enter, still_current, ValidationError, ViewError};
use crate::models::{MessageResponse, ProfileUpdate};
use crate::navigation::Route;
use crate::state::AppState;

/// The profile form. `email` starts out as the email in the access token.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub email: String,
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ProfileForm {
    pub fn wants_password_change(&self) -> bool {
        !self.new_password.is_empty() || !self.confirm_password.is_empty()
    }

    pub fn validate(&self) -> Result<ProfileUpdate, ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::Missing("Email"));
        }
        if self.wants_password_change() {
            if self.current_password.is_empty() {
                return Err(ValidationError::Missing("Current password"));
            }
            if self.new_password != self.confirm_password {
                return Err(ValidationError::PasswordMismatch);
            }
        }
        Ok(ProfileUpdate {
            email: self.email.trim().to_string(),
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
            confirm_password: self.confirm_password.clone(),
        })
    }
}

/// Open the profile view with the form prefilled from the session.
pub async fn show(state: &AppState) -> Result<ProfileForm, ViewError> {
    enter(&state.navigator, Route::Profile).await?;
    let email = state
        .session
        .user()
        .await
        .and_then(|user| user.email)
        .unwrap_or_default();
    Ok(ProfileForm {
        email,
        ..Default::default()
    })
}

pub async fn update(state: &AppState, form: &ProfileForm) -> Result<String, ViewError> {
    let ticket = enter(&state.navigator, Route::Profile).await?;
    let update = form.validate()?;
    let reply: MessageResponse = state
        .client
        .update_profile(&update)
        .await
        .map_err(|e| ViewError::from_api(e, &["error"], "Failed to update profile"))?;
    still_current(&state.navigator, &ticket)?;
    Ok(reply
        .message
        .unwrap_or_else(|| "Profile updated successfully".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProfileForm {
        ProfileForm {
            email: "alice@example.org".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_email_only_update() {
        let update = form().validate().unwrap();
        assert_eq!(update.new_password, "");
        assert_eq!(update.current_password, "");
    }

    #[test]
    fn test_password_change_needs_current_password() {
        let f = ProfileForm {
            new_password: "n".to_string(),
            confirm_password: "n".to_string(),
            ..form()
        };
        assert_eq!(
            f.validate().unwrap_err(),
            ValidationError::Missing("Current password")
        );
    }

    #[test]
    fn test_password_change_needs_match() {
        let f = ProfileForm {
            current_password: "old".to_string(),
            new_password: "n1".to_string(),
            confirm_password: "n2".to_string(),
            ..form()
        };
        assert_eq!(f.validate().unwrap_err(), ValidationError::PasswordMismatch);
    }
}
