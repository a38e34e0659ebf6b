use super::{enter, still_current, ValidationError, ViewError};
use crate::models::{Evaluation, MessageResponse};
use crate::navigation::Route;
use crate::state::AppState;

/// Ratings as entered. `None` means the user has not picked one yet.
#[derive(Debug, Clone, Default)]
pub struct EvaluationForm {
    pub accuracy: Option<u8>,
    pub usability: Option<u8>,
    pub speed: Option<u8>,
    pub reliability: Option<u8>,
    pub overall: Option<u8>,
    pub comments: String,
}

fn rating(category: &'static str, value: Option<u8>) -> Result<u8, ValidationError> {
    let value = value.ok_or(ValidationError::Missing(category))?;
    if !(1..=5).contains(&value) {
        return Err(ValidationError::RatingOutOfRange { category, value });
    }
    Ok(value)
}

impl EvaluationForm {
    pub fn validate(&self) -> Result<Evaluation, ValidationError> {
        Ok(Evaluation {
            accuracy: rating("Accuracy", self.accuracy)?,
            usability: rating("Usability", self.usability)?,
            speed: rating("Speed", self.speed)?,
            reliability: rating("Reliability", self.reliability)?,
            overall: rating("Overall", self.overall)?,
            comments: self.comments.trim().to_string(),
        })
    }
}

pub async fn submit(state: &AppState, form: &EvaluationForm) -> Result<String, ViewError> {
    let ticket = enter(&state.navigator, Route::Evaluation).await?;
    let evaluation = form.validate()?;
    let reply: MessageResponse = state
        .client
        .submit_evaluation(&evaluation)
        .await
        .map_err(|e| ViewError::from_api(e, &["error"], "Failed to submit evaluation"))?;
    still_current(&state.navigator, &ticket)?;
    Ok(reply
        .message
        .unwrap_or_else(|| "Thank you for your feedback!".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> EvaluationForm {
        EvaluationForm {
            accuracy: Some(5),
            usability: Some(4),
            speed: Some(3),
            reliability: Some(4),
            overall: Some(5),
            comments: "  works well ".to_string(),
        }
    }

    #[test]
    fn test_every_rating_is_required() {
        let form = EvaluationForm {
            speed: None,
            ..full()
        };
        assert_eq!(form.validate().unwrap_err(), ValidationError::Missing("Speed"));
    }

    #[test]
    fn test_rating_range() {
        let form = EvaluationForm {
            overall: Some(6),
            ..full()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::RatingOutOfRange {
                category: "Overall",
                value: 6
            }
        );
        let form = EvaluationForm {
            accuracy: Some(0),
            ..full()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_comments_are_trimmed() {
        assert_eq!(full().validate().unwrap().comments, "works well");
    }
}
