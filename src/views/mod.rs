//! View controllers: form state, presence checks, one pipeline call each,
//! and a plain-text rendering of the outcome.
//!
//! Views never handle 401 themselves; the pipeline has already cleared the
//! session and the navigator is on the login route by the time a view sees
//! [`ApiError::Unauthorized`].

pub mod dashboard;
pub mod email_checker;
pub mod evaluation;
pub mod history;
pub mod login;
pub mod profile;
pub mod register;
pub mod risk;
pub mod shell;

use crate::client::ApiError;
use crate::navigation::{Navigator, Route, ViewTicket};

/// Input problems caught before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("Enter the email content or choose a file")]
    EmptyAnalysisInput,
    #[error("Only .eml files can be analyzed (got '{0}')")]
    NotEmlFile(String),
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("{category} rating must be between 1 and 5 (got {value})")]
    RatingOutOfRange { category: &'static str, value: u8 },
}

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request failed; `message` is what the user should see.
    #[error("{message}")]
    Request {
        message: String,
        #[source]
        source: ApiError,
    },

    /// The session was rejected mid-request; the user is back on login.
    #[error("Your session has expired. Please log in again.")]
    SessionExpired,

    /// The user is not allowed on this view; it redirected instead.
    #[error("Redirected to {0}")]
    Redirected(Route),

    /// The response arrived after the view was left; it was dropped.
    #[error("The view was closed before the response arrived")]
    Discarded,

    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Token store error: {0}")]
    Store(String),
}

impl ViewError {
    /// Turn a pipeline failure into something to show. Server-provided
    /// messages under `keys` win; transport failures and anything without
    /// a usable message fall back to `fallback`.
    pub fn from_api(err: ApiError, keys: &[&str], fallback: &str) -> Self {
        if let ApiError::Unauthorized { .. } = err {
            return ViewError::SessionExpired;
        }
        let message = err
            .server_message(keys)
            .unwrap_or_else(|| fallback.to_string());
        ViewError::Request {
            message,
            source: err,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ViewError::Validation(_))
    }
}

/// Enter `route` through the guard and hand back a ticket for the view.
pub(crate) async fn enter(navigator: &Navigator, route: Route) -> Result<ViewTicket, ViewError> {
    let navigation = navigator.navigate(route).await;
    if navigation.route != route {
        return Err(ViewError::Redirected(navigation.route));
    }
    Ok(navigator.ticket())
}

/// Drop results that arrive after the view was left.
pub(crate) fn still_current(navigator: &Navigator, ticket: &ViewTicket) -> Result<(), ViewError> {
    if navigator.is_current(ticket) {
        Ok(())
    } else {
        Err(ViewError::Discarded)
    }
}
