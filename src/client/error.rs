use http::StatusCode;
use serde_json::Value;

use crate::utils::value::value_to_string;

/// Failures of a call through the request pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered 401. The session has already been cleared and
    /// the login redirect published by the time the caller sees this.
    #[error("session expired or invalid; please log in again")]
    Unauthorized { body: Value },

    /// A protected endpoint was called with no access token stored.
    /// Nothing was sent.
    #[error("not logged in; {endpoint} requires authentication")]
    MissingCredentials { endpoint: &'static str },

    /// Any other non-success status.
    #[error("server returned {status}: {}", backend_message(.body))]
    Backend { status: StatusCode, body: Value },

    /// No response at all: connection refused, DNS, timeout, ...
    #[error("could not reach the server: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected response format: {0}")]
    Decode(String),

    #[error("token store error: {0}")]
    Store(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// The response body, for errors that carry one.
    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Unauthorized { body } | ApiError::Backend { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Look up a server-provided message under the first matching key.
    /// A list value yields its first element, so `"email"` finds the
    /// message in `{"email": ["already taken"]}`.
    pub fn server_message(&self, keys: &[&str]) -> Option<String> {
        let body = self.body()?;
        keys.iter().find_map(|key| match body.get(*key)? {
            Value::Null => None,
            Value::Array(items) => items.first().map(value_to_string),
            other => Some(value_to_string(other)),
        })
    }
}

fn backend_message(body: &Value) -> String {
    for key in ["error", "detail", "message"] {
        if let Some(Value::String(message)) = body.get(key) {
            return message.clone();
        }
    }
    match body {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_message_lookup_order() {
        let err = ApiError::Backend {
            status: StatusCode::BAD_REQUEST,
            body: json!({"email": ["user with this email already exists."], "error": "dup"}),
        };
        assert_eq!(
            err.server_message(&["email", "error"]).as_deref(),
            Some("user with this email already exists.")
        );
        assert_eq!(err.server_message(&["error"]).as_deref(), Some("dup"));
        assert_eq!(err.server_message(&["detail"]), None);
    }

    #[test]
    fn test_backend_display_uses_error_field() {
        let err = ApiError::Backend {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({"error": "model not loaded"}),
        };
        assert_eq!(
            err.to_string(),
            "server returned 500 Internal Server Error: model not loaded"
        );
    }

    #[test]
    fn test_errors_without_body() {
        let err = ApiError::MissingCredentials {
            endpoint: "email_history",
        };
        assert_eq!(err.body(), None);
        assert_eq!(err.server_message(&["error"]), None);
    }
}
