use std::fmt;

use super::auth::TokenPair;

/// The pair of credentials kept in the token store between runs.
///
/// Either half may be absent. Debug output never includes the token values.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl Session {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Session {
            access_token: Some(access_token.into()),
            refresh_token: Some(refresh_token.into()),
        }
    }

    /// The access token, if one is stored and it is not empty.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

impl From<TokenPair> for Session {
    fn from(pair: TokenPair) -> Self {
        Session {
            access_token: pair.access,
            refresh_token: pair.refresh,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |t: &Option<String>| t.as_ref().map(|_| "<redacted>");
        f.debug_struct("Session")
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_access_token_is_not_authenticated() {
        let session = Session {
            access_token: Some(String::new()),
            refresh_token: Some("r1".to_string()),
        };
        assert!(!session.is_authenticated());
        assert!(!session.is_empty());
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let rendered = format!("{:?}", Session::new("secret-access", "secret-refresh"));
        assert!(!rendered.contains("secret-access"));
        assert!(!rendered.contains("secret-refresh"));
        assert!(rendered.contains("<redacted>"));
    }
}
