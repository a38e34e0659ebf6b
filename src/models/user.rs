use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::utils::value::value_to_string;

/// The identity shown to the user, read out of the access token's payload.
///
/// This is display data only. The signature is not checked and nothing is
/// authorized based on it; the backend remains the judge of the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Email if the token carries one, otherwise the best other identifier.
    pub identifier: String,
    pub email: Option<String>,
    /// Expiry (`exp`) as seconds since the epoch, when present.
    pub expires_at: Option<i64>,
}

/// Helper struct to read claims from the JWT.
#[derive(Debug, Deserialize)]
struct Claims {
    email: Option<String>,
    username: Option<String>,
    user_id: Option<Value>,
    sub: Option<String>,
    exp: Option<i64>,
}

impl AuthenticatedUser {
    /// Decode the payload of `token`. Any failure, or a payload without an
    /// identifier, yields `None`: no identity is available.
    pub fn from_access_token(token: &str) -> Option<Self> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let claims = match decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation) {
            Ok(data) => data.claims,
            Err(e) => {
                debug!("Access token payload could not be decoded: {}", e);
                return None;
            }
        };

        let email = claims.email.filter(|e| !e.is_empty());
        let identifier = email
            .clone()
            .or(claims.username.filter(|u| !u.is_empty()))
            .or(claims.user_id.as_ref().map(value_to_string))
            .or(claims.sub)?;

        Some(AuthenticatedUser {
            identifier,
            email,
            expires_at: claims.exp,
        })
    }

    /// Whether `exp` has passed. Informational; the guard never consults it.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at.map(|exp| exp <= now).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn mint(claims: Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"server-side-secret"),
        )
        .expect("Failed to encode JWT")
    }

    #[test]
    fn test_email_claim_is_preferred() {
        let token = mint(json!({"email": "alice@example.org", "user_id": 4, "exp": 10}));
        let user = AuthenticatedUser::from_access_token(&token).unwrap();
        assert_eq!(user.identifier, "alice@example.org");
        assert_eq!(user.email.as_deref(), Some("alice@example.org"));
        assert!(user.is_expired(11));
        assert!(!user.is_expired(9));
    }

    #[test]
    fn test_falls_back_to_user_id() {
        let token = mint(json!({"token_type": "access", "user_id": 42}));
        let user = AuthenticatedUser::from_access_token(&token).unwrap();
        assert_eq!(user.identifier, "42");
        assert_eq!(user.email, None);
    }

    #[test]
    fn test_garbage_is_no_identity() {
        assert_eq!(AuthenticatedUser::from_access_token("not-a-jwt"), None);
        assert_eq!(AuthenticatedUser::from_access_token(""), None);

        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode("{not json");
        let token = format!("{}.{}.c2ln", header, payload);
        assert_eq!(AuthenticatedUser::from_access_token(&token), None);
    }

    #[test]
    fn test_payload_without_identifier() {
        let token = mint(json!({"exp": 10}));
        assert_eq!(AuthenticatedUser::from_access_token(&token), None);
    }
}
