//! ID token identity provider
//!
//! The backend signs the user's ID token and verifies it on every request;
//! this side only needs the claims to learn who is signed in and whether
//! the token is still usable, so the signature check is left to the backend.

use crate::ports::AuthProvider;
use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, DecodingKey, Validation};
use progress_tracker_shared::AuthError;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Claims read from the ID token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdTokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Backend-specific copy of the user ID, preferred when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl IdTokenClaims {
    pub fn uid(&self) -> &str {
        self.user_id.as_deref().unwrap_or(&self.sub)
    }
}

/// Auth provider backed by the signed-in user's ID token
#[derive(Clone)]
pub struct TokenAuth {
    token: Option<SecretString>,
    key: DecodingKey,
    validation: Validation,
}

impl TokenAuth {
    /// When `project_id` is set, the token's audience and issuer must match it.
    pub fn new(token: Option<SecretString>, project_id: Option<&str>) -> Self {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        match project_id {
            Some(project) => {
                validation.set_audience(&[project]);
                validation.set_issuer(&[format!("https://securetoken.google.com/{project}")]);
                validation.set_required_spec_claims(&["exp", "aud", "iss"]);
            }
            None => validation.validate_aud = false,
        }

        Self {
            token,
            key: DecodingKey::from_secret(&[]),
            validation,
        }
    }

    /// Decode and check the current token's claims
    pub fn claims(&self) -> Result<IdTokenClaims, AuthError> {
        let token = self.token.as_ref().ok_or(AuthError::MissingToken)?;
        let data = decode::<IdTokenClaims>(token.expose_secret(), &self.key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        if data.claims.uid().is_empty() {
            return Err(AuthError::InvalidToken("empty subject".to_string()));
        }
        Ok(data.claims)
    }
}

#[async_trait]
impl AuthProvider for TokenAuth {
    async fn current_user_id(&self) -> Result<String, AuthError> {
        self.claims().map(|claims| claims.uid().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token_for(sub: &str, user_id: Option<&str>, expires_in: Duration) -> SecretString {
        let claims = IdTokenClaims {
            sub: sub.to_string(),
            exp: (Utc::now() + expires_in).timestamp(),
            user_id: user_id.map(str::to_string),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"backend-only-secret"),
        )
        .unwrap();
        SecretString::new(token)
    }

    #[tokio::test]
    async fn test_valid_token_yields_subject() {
        let auth = TokenAuth::new(Some(token_for("user-42", None, Duration::hours(1))), None);
        assert_eq!(auth.current_user_id().await, Ok("user-42".to_string()));
    }

    #[tokio::test]
    async fn test_user_id_claim_preferred() {
        let auth = TokenAuth::new(
            Some(token_for("sub-1", Some("uid-1"), Duration::hours(1))),
            None,
        );
        assert_eq!(auth.current_user_id().await, Ok("uid-1".to_string()));
    }

    #[tokio::test]
    async fn test_missing_token() {
        let auth = TokenAuth::new(None, None);
        assert_eq!(auth.current_user_id().await, Err(AuthError::MissingToken));
    }

    #[tokio::test]
    async fn test_expired_token() {
        let auth = TokenAuth::new(Some(token_for("user-42", None, Duration::hours(-2))), None);
        assert_eq!(auth.current_user_id().await, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn test_garbage_token() {
        let auth = TokenAuth::new(Some(SecretString::new("not.a.token".to_string())), None);
        assert!(matches!(
            auth.current_user_id().await,
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[tokio::test]
    async fn test_wrong_project_rejected() {
        let auth = TokenAuth::new(
            Some(token_for("user-42", None, Duration::hours(1))),
            Some("my-project"),
        );
        assert!(matches!(
            auth.current_user_id().await,
            Err(AuthError::InvalidToken(_))
        ));
    }
}
