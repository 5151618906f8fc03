//! Bearer token issuance and verification (HS256 signed claims).
//!
//! Tokens carry the principal and an expiry, signed with the single
//! configured shared secret. There is no session state anywhere: a
//! token is valid iff its signature checks out against the current
//! secret and its expiry has not passed.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use textpay_core::Principal;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Claims embedded in every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — user ID.
    pub sub: String,
    pub username: String,
    pub role: String,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

impl From<TokenClaims> for Principal {
    fn from(claims: TokenClaims) -> Self {
        Principal {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
        }
    }
}

/// Issue a signed bearer token for `principal`, expiring
/// `config.token_ttl_secs` from now.
///
/// The role string is embedded as-is; whether it names a known role is
/// not checked here.
///
/// # Errors
/// Returns `AuthError::Crypto` if encoding fails.
pub fn issue_token(principal: &Principal, config: &AuthConfig) -> Result<String, AuthError> {
    let claims = TokenClaims {
        sub: principal.user_id.clone(),
        username: principal.username.clone(),
        role: principal.role.clone(),
        exp: Utc::now().timestamp() + config.token_ttl_secs as i64,
    };

    let key = EncodingKey::from_secret(config.token_secret.as_bytes());
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("token encode: {e}")))
}

/// Verify a bearer token against the configured secret.
///
/// Fail-closed and information-suppressing: malformed encoding,
/// signature mismatch, expired timestamp, and wrong secret all
/// collapse to `None`. Callers cannot learn which check failed.
pub fn verify_token(token: &str, config: &AuthConfig) -> Option<Principal> {
    let key = DecodingKey::from_secret(config.token_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0; // default allows 60s of slack on exp
    validation.set_required_spec_claims(&["exp"]);

    match jsonwebtoken::decode::<TokenClaims>(token, &key, &validation) {
        Ok(data) => Some(data.claims.into()),
        Err(e) => {
            tracing::debug!(error = %e, "bearer token rejected");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig::new("unit-test-secret")
    }

    fn alice() -> Principal {
        Principal::new("user-1", "alice", "admin")
    }

    #[test]
    fn issue_verify_roundtrip() {
        let config = test_config();
        let token = issue_token(&alice(), &config).unwrap();
        assert_eq!(verify_token(&token, &config), Some(alice()));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(&alice(), &test_config()).unwrap();
        let other = AuthConfig::new("some-other-secret");
        assert_eq!(verify_token(&token, &other), None);
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let config = test_config();
        assert_eq!(verify_token("", &config), None);
        assert_eq!(verify_token("not-a-token", &config), None);
        assert_eq!(verify_token("a.b.c", &config), None);
    }

    #[test]
    fn unknown_roles_are_issued_unchecked() {
        let config = test_config();
        let p = Principal::new("user-2", "mallory", "superuser");
        let token = issue_token(&p, &config).unwrap();
        assert_eq!(verify_token(&token, &config), Some(p));
    }
}
