//! Request authentication and role authorization.
//!
//! Framework-neutral: these functions operate on [`http::HeaderMap`]
//! so the routing layer stays an external collaborator. Authentication
//! and authorization are two separate steps — failing [`authenticate`]
//! is a 401-class condition, passing it but failing [`require_admin`]
//! a 403-class one — and the two must stay distinguishable.

use http::header::AUTHORIZATION;
use http::HeaderMap;
use textpay_core::error::TextpayError;
use textpay_core::Principal;

use crate::config::AuthConfig;
use crate::token;

/// The one message returned for every authentication failure. Which
/// step failed (missing header, bad scheme, bad token) is never
/// disclosed.
pub const UNAUTHENTICATED_MSG: &str = "Unauthorized - Token required";

/// Per-request authentication result. Transient; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub authenticated: bool,
    pub user: Option<Principal>,
    pub error: Option<&'static str>,
}

/// Pull the bearer token out of the `Authorization` header.
///
/// The scheme must be the exact literal `"Bearer "` — case-sensitive,
/// single space. A missing header, another scheme, a non-UTF-8 value,
/// or an empty remainder all yield `None`.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

/// Authenticate a request: extract the bearer token and verify it.
///
/// Every failure mode collapses into one undifferentiated outcome
/// carrying [`UNAUTHENTICATED_MSG`].
pub fn authenticate(headers: &HeaderMap, config: &AuthConfig) -> AuthOutcome {
    match extract_bearer_token(headers).and_then(|t| token::verify_token(t, config)) {
        Some(user) => AuthOutcome {
            authenticated: true,
            user: Some(user),
            error: None,
        },
        None => AuthOutcome {
            authenticated: false,
            user: None,
            error: Some(UNAUTHENTICATED_MSG),
        },
    }
}

/// True iff the principal is present and holds an elevated role
/// (`"admin"` or `"moderator"`, exact casing). `None` is never
/// elevated.
pub fn require_admin(user: Option<&Principal>) -> bool {
    user.is_some_and(Principal::is_admin)
}

/// Gate a privileged action on an authentication outcome, mapping onto
/// the error taxonomy: unauthenticated is `AuthenticationFailed`
/// (401 class), authenticated-but-not-admin is `AuthorizationDenied`
/// (403 class).
pub fn authorize_admin(outcome: &AuthOutcome) -> Result<&Principal, TextpayError> {
    let user = outcome
        .user
        .as_ref()
        .ok_or_else(|| TextpayError::AuthenticationFailed {
            reason: UNAUTHENTICATED_MSG.into(),
        })?;

    if user.is_admin() {
        Ok(user)
    } else {
        Err(TextpayError::AuthorizationDenied {
            reason: format!("role {:?} may not perform admin actions", user.role),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::issue_token;
    use http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_exact_bearer_scheme_only() {
        assert_eq!(
            extract_bearer_token(&headers_with_auth("Bearer xyz")),
            Some("xyz")
        );
        assert_eq!(extract_bearer_token(&headers_with_auth("bearer xyz")), None);
        assert_eq!(extract_bearer_token(&headers_with_auth("Bearer")), None);
        assert_eq!(extract_bearer_token(&headers_with_auth("Bearer ")), None);
        assert_eq!(extract_bearer_token(&headers_with_auth("Basic xyz")), None);
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn authenticate_accepts_a_valid_token() {
        let config = AuthConfig::new("middleware-test-secret");
        let p = Principal::new("u1", "alice", "admin");
        let token = issue_token(&p, &config).unwrap();

        let outcome = authenticate(&headers_with_auth(&format!("Bearer {token}")), &config);
        assert!(outcome.authenticated);
        assert_eq!(outcome.user, Some(p));
        assert_eq!(outcome.error, None);
    }

    #[test]
    fn authenticate_failures_are_undifferentiated() {
        let config = AuthConfig::new("middleware-test-secret");

        for headers in [
            HeaderMap::new(),
            headers_with_auth("Basic abc"),
            headers_with_auth("Bearer garbage"),
        ] {
            let outcome = authenticate(&headers, &config);
            assert!(!outcome.authenticated);
            assert_eq!(outcome.user, None);
            assert_eq!(outcome.error, Some("Unauthorized - Token required"));
        }
    }

    #[test]
    fn require_admin_truth_table() {
        assert!(!require_admin(None));
        assert!(require_admin(Some(&Principal::new("u", "a", "admin"))));
        assert!(require_admin(Some(&Principal::new("u", "a", "moderator"))));
        assert!(!require_admin(Some(&Principal::new("u", "a", "Admin"))));
        assert!(!require_admin(Some(&Principal::new("u", "a", "user"))));
    }

    #[test]
    fn authorize_admin_distinguishes_401_from_403() {
        let unauthenticated = AuthOutcome {
            authenticated: false,
            user: None,
            error: Some(UNAUTHENTICATED_MSG),
        };
        assert!(matches!(
            authorize_admin(&unauthenticated),
            Err(TextpayError::AuthenticationFailed { .. })
        ));

        let plain_user = AuthOutcome {
            authenticated: true,
            user: Some(Principal::new("u", "bob", "user")),
            error: None,
        };
        assert!(matches!(
            authorize_admin(&plain_user),
            Err(TextpayError::AuthorizationDenied { .. })
        ));

        let admin = AuthOutcome {
            authenticated: true,
            user: Some(Principal::new("u", "alice", "admin")),
            error: None,
        };
        assert_eq!(authorize_admin(&admin).unwrap().username, "alice");
    }
}
