//! Authentication configuration.
//!
//! Built once at process start and passed by reference into every
//! operation — there is no implicit global secret lookup. A
//! production-like environment without a real signing secret refuses
//! to start instead of silently falling back.

use std::env;

use crate::error::AuthError;

/// Default token lifetime: seven days.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Signing secret used when none is configured outside production.
/// [`AuthConfig::from_env`] rejects this value in production.
pub const DEV_FALLBACK_SECRET: &str = "textpay-dev-secret";

const ENV_SECRET: &str = "TEXTPAY_TOKEN_SECRET";
const ENV_TTL: &str = "TEXTPAY_TOKEN_TTL";
const ENV_TOTP_ISSUER: &str = "TEXTPAY_TOTP_ISSUER";
const ENV_ENVIRONMENT: &str = "TEXTPAY_ENV";

/// Deployment environment, as far as secret policy is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

/// Configuration for the authentication core.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared HS256 signing secret for bearer tokens.
    pub token_secret: String,
    /// Bearer token lifetime in seconds (default: 604 800 = 7 days).
    pub token_ttl_secs: u64,
    /// Issuer name shown in authenticator apps.
    pub totp_issuer: String,
    pub environment: Environment,
}

impl AuthConfig {
    /// Config with an explicitly supplied secret and defaults for the
    /// rest.
    pub fn new(token_secret: impl Into<String>) -> Self {
        Self {
            token_secret: token_secret.into(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            totp_issuer: "Textpay".into(),
            environment: Environment::Development,
        }
    }

    /// Load configuration from the process environment.
    ///
    /// Recognized variables: `TEXTPAY_TOKEN_SECRET`,
    /// `TEXTPAY_TOKEN_TTL` (e.g. `"7d"`, `"12h"`, `"900"`),
    /// `TEXTPAY_TOTP_ISSUER`, `TEXTPAY_ENV`.
    ///
    /// # Errors
    /// Returns `AuthError::Config` if the environment is
    /// production-like and the secret is missing, empty, or equal to
    /// the development fallback, or if the lifetime does not parse.
    pub fn from_env() -> Result<Self, AuthError> {
        let environment = match env::var(ENV_ENVIRONMENT).ok().as_deref() {
            Some("production" | "prod" | "staging") => Environment::Production,
            _ => Environment::Development,
        };

        let token_secret = match env::var(ENV_SECRET) {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment == Environment::Production => {
                return Err(AuthError::Config(format!(
                    "{ENV_SECRET} must be set in production"
                )));
            }
            _ => {
                tracing::warn!("{ENV_SECRET} not set, using the insecure development fallback");
                DEV_FALLBACK_SECRET.to_string()
            }
        };

        if environment == Environment::Production && token_secret == DEV_FALLBACK_SECRET {
            return Err(AuthError::Config(format!(
                "{ENV_SECRET} is set to the development fallback, refusing to start"
            )));
        }

        let token_ttl_secs = match env::var(ENV_TTL) {
            Ok(raw) => parse_ttl(&raw)?,
            Err(_) => DEFAULT_TOKEN_TTL_SECS,
        };

        let totp_issuer = env::var(ENV_TOTP_ISSUER).unwrap_or_else(|_| "Textpay".into());

        Ok(Self {
            token_secret,
            token_ttl_secs,
            totp_issuer,
            environment,
        })
    }
}

/// Parse a lifetime such as `"7d"`, `"12h"`, `"30m"`, `"90s"`, or bare
/// seconds, into seconds.
pub fn parse_ttl(raw: &str) -> Result<u64, AuthError> {
    let raw = raw.trim();
    let (digits, unit) = match raw.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        Some((i, _)) => raw.split_at(i),
        None => (raw, ""),
    };

    let value: u64 = digits
        .parse()
        .map_err(|_| AuthError::Config(format!("invalid token lifetime: {raw:?}")))?;

    let multiplier = match unit {
        "" | "s" => 1,
        "m" => 60,
        "h" => 3_600,
        "d" => 86_400,
        other => {
            return Err(AuthError::Config(format!(
                "unknown lifetime unit: {other:?}"
            )));
        }
    };

    value
        .checked_mul(multiplier)
        .ok_or_else(|| AuthError::Config(format!("token lifetime overflows: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ttl_units() {
        assert_eq!(parse_ttl("7d").unwrap(), 604_800);
        assert_eq!(parse_ttl("12h").unwrap(), 43_200);
        assert_eq!(parse_ttl("30m").unwrap(), 1_800);
        assert_eq!(parse_ttl("90s").unwrap(), 90);
        assert_eq!(parse_ttl("900").unwrap(), 900);
    }

    #[test]
    fn parse_ttl_rejects_garbage() {
        assert!(parse_ttl("").is_err());
        assert!(parse_ttl("d").is_err());
        assert!(parse_ttl("7w").is_err());
        assert!(parse_ttl("soon").is_err());
    }

    #[test]
    fn parse_ttl_rejects_overflowing_lifetimes() {
        assert!(parse_ttl("213503982334601986d").is_err());
        assert!(parse_ttl(&format!("{}h", u64::MAX)).is_err());
        // u64::MAX seconds itself is representable.
        assert_eq!(parse_ttl(&u64::MAX.to_string()).unwrap(), u64::MAX);
    }

    #[test]
    fn production_without_secret_refuses_to_start() {
        temp_env::with_vars(
            [
                (ENV_ENVIRONMENT, Some("production")),
                (ENV_SECRET, None),
                (ENV_TTL, None),
            ],
            || {
                let err = AuthConfig::from_env().unwrap_err();
                assert!(matches!(err, AuthError::Config(_)), "got: {err:?}");
            },
        );
    }

    #[test]
    fn production_rejects_dev_fallback_secret() {
        temp_env::with_vars(
            [
                (ENV_ENVIRONMENT, Some("production")),
                (ENV_SECRET, Some(DEV_FALLBACK_SECRET)),
            ],
            || {
                assert!(AuthConfig::from_env().is_err());
            },
        );
    }

    #[test]
    fn production_with_secret_loads() {
        temp_env::with_vars(
            [
                (ENV_ENVIRONMENT, Some("production")),
                (ENV_SECRET, Some("a-real-secret")),
                (ENV_TTL, Some("12h")),
            ],
            || {
                let config = AuthConfig::from_env().unwrap();
                assert_eq!(config.token_secret, "a-real-secret");
                assert_eq!(config.token_ttl_secs, 43_200);
                assert_eq!(config.environment, Environment::Production);
            },
        );
    }

    #[test]
    fn development_falls_back_with_default_ttl() {
        temp_env::with_vars(
            [
                (ENV_ENVIRONMENT, None::<&str>),
                (ENV_SECRET, None),
                (ENV_TTL, None),
            ],
            || {
                let config = AuthConfig::from_env().unwrap();
                assert_eq!(config.token_secret, DEV_FALLBACK_SECRET);
                assert_eq!(config.token_ttl_secs, DEFAULT_TOKEN_TTL_SECS);
            },
        );
    }
}
