//! Authentication error types.
//!
//! Token and code verification fail closed (`None`/`false`) and never
//! surface an error, so there are no token-failure variants here; only
//! infrastructure faults get a variant.

use textpay_core::error::TextpayError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("cryptography error: {0}")]
    Crypto(String),

    #[error("image encoding error: {0}")]
    Encoding(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<AuthError> for TextpayError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Crypto(msg) => TextpayError::Crypto(msg),
            AuthError::Encoding(msg) => TextpayError::Encoding(msg),
            AuthError::Config(msg) => TextpayError::Config(msg),
        }
    }
}
