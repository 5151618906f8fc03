//! Error types for the textpay system.
//!
//! Authentication failures (401 class) and authorization denials
//! (403 class) are distinct variants — callers at the HTTP boundary
//! must be able to tell them apart.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextpayError {
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Authorization denied: {reason}")]
    AuthorizationDenied { reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TextpayResult<T> = Result<T, TextpayError>;
