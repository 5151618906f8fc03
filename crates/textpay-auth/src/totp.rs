//! TOTP second-factor enrollment and verification, plus AES-256-GCM
//! sealing of secrets on their way to external storage.
//!
//! The secret's lifecycle (`Generated` → `PendingEnrollment` →
//! `Confirmed` → `Active`) is tracked by the persistence collaborator;
//! this module only exposes the transition-triggering operations.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use totp_rs::{Algorithm, Secret, TOTP};

use crate::config::AuthConfig;
use crate::error::AuthError;

/// RFC 6238 time step in seconds.
const STEP_SECS: u64 = 30;
/// Codes within this many steps of the current one are accepted, in
/// either direction (inclusive).
const SKEW_STEPS: u8 = 2;
const DIGITS: usize = 6;

/// A freshly generated second-factor enrollment.
///
/// `base32_secret` is the durable credential — the caller persists it.
/// `otpauth_uri` is a disposable artifact consumed by authenticator
/// apps, usually via [`render_enrollment_image`].
#[derive(Debug, Clone)]
pub struct TotpEnrollment {
    pub base32_secret: String,
    pub otpauth_uri: String,
}

fn build_totp(secret_bytes: Vec<u8>, issuer: &str, label: &str) -> Result<TOTP, AuthError> {
    TOTP::new(
        Algorithm::SHA1, // RFC 6238 default, what authenticator apps expect
        DIGITS,
        SKEW_STEPS,
        STEP_SECS,
        secret_bytes,
        Some(issuer.to_string()),
        label.to_string(),
    )
    .map_err(|e| AuthError::Crypto(format!("TOTP init: {e}")))
}

/// Generate a fresh enrollment for `label` (typically a username):
/// a 160-bit random secret (32 base32 characters) and the standard
/// `otpauth://totp/{issuer}:{label}?...` URI.
///
/// Every call draws a new independent secret.
///
/// # Errors
/// Returns `AuthError::Crypto` if secret or URI construction fails.
pub fn generate_enrollment(issuer: &str, label: &str) -> Result<TotpEnrollment, AuthError> {
    let secret = Secret::generate_secret();
    let secret_bytes = secret
        .to_bytes()
        .map_err(|e| AuthError::Crypto(format!("secret bytes: {e}")))?;

    let totp = build_totp(secret_bytes, issuer, label)?;

    Ok(TotpEnrollment {
        base32_secret: totp.get_secret_base32(),
        otpauth_uri: totp.get_url(),
    })
}

/// [`generate_enrollment`] with the configured issuer name.
///
/// # Errors
/// Returns `AuthError::Crypto` if secret or URI construction fails.
pub fn enroll(config: &AuthConfig, label: &str) -> Result<TotpEnrollment, AuthError> {
    generate_enrollment(&config.totp_issuer, label)
}

/// Render an otpauth URI as a scannable QR code, returned as a
/// `data:image/png;base64,...` payload embeddable directly in a page.
///
/// Encoding runs on the blocking pool; treat the call as a suspension
/// point. This is the one operation in the core that propagates
/// failure: an input that is not an otpauth URI, or one the encoder
/// rejects, surfaces as [`AuthError::Encoding`] rather than degrading
/// to a null result.
pub async fn render_enrollment_image(otpauth_uri: &str) -> Result<String, AuthError> {
    let totp = TOTP::from_url(otpauth_uri)
        .map_err(|e| AuthError::Encoding(format!("not a valid otpauth URI: {e}")))?;

    let png_base64 = tokio::task::spawn_blocking(move || {
        totp.get_qr_base64()
            .map_err(|e| AuthError::Encoding(format!("QR encode: {e}")))
    })
    .await
    .map_err(|e| AuthError::Encoding(format!("encoder task: {e}")))??;

    Ok(format!("data:image/png;base64,{png_base64}"))
}

/// Check a submitted 6-digit code against the codes valid within
/// ±2 time steps of now.
///
/// Total and fail-closed: a malformed secret, clock fault, or any
/// other internal error is reported as `false`, never raised.
pub fn verify_code(base32_secret: &str, code: &str) -> bool {
    verify_code_at(base32_secret, code, now_secs()).unwrap_or(false)
}

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn verify_code_at(base32_secret: &str, code: &str, time: u64) -> Result<bool, AuthError> {
    let secret_bytes = Secret::Encoded(base32_secret.to_string())
        .to_bytes()
        .map_err(|e| AuthError::Crypto(format!("bad secret: {e}")))?;

    // Issuer/label are irrelevant for checking; only secret, step, and
    // skew enter the comparison.
    let totp = build_totp(secret_bytes, "textpay", "check")?;
    Ok(totp.check(code, time))
}

const NONCE_LEN: usize = 12;

/// Seals TOTP secrets with AES-256-GCM before they cross into external
/// storage. Wire format: `base64(nonce || ciphertext || tag)`.
#[derive(Clone)]
pub struct SecretSeal {
    cipher: Aes256Gcm,
}

impl SecretSeal {
    pub fn new(key: &[u8; 32]) -> Self {
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key)),
        }
    }

    /// Encrypt a secret under a fresh random nonce.
    ///
    /// # Errors
    /// Returns `AuthError::Crypto` if encryption fails.
    pub fn seal(&self, plaintext: &[u8]) -> Result<String, AuthError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| AuthError::Crypto(format!("seal: {e}")))?;

        let mut combined = nonce_bytes.to_vec();
        combined.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(combined))
    }

    /// Decrypt a sealed secret.
    ///
    /// # Errors
    /// Returns `AuthError::Crypto` on malformed input, a wrong key, or
    /// a tampered ciphertext.
    pub fn open(&self, sealed: &str) -> Result<Vec<u8>, AuthError> {
        let combined = STANDARD
            .decode(sealed)
            .map_err(|e| AuthError::Crypto(format!("base64 decode: {e}")))?;

        if combined.len() <= NONCE_LEN {
            return Err(AuthError::Crypto("sealed secret too short".into()));
        }

        let (nonce_bytes, ciphertext) = combined.split_at(NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|e| AuthError::Crypto(format!("open: {e}")))
    }
}
