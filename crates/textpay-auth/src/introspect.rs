//! Unverified token introspection, for diagnostics only.
//!
//! Kept apart from [`crate::token`] on purpose: nothing here proves
//! authenticity, and [`UnverifiedClaims`] does not convert into
//! [`textpay_core::Principal`], so the authorization predicates cannot
//! accept its output. Never use this module at a trust boundary.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

/// Claims read out of a token with no signature or expiry check.
///
/// Deliberately not a `Principal` — a forged token decodes just as
/// happily as a real one.
#[derive(Debug, Clone, Deserialize)]
pub struct UnverifiedClaims {
    pub sub: String,
    pub username: String,
    pub role: String,
    pub exp: i64,
}

/// Decode a token's payload without verifying anything.
///
/// Returns `None` only if the payload is not decodable at all.
pub fn decode_unverified(token: &str) -> Option<UnverifiedClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    jsonwebtoken::decode::<UnverifiedClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .ok()
}
