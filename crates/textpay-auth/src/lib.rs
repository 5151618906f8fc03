//! Textpay Auth — stateless bearer-token issuance/verification,
//! role-based authorization, and TOTP second factor.
//!
//! Every component here is a pure function of its inputs plus the wall
//! clock; nothing is persisted. Decision operations ([`verify_token`],
//! [`authenticate`], [`require_admin`], [`verify_code`]) are total and
//! fail closed — they never surface an error to the caller. Only
//! infrastructure faults (configuration, image encoding) return
//! `Result`.
//!
//! Routing, user/payment storage, and the login flow itself are
//! external collaborators that call into this crate and persist its
//! outputs (notably [`TotpEnrollment::base32_secret`]).

pub mod config;
pub mod error;
pub mod introspect;
pub mod middleware;
pub mod token;
pub mod totp;

pub use config::AuthConfig;
pub use error::AuthError;
pub use middleware::{authenticate, extract_bearer_token, require_admin, AuthOutcome};
pub use token::{issue_token, verify_token, TokenClaims};
pub use totp::{
    enroll, generate_enrollment, render_enrollment_image, verify_code, SecretSeal, TotpEnrollment,
};
// `introspect` is intentionally not re-exported: diagnostic callers
// must name the module explicitly.
