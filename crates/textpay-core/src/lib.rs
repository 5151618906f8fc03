//! Textpay Core — domain types and the error taxonomy shared by the
//! authentication core and its callers.

pub mod error;
pub mod models;

pub use error::{TextpayError, TextpayResult};
pub use models::principal::Principal;
