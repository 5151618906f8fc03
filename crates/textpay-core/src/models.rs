//! Domain models shared across the textpay crates.

pub mod principal;
