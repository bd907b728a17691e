//! Token codec module for JWT session credentials
//!
//! This module handles signing and verifying the two token classes:
//! - Access tokens carrying subject, role and email
//! - Refresh tokens carrying subject and role only

mod codec;
mod config;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use config::TokenCodecConfig;
