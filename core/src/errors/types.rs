//! Error types for session tokens and access control
//!
//! Messages are short and stable; the presentation layer maps each variant
//! to its own status code and error code.

use thiserror::Error;

/// Reasons a session token is rejected
///
/// The first four variants come from the codec and are mutually exclusive.
/// `Revoked` is raised after a token verified but was found in the
/// revocation registry.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token algorithm or class is not supported")]
    Unsupported,

    #[error("Token revoked")]
    Revoked,
}

/// Access control errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Rate limit exceeded, retry in {retry_after_seconds} seconds")]
    RateLimitExceeded { retry_after_seconds: i64 },

    #[error("Subject not found")]
    SubjectNotFound,
}
