//! Token entities for JWT-based session authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Token type reported alongside every issued pair
pub const BEARER_TOKEN_TYPE: &str = "Bearer";

/// Class of a session token, carried in the `type` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    /// Short-lived token presented on every request
    Access,
    /// Long-lived token exchanged for a new pair
    Refresh,
}

impl TokenClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenClass::Access => "access",
            TokenClass::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "access" => Ok(TokenClass::Access),
            "refresh" => Ok(TokenClass::Refresh),
            other => Err(format!("Unknown token class: {}", other)),
        }
    }
}

/// Claims of a token whose signature, algorithm and expiry have been checked
///
/// Only the token codec can build this value, so holding a `Claims` means
/// the token it came from verified successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    token_id: String,
    subject_id: Uuid,
    role: String,
    class: TokenClass,
    email: Option<String>,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Claims {
    pub(crate) fn new(
        token_id: String,
        subject_id: Uuid,
        role: String,
        class: TokenClass,
        email: Option<String>,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token_id,
            subject_id,
            role,
            class,
            email,
            issued_at,
            expires_at,
        }
    }

    /// Unique id of this token (`jti`)
    pub fn token_id(&self) -> &str {
        &self.token_id
    }

    /// Subject the token was issued to
    pub fn subject_id(&self) -> Uuid {
        self.subject_id
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn class(&self) -> TokenClass {
        self.class
    }

    /// Email address, present on access tokens only
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Time left before natural expiry, zero once expired
    pub fn remaining_lifetime(&self, now: DateTime<Utc>) -> Duration {
        let remaining = self.expires_at - now;
        if remaining > Duration::zero() {
            remaining
        } else {
            Duration::zero()
        }
    }
}

/// Access and refresh token issued together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token
    pub access_token: String,

    /// Long-lived refresh token
    pub refresh_token: String,

    /// Always "Bearer"
    pub token_type: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: BEARER_TOKEN_TYPE.to_string(),
            access_expires_in,
            refresh_expires_in,
        }
    }
}
