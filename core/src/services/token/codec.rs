//! HS256 token codec

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::entities::{Claims, TokenClass};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenCodecConfig;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Claim set as it appears on the wire
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct JwtClaims {
    pub sub: String,
    pub role: String,
    #[serde(rename = "type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Stateless signer and verifier for session tokens
pub struct TokenCodec {
    config: TokenCodecConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Creates a new codec
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` when the secret is shorter than
    /// 32 bytes or either lifetime is not positive.
    pub fn new(config: TokenCodecConfig, clock: Arc<dyn Clock>) -> DomainResult<Self> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Expiry is checked against the injected clock after decoding
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
        })
    }

    /// Lifetime given to access tokens
    pub fn access_ttl(&self) -> Duration {
        self.config.access_ttl
    }

    /// Lifetime given to refresh tokens
    pub fn refresh_ttl(&self) -> Duration {
        self.config.refresh_ttl
    }

    /// Lifetime for a token class
    pub fn ttl_for(&self, class: TokenClass) -> Duration {
        match class {
            TokenClass::Access => self.config.access_ttl,
            TokenClass::Refresh => self.config.refresh_ttl,
        }
    }

    /// Current instant on the codec's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Signs a new token
    ///
    /// `iat` is the current second and `exp` adds the lifetime configured for
    /// `class`. The email claim is only written into access tokens.
    pub fn issue(
        &self,
        subject_id: Uuid,
        role: &str,
        class: TokenClass,
        email: Option<&str>,
    ) -> DomainResult<String> {
        let issued_at = self.clock.now().timestamp();
        let expires_at = issued_at + self.ttl_for(class).num_seconds();

        let claims = JwtClaims {
            sub: subject_id.to_string(),
            role: role.to_string(),
            token_type: class.as_str().to_string(),
            email: match class {
                TokenClass::Access => email.map(str::to_string),
                TokenClass::Refresh => None,
            },
            iat: issued_at,
            exp: expires_at,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key).map_err(|e| {
            error!("Failed to sign {} token: {}", class, e);
            DomainError::Internal {
                message: format!("token signing failed: {}", e),
            }
        })?;

        debug!(subject_id = %subject_id, class = %class, exp = expires_at, "Issued token");
        Ok(token)
    }

    /// Verifies a token and returns its claims
    ///
    /// A token is expired once the clock reaches its `exp` second.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| classify(token, e.kind()))?;
        let raw = data.claims;

        let issued_at = timestamp(raw.iat)?;
        let expires_at = timestamp(raw.exp)?;
        if self.clock.now() >= expires_at {
            return Err(TokenError::Expired);
        }

        let class = raw
            .token_type
            .parse::<TokenClass>()
            .map_err(|_| TokenError::Unsupported)?;
        let subject_id = Uuid::parse_str(&raw.sub).map_err(|_| TokenError::Malformed)?;

        Ok(Claims::new(
            raw.jti,
            subject_id,
            raw.role,
            class,
            raw.email,
            issued_at,
            expires_at,
        ))
    }
}

fn timestamp(seconds: i64) -> Result<DateTime<Utc>, TokenError> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or(TokenError::Malformed)
}

fn classify(token: &str, kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName | ErrorKind::MissingAlgorithm => {
            TokenError::Unsupported
        }
        // Headers naming an algorithm the library does not know (e.g. "none")
        // fail to deserialize before the algorithm check runs.
        ErrorKind::Json(_) if names_foreign_algorithm(token) => TokenError::Unsupported,
        _ => TokenError::Malformed,
    }
}

fn names_foreign_algorithm(token: &str) -> bool {
    let Some(header) = token.split('.').next() else {
        return false;
    };
    let Ok(bytes) = URL_SAFE_NO_PAD.decode(header) else {
        return false;
    };
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(&bytes) else {
        return false;
    };
    matches!(value.get("alg").and_then(|alg| alg.as_str()), Some(alg) if alg != "HS256")
}
