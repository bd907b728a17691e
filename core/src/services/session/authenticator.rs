//! Bearer token authentication

use std::sync::Arc;
use tracing::warn;

use crate::domain::entities::{Claims, Identity, TokenClass};
use crate::errors::TokenError;
use crate::services::revocation::RevocationRegistry;
use crate::services::token::TokenCodec;

/// Answers whether a bearer token is valid now and whom it authenticates
#[derive(Clone)]
pub struct SessionAuthenticator {
    codec: Arc<TokenCodec>,
    registry: Arc<RevocationRegistry>,
}

impl SessionAuthenticator {
    pub fn new(codec: Arc<TokenCodec>, registry: Arc<RevocationRegistry>) -> Self {
        Self { codec, registry }
    }

    /// Verify `token`, require its class, then consult the revocation registry
    ///
    /// Codec failures are returned unchanged. A revoked token fails with
    /// `TokenError::Revoked` even though its signature is valid.
    pub fn validate(&self, token: &str, expected: TokenClass) -> Result<Claims, TokenError> {
        let claims = self.codec.verify(token)?;

        if claims.class() != expected {
            return Err(TokenError::Unsupported);
        }

        if self.registry.is_revoked(token) {
            warn!(
                subject_id = %claims.subject_id(),
                class = %claims.class(),
                "Revoked token presented"
            );
            return Err(TokenError::Revoked);
        }

        Ok(claims)
    }

    /// Authenticate an access token
    pub fn authenticate(&self, token: &str) -> Result<Identity, TokenError> {
        let claims = self.validate(token, TokenClass::Access)?;
        Ok(Identity {
            subject_id: claims.subject_id(),
            role: claims.role().to_string(),
        })
    }
}
