//! Session service exposed to the HTTP layer

use chrono::Duration;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use fc_shared::config::{AppConfig, ThrottleConfig};

use crate::clock::Clock;
use crate::domain::entities::{Identity, TokenClass, TokenPair};
use crate::errors::{AuthError, DomainResult, TokenError};
use crate::repositories::SubjectRepository;
use crate::services::rate_limit::{RateLimiter, ThrottleScope};
use crate::services::revocation::RevocationRegistry;
use crate::services::token::{TokenCodec, TokenCodecConfig};

use super::authenticator::SessionAuthenticator;

/// Issues, authenticates, rotates and revokes sessions, and gates
/// rate-limited operations
pub struct SessionService {
    codec: Arc<TokenCodec>,
    registry: Arc<RevocationRegistry>,
    limiter: Arc<RateLimiter>,
    authenticator: SessionAuthenticator,
    subjects: Arc<dyn SubjectRepository>,
    throttle: ThrottleConfig,
}

impl SessionService {
    /// Creates a new session service from its collaborators
    pub fn new(
        codec: Arc<TokenCodec>,
        registry: Arc<RevocationRegistry>,
        limiter: Arc<RateLimiter>,
        subjects: Arc<dyn SubjectRepository>,
        throttle: ThrottleConfig,
    ) -> Self {
        let authenticator = SessionAuthenticator::new(codec.clone(), registry.clone());
        Self {
            codec,
            registry,
            limiter,
            authenticator,
            subjects,
            throttle,
        }
    }

    /// Builds the codec, registry and limiter from application configuration
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` for a secret shorter than 32
    /// bytes or a non-positive token lifetime.
    pub fn from_config(
        config: &AppConfig,
        subjects: Arc<dyn SubjectRepository>,
        clock: Arc<dyn Clock>,
    ) -> DomainResult<Self> {
        let codec = TokenCodec::new(TokenCodecConfig::from(&config.auth), clock.clone())?;
        let registry = RevocationRegistry::new(clock.clone());
        let limiter = RateLimiter::with_clock(clock);

        info!(
            access_ttl = codec.access_ttl().num_seconds(),
            refresh_ttl = codec.refresh_ttl().num_seconds(),
            "Session service configured"
        );

        Ok(Self::new(
            Arc::new(codec),
            Arc::new(registry),
            Arc::new(limiter),
            subjects,
            config.rate_limit.clone(),
        ))
    }

    /// Issues a fresh access and refresh token for a subject
    pub fn issue_session_pair(
        &self,
        subject_id: Uuid,
        role: &str,
        email: &str,
    ) -> DomainResult<TokenPair> {
        let access_token = self
            .codec
            .issue(subject_id, role, TokenClass::Access, Some(email))?;
        let refresh_token = self
            .codec
            .issue(subject_id, role, TokenClass::Refresh, None)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.codec.access_ttl().num_seconds(),
            self.codec.refresh_ttl().num_seconds(),
        ))
    }

    /// Authenticates a bearer access token
    pub fn authenticate(&self, token: &str) -> Result<Identity, TokenError> {
        self.authenticator.authenticate(token)
    }

    /// Exchanges a refresh token for a new pair
    ///
    /// The new pair is signed first and only handed out once the presented
    /// token has been revoked for the rest of its lifetime, so each refresh
    /// token works once and a failed rotation leaves it usable. The new
    /// access token carries the subject's current role and email.
    pub async fn rotate_refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let claims = self
            .authenticator
            .validate(refresh_token, TokenClass::Refresh)?;

        let subject = self
            .subjects
            .find_subject(claims.subject_id())
            .await?
            .ok_or_else(|| {
                warn!(subject_id = %claims.subject_id(), "Refresh for unknown subject");
                AuthError::SubjectNotFound
            })?;

        let pair = self.issue_session_pair(subject.id, &subject.role, &subject.email)?;

        let remaining = claims.remaining_lifetime(self.codec.now());
        if !self.registry.revoke_once(refresh_token, remaining) {
            warn!(subject_id = %subject.id, "Refresh token reused during rotation");
            return Err(TokenError::Revoked.into());
        }

        debug!(subject_id = %subject.id, "Rotated refresh token");
        Ok(pair)
    }

    /// Revokes the tokens of a session for their remaining lifetimes
    ///
    /// Tokens that no longer verify are skipped; they are rejected anyway.
    pub fn revoke_session(&self, access_token: &str, refresh_token: Option<&str>) {
        let now = self.codec.now();
        let tokens = std::iter::once(access_token).chain(refresh_token);

        for token in tokens {
            match self.codec.verify(token) {
                Ok(claims) => {
                    self.registry.revoke(token, claims.remaining_lifetime(now));
                    debug!(
                        subject_id = %claims.subject_id(),
                        class = %claims.class(),
                        "Session token revoked"
                    );
                }
                Err(e) => {
                    debug!("Skipping revocation of unverifiable token: {}", e);
                }
            }
        }
    }

    /// Takes one token from the bucket for `key`
    pub fn throttle(&self, key: &str, capacity: u32, period: Duration) -> bool {
        self.limiter.try_consume(key, capacity, period)
    }

    /// Applies the configured rule for a named scope
    pub fn throttle_scope(&self, scope: ThrottleScope, discriminator: &str) -> bool {
        let rule = scope.rule(&self.throttle);
        self.throttle(&scope.key(discriminator), rule.capacity, rule.period())
    }

    /// Like [`throttle_scope`](Self::throttle_scope) but fails with
    /// `AuthError::RateLimitExceeded` carrying a retry hint
    pub fn require_allowance(&self, scope: ThrottleScope, discriminator: &str) -> DomainResult<()> {
        if self.throttle_scope(scope, discriminator) {
            return Ok(());
        }

        let retry_after_seconds = self
            .limiter
            .time_until_refill(&scope.key(discriminator))
            .map(|wait| wait.num_milliseconds().saturating_add(999) / 1000)
            .unwrap_or(0)
            .max(1);

        Err(AuthError::RateLimitExceeded {
            retry_after_seconds,
        }
        .into())
    }

    pub fn codec(&self) -> &Arc<TokenCodec> {
        &self.codec
    }

    pub fn registry(&self) -> &Arc<RevocationRegistry> {
        &self.registry
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }
}
