//! Mapping of domain errors onto HTTP responses
//!
//! | Condition                                          | Status |
//! |----------------------------------------------------|--------|
//! | Malformed, bad signature, unsupported, revoked     | 401    |
//! | Expired token                                      | 410    |
//! | Rate limit exceeded                                | 429    |
//! | Missing credentials, unknown subject               | 401    |

use actix_web::{
    http::{header::RETRY_AFTER, StatusCode},
    HttpResponse, ResponseError,
};
use thiserror::Error;
use tracing::error;

use fc_core::errors::{AuthError, DomainError, TokenError};
use fc_shared::errors::{error_codes, ErrorResponse};

/// Error returned by handlers, middleware and extractors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Missing bearer credentials")]
    MissingCredentials,
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        ApiError::Domain(error.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        ApiError::Domain(error.into())
    }
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::MissingCredentials => error_codes::UNAUTHORIZED,
            ApiError::Domain(DomainError::Token(token_error)) => match token_error {
                TokenError::Malformed => error_codes::TOKEN_MALFORMED,
                TokenError::InvalidSignature => error_codes::TOKEN_INVALID,
                TokenError::Expired => error_codes::TOKEN_EXPIRED,
                TokenError::Unsupported => error_codes::TOKEN_UNSUPPORTED,
                TokenError::Revoked => error_codes::TOKEN_REVOKED,
            },
            ApiError::Domain(DomainError::Auth(auth_error)) => match auth_error {
                AuthError::RateLimitExceeded { .. } => error_codes::RATE_LIMIT_EXCEEDED,
                AuthError::SubjectNotFound => error_codes::SUBJECT_NOT_FOUND,
            },
            ApiError::Domain(DomainError::Configuration { .. })
            | ApiError::Domain(DomainError::Internal { .. }) => error_codes::INTERNAL_ERROR,
        }
    }

    fn retry_after(&self) -> Option<i64> {
        match self {
            ApiError::Domain(DomainError::Auth(AuthError::RateLimitExceeded {
                retry_after_seconds,
            })) => Some(*retry_after_seconds),
            _ => None,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Domain(DomainError::Token(TokenError::Expired)) => StatusCode::GONE,
            ApiError::Domain(DomainError::Token(_)) => StatusCode::UNAUTHORIZED,
            ApiError::Domain(DomainError::Auth(AuthError::RateLimitExceeded { .. })) => {
                StatusCode::TOO_MANY_REQUESTS
            }
            ApiError::Domain(DomainError::Auth(AuthError::SubjectNotFound)) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Domain(DomainError::Configuration { .. })
            | ApiError::Domain(DomainError::Internal { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Internal details stay in the logs
        let message = if status.is_server_error() {
            error!("Request failed: {}", self);
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let mut body = ErrorResponse::new(self.code(), message);
        let mut builder = HttpResponse::build(status);
        if let Some(seconds) = self.retry_after() {
            body = body.add_detail("retry_after", seconds);
            builder.insert_header((RETRY_AFTER, seconds.to_string()));
        }

        builder.json(body)
    }
}
