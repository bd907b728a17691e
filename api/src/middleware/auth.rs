//! Session authentication middleware.
//!
//! The middleware extracts the bearer token from the Authorization header,
//! authenticates it and records the outcome in the request extensions. It
//! never rejects a request itself; handlers that need a caller take an
//! [`AuthContext`], which turns a recorded rejection into the matching error.

use actix_web::{
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use tracing::debug;
use uuid::Uuid;

use fc_core::domain::entities::Identity;
use fc_core::errors::TokenError;
use fc_core::services::SessionService;

use crate::handlers::ApiError;

/// Authenticated caller injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub identity: Identity,
    /// Raw bearer token the caller presented
    pub token: String,
}

impl AuthContext {
    pub fn subject_id(&self) -> Uuid {
        self.identity.subject_id
    }

    pub fn role(&self) -> &str {
        &self.identity.role
    }
}

/// Why a presented bearer token was not accepted
#[derive(Debug, Clone, Copy)]
pub struct AuthRejection(pub TokenError);

/// Session authentication middleware factory
#[derive(Clone)]
pub struct SessionAuth {
    sessions: Arc<SessionService>,
}

impl SessionAuth {
    pub fn new(sessions: Arc<SessionService>) -> Self {
        Self { sessions }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
            sessions: self.sessions.clone(),
        }))
    }
}

/// Session authentication middleware service
pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
    sessions: Arc<SessionService>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(token) = extract_bearer_token(&req) {
            match self.sessions.authenticate(&token) {
                Ok(identity) => {
                    req.extensions_mut().insert(AuthContext { identity, token });
                }
                Err(e) => {
                    debug!(path = %req.path(), "Bearer token rejected: {}", e);
                    req.extensions_mut().insert(AuthRejection(e));
                }
            }
        }

        let service = Rc::clone(&self.service);
        Box::pin(async move { service.call(req).await })
    }
}

/// Extracts Bearer token from Authorization header
pub fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let extensions = req.extensions();
        let result = if let Some(context) = extensions.get::<AuthContext>() {
            Ok(context.clone())
        } else if let Some(AuthRejection(reason)) = extensions.get::<AuthRejection>() {
            Err(ApiError::from(*reason))
        } else {
            Err(ApiError::MissingCredentials)
        };

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[::core::prelude::v1::test]
    fn test_extract_bearer_token() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_empty = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer   "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }
}
