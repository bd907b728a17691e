//! Rate limiting middleware for API endpoints
//!
//! Each wrapped resource consumes one token from the bucket of a named
//! [`ThrottleScope`] before the handler runs. The bucket is keyed either by
//! the client IP or by the authenticated subject.
//!
//! The client IP is the socket peer. `Forwarded` and `X-Forwarded-For` are
//! only honoured when the peer is one of the configured trusted proxies.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    net::SocketAddr,
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use fc_core::services::{SessionService, ThrottleScope};

use crate::handlers::ApiError;
use crate::middleware::auth::AuthContext;

/// What identifies a caller within a scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeySource {
    ClientIp,
    Subject,
}

/// Rate limiter middleware factory
#[derive(Clone)]
pub struct Throttle {
    sessions: Arc<SessionService>,
    scope: ThrottleScope,
    source: KeySource,
    trusted_proxies: Arc<[String]>,
}

impl Throttle {
    /// Limit callers by client IP
    pub fn per_ip(sessions: Arc<SessionService>, scope: ThrottleScope) -> Self {
        Self {
            sessions,
            scope,
            source: KeySource::ClientIp,
            trusted_proxies: Arc::from(Vec::new()),
        }
    }

    /// Limit callers by authenticated subject
    ///
    /// Requests without an authenticated caller pass through untouched, so
    /// the handler's own authentication check decides what happens to them.
    pub fn per_subject(sessions: Arc<SessionService>, scope: ThrottleScope) -> Self {
        Self {
            sessions,
            scope,
            source: KeySource::Subject,
            trusted_proxies: Arc::from(Vec::new()),
        }
    }

    /// Believe forwarding headers from these proxy addresses
    pub fn trust_proxies(mut self, proxies: Vec<String>) -> Self {
        self.trusted_proxies = Arc::from(proxies);
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for Throttle
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ThrottleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ThrottleMiddleware {
            service: Rc::new(service),
            config: self.clone(),
        }))
    }
}

/// Rate limiter middleware service
pub struct ThrottleMiddleware<S> {
    service: Rc<S>,
    config: Throttle,
}

impl<S> ThrottleMiddleware<S> {
    fn discriminator(&self, req: &ServiceRequest) -> Option<String> {
        match self.config.source {
            KeySource::ClientIp => Some(client_ip(req, &self.config.trusted_proxies)),
            KeySource::Subject => req
                .extensions()
                .get::<AuthContext>()
                .map(|context| context.subject_id().to_string()),
        }
    }
}

/// Client address without the port
///
/// Forwarding headers are only read when the peer is a trusted proxy.
fn client_ip(req: &ServiceRequest, trusted_proxies: &[String]) -> String {
    let Some(peer) = req.peer_addr().map(|addr| addr.ip().to_string()) else {
        return "unknown".to_string();
    };
    if !trusted_proxies.iter().any(|proxy| *proxy == peer) {
        return peer;
    }

    let info = req.connection_info();
    match info.realip_remote_addr() {
        Some(addr) => strip_port(addr),
        None => peer,
    }
}

fn strip_port(addr: &str) -> String {
    addr.parse::<SocketAddr>()
        .map(|socket| socket.ip().to_string())
        .unwrap_or_else(|_| addr.to_string())
}

impl<S, B> Service<ServiceRequest> for ThrottleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(discriminator) = self.discriminator(&req) {
            if let Err(e) = self
                .config
                .sessions
                .require_allowance(self.config.scope, &discriminator)
            {
                let response = ApiError::from(e).error_response();
                return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
            }
        }

        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
