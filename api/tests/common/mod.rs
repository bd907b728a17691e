//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use uuid::Uuid;

use fc_api::AppState;
use fc_core::clock::ManualClock;
use fc_core::domain::entities::{Subject, TokenPair};
use fc_core::repositories::InMemorySubjectRepository;
use fc_core::services::SessionService;
use fc_shared::config::{AppConfig, JwtConfig, ThrottleRule};

pub const SECRET: &str = "integration-test-secret-at-least-32-bytes";

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub sessions: Arc<SessionService>,
    pub subjects: Arc<InMemorySubjectRepository>,
    pub clock: Arc<ManualClock>,
}

impl TestContext {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth = JwtConfig::new(SECRET);
        config.rate_limit.login = ThrottleRule::new(3, 900);
        Self::with_config(config)
    }

    pub fn with_config(config: AppConfig) -> Self {
        let clock = Arc::new(ManualClock::at_timestamp(1_700_000_000));
        let subjects = Arc::new(InMemorySubjectRepository::new());
        let sessions = Arc::new(
            SessionService::from_config(&config, subjects.clone(), clock.clone())
                .expect("valid test configuration"),
        );
        let state = web::Data::new(AppState::new(sessions.clone()));

        Self {
            state,
            sessions,
            subjects,
            clock,
        }
    }

    /// Register a subject and issue it a session
    pub async fn login(&self, role: &str, email: &str) -> (Subject, TokenPair) {
        let subject = Subject::new(Uuid::new_v4(), role, email);
        self.subjects.insert(subject.clone()).await;
        let pair = self
            .sessions
            .issue_session_pair(subject.id, &subject.role, &subject.email)
            .expect("token pair");
        (subject, pair)
    }
}

pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (
        actix_web::http::header::AUTHORIZATION,
        format!("Bearer {}", token),
    )
}
