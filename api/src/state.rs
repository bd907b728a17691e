//! Shared application state

use std::sync::Arc;

use fc_core::services::SessionService;

/// State shared by every worker
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionService>,
    /// Proxies allowed to report the client address
    pub trusted_proxies: Vec<String>,
}

impl AppState {
    pub fn new(sessions: Arc<SessionService>) -> Self {
        Self {
            sessions,
            trusted_proxies: Vec::new(),
        }
    }

    pub fn with_trusted_proxies(mut self, proxies: Vec<String>) -> Self {
        self.trusted_proxies = proxies;
        self
    }
}
