//! Session API server
//!
//! Loads configuration, starts the revocation sweeper and serves the
//! session routes.
//!
//! The binary wires an empty [`InMemorySubjectRepository`] and exposes no
//! login route, so nothing here calls `issue_session_pair`. Until an identity
//! store and a login flow are plugged in, `/refresh` answers every token with
//! `SUBJECT_NOT_FOUND` and the server can only authenticate and revoke
//! sessions minted elsewhere with the same secret.

use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fc_api::{create_app, AppState};
use fc_core::clock::SystemClock;
use fc_core::repositories::InMemorySubjectRepository;
use fc_core::services::{RevocationSweeper, SessionService};
use fc_shared::config::{AppConfig, LogFormat, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging);

    info!(environment = %config.environment, "Starting session API server");
    if config.auth.is_using_default_secret() {
        warn!("Using the development token secret; set FC__AUTH__SECRET outside development");
    }

    // Empty until an identity store is wired in; see the module docs
    let subjects = Arc::new(InMemorySubjectRepository::new());
    let sessions = SessionService::from_config(&config, subjects, Arc::new(SystemClock))
        .context("failed to build session service")?;
    let sessions = Arc::new(sessions);

    let sweeper = Arc::new(RevocationSweeper::new(
        sessions.registry().clone(),
        config.revocation.clone(),
    ));
    let sweeper_handle = sweeper.start();

    let app_state = web::Data::new(
        AppState::new(sessions).with_trusted_proxies(config.server.trusted_proxies.clone()),
    );
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await;

    if let Some(handle) = sweeper_handle {
        handle.shutdown().await;
    }
    info!("Server stopped");

    result.context("server terminated with an error")
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(logging.source_location)
        .with_line_number(logging.source_location);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}
