//! Application factory
//!
//! Builds the actix-web application around an [`AppState`] so the server
//! binary and the integration tests share one route table.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use fc_core::services::ThrottleScope;
use fc_shared::errors::{error_codes, ErrorResponse};

use crate::middleware::{SessionAuth, Throttle};
use crate::routes::auth::{current_session, logout, refresh};
use crate::state::AppState;

/// Create and configure the application
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let sessions = app_state.sessions.clone();
    let refresh_throttle = Throttle::per_ip(sessions.clone(), ThrottleScope::Login)
        .trust_proxies(app_state.trusted_proxies.clone());

    App::new()
        .app_data(app_state)
        // Outermost last: tracing wraps authentication
        .wrap(SessionAuth::new(sessions))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .service(
                        web::resource("/refresh")
                            .wrap(refresh_throttle)
                            .route(web::post().to(refresh)),
                    )
                    .route("/logout", web::post().to(logout))
                    .route("/session", web::get().to(current_session)),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "fc-session-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
