//! HTTP boundary for the session security layer
//!
//! Exposes the app factory, middleware, route handlers and error mapping so
//! the binary and the integration tests build the same application.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use app::create_app;
pub use state::AppState;
