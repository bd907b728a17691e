//! Error mapping for HTTP responses

pub mod error;

pub use error::ApiError;
