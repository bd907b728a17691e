//! # Flashcards Session Core
//!
//! Session security and abuse control for the flashcards backend.
//! This crate contains the token codec, the revocation registry, the
//! rate limiter and the session facade that ties them together, along
//! with the domain entities, repository interfaces and error types they share.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
