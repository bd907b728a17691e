//! Session module
//!
//! Combines the token codec, the revocation registry and the rate limiter
//! into the operations the HTTP layer calls.

mod authenticator;
mod service;


pub use authenticator::SessionAuthenticator;
pub use service::SessionService;
