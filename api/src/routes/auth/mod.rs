//! Session route handlers
//!
//! - Token refresh (rotation of the refresh token)
//! - Logout (revocation of the presented tokens)
//! - Current session lookup

pub mod logout;
pub mod refresh;
pub mod session;

pub use logout::logout;
pub use refresh::refresh;
pub use session::current_session;
