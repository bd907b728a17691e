//! Business services containing the session security logic.

pub mod rate_limit;
pub mod revocation;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use rate_limit::{RateLimiter, ThrottleScope};
pub use revocation::{RevocationRegistry, RevocationSweeper, SweepReport, SweeperHandle};
pub use session::{SessionAuthenticator, SessionService};
pub use token::{TokenCodec, TokenCodecConfig};
