//! Rate limiting module
//!
//! Token buckets keyed by arbitrary strings. Each bucket allows a fixed
//! number of operations per period and refills in whole periods only.

mod bucket;
mod limiter;
mod scope;


pub use limiter::RateLimiter;
pub use scope::ThrottleScope;
