//! Domain entities representing session credentials and their owners.

pub mod subject;
pub mod token;

// Re-export commonly used types
pub use subject::{Identity, Subject};
pub use token::{Claims, TokenClass, TokenPair, BEARER_TOKEN_TYPE};
