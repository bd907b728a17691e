pub mod auth;
pub mod throttle;

pub use auth::{AuthContext, AuthRejection, SessionAuth};
pub use throttle::Throttle;
