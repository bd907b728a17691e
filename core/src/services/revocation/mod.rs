//! Revocation module for stateless session tokens
//!
//! This module provides:
//! - An in-memory registry of revoked tokens with lazy expiry
//! - A background sweeper that purges stale entries on a schedule

mod registry;
mod sweeper;


pub use registry::{RevocationRegistry, SweepReport};
pub use sweeper::{RevocationSweeper, SweeperHandle};
