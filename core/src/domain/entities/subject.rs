//! Subjects that sessions are issued to.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subject record as held by the identity layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,
    pub role: String,
    pub email: String,
}

impl Subject {
    pub fn new(id: Uuid, role: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            role: role.into(),
            email: email.into(),
        }
    }
}

/// Authenticated caller produced by a successful session check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub subject_id: Uuid,
    pub role: String,
}
