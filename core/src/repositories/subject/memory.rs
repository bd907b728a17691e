//! In-memory implementation of SubjectRepository for tests and local runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Subject;
use crate::errors::DomainError;

use super::trait_::SubjectRepository;

/// Subject repository backed by a map
#[derive(Clone)]
pub struct InMemorySubjectRepository {
    subjects: Arc<RwLock<HashMap<Uuid, Subject>>>,
}

impl InMemorySubjectRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            subjects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert or replace a subject
    pub async fn insert(&self, subject: Subject) {
        self.subjects.write().await.insert(subject.id, subject);
    }

    /// Remove a subject, returning it if present
    pub async fn remove(&self, id: Uuid) -> Option<Subject> {
        self.subjects.write().await.remove(&id)
    }
}

impl Default for InMemorySubjectRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubjectRepository for InMemorySubjectRepository {
    async fn find_subject(&self, id: Uuid) -> Result<Option<Subject>, DomainError> {
        let subjects = self.subjects.read().await;
        Ok(subjects.get(&id).cloned())
    }
}
