//! Tests for the in-memory subject repository

use uuid::Uuid;

use crate::domain::entities::Subject;
use crate::repositories::subject::{InMemorySubjectRepository, SubjectRepository};

#[tokio::test]
async fn test_find_inserted_subject() {
    let repo = InMemorySubjectRepository::new();
    let subject = Subject::new(Uuid::new_v4(), "admin", "ada@example.com");
    repo.insert(subject.clone()).await;

    let found = repo.find_subject(subject.id).await.unwrap();
    assert_eq!(found, Some(subject));
}

#[tokio::test]
async fn test_missing_subject_is_none() {
    let repo = InMemorySubjectRepository::new();
    assert!(repo.find_subject(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_insert_replaces_and_remove_deletes() {
    let repo = InMemorySubjectRepository::new();
    let id = Uuid::new_v4();
    repo.insert(Subject::new(id, "user", "old@example.com")).await;
    repo.insert(Subject::new(id, "admin", "new@example.com")).await;

    let found = repo.find_subject(id).await.unwrap().unwrap();
    assert_eq!(found.role, "admin");

    assert!(repo.remove(id).await.is_some());
    assert!(repo.find_subject(id).await.unwrap().is_none());
}
