//! Subject repository trait defining read access to the identity layer.
//!
//! Session rotation re-reads the subject so that a new access token carries
//! the current role and email rather than whatever the old refresh token saw.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Subject;
use crate::errors::DomainError;

/// Repository trait for looking up session subjects
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use fc_core::repositories::SubjectRepository;
/// use fc_core::domain::entities::Subject;
/// use fc_core::errors::DomainError;
///
/// struct PgSubjectRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl SubjectRepository for PgSubjectRepository {
///     async fn find_subject(&self, id: Uuid) -> Result<Option<Subject>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// Find a subject by id
    ///
    /// # Returns
    /// * `Ok(Some(Subject))` - Subject found
    /// * `Ok(None)` - No subject with that id
    /// * `Err(DomainError)` - Storage or other error occurred
    async fn find_subject(&self, id: Uuid) -> Result<Option<Subject>, DomainError>;
}
