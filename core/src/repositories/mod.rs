pub mod subject;

pub use subject::{InMemorySubjectRepository, SubjectRepository};
