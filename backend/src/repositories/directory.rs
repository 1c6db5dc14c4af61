//! Directory of students, professors and classes.
//!
//! Identity provisioning (the login flow's get-or-create of students and
//! professors) belongs to the excluded identity layer; the core consumes
//! resolved records through this trait and fails with `NotFound` for
//! unknown references.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::class_group::ClassGroup;
use crate::models::user::{Professor, Student};
use crate::types::{ClassId, ProfessorId, StudentId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryRepositoryTrait: Send + Sync {
    async fn student(&self, id: StudentId) -> Result<Student, AppError>;

    async fn student_by_google_id(&self, google_id: &str) -> Result<Student, AppError>;

    async fn professor(&self, id: ProfessorId) -> Result<Professor, AppError>;

    async fn professor_by_google_id(&self, google_id: &str) -> Result<Professor, AppError>;

    async fn class(&self, id: ClassId) -> Result<ClassGroup, AppError>;

    /// A professor's class by name, if it exists. The code issuer uses this
    /// for its get-or-create step.
    async fn class_by_name(
        &self,
        professor_id: ProfessorId,
        name: &str,
    ) -> Result<Option<ClassGroup>, AppError>;

    async fn insert_class(&self, class: &ClassGroup) -> Result<(), AppError>;

    async fn classes_by_professor(
        &self,
        professor_id: ProfessorId,
    ) -> Result<Vec<ClassGroup>, AppError>;
}
