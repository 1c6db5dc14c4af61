//! Projection of practice sessions into display views.
//!
//! Pure mapping apart from name resolution, which goes through the
//! directory store and fails with `NotFound` for dangling references.

use std::sync::Arc;

use crate::error::AppError;
use crate::models::practice_session::PracticeSession;
use crate::models::session_view::{SessionDetail, SessionSummary};
use crate::repositories::directory::DirectoryRepositoryTrait;

#[derive(Clone)]
pub struct ProjectionService {
    directory: Arc<dyn DirectoryRepositoryTrait>,
}

impl ProjectionService {
    pub fn new(directory: Arc<dyn DirectoryRepositoryTrait>) -> Self {
        Self { directory }
    }

    async fn resolve_names(
        &self,
        session: &PracticeSession,
    ) -> Result<(String, String, String), AppError> {
        let student = self.directory.student(session.student_id).await?;
        let class = self.directory.class(session.class_id).await?;
        let professor = self.directory.professor(class.professor_id).await?;
        Ok((student.name, class.name, professor.name))
    }

    pub async fn summarize(&self, session: &PracticeSession) -> Result<SessionSummary, AppError> {
        let (student_name, class_name, professor_name) = self.resolve_names(session).await?;
        Ok(SessionSummary::project(
            session,
            student_name,
            class_name,
            professor_name,
        ))
    }

    /// Projects an already-ordered batch, preserving its order.
    pub async fn summarize_all(
        &self,
        sessions: &[PracticeSession],
    ) -> Result<Vec<SessionSummary>, AppError> {
        let mut summaries = Vec::with_capacity(sessions.len());
        for session in sessions {
            summaries.push(self.summarize(session).await?);
        }
        Ok(summaries)
    }

    pub async fn detail(&self, session: &PracticeSession) -> Result<SessionDetail, AppError> {
        let (student_name, class_name, professor_name) = self.resolve_names(session).await?;
        Ok(SessionDetail::project(
            session,
            student_name,
            class_name,
            professor_name,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::class_group::ClassGroup;
    use crate::models::submission::{Submission, SubmissionKind};
    use crate::models::user::{Professor, Student};
    use crate::repositories::memory::MemoryDirectory;
    use crate::types::ActivationCodeId;
    use chrono::Utc;

    async fn directory_with_parties() -> (Arc<MemoryDirectory>, Student, ClassGroup) {
        let directory = Arc::new(MemoryDirectory::new());
        let professor = Professor::new("prof-1".into(), "Prof. Silva".into(), "prof@x.com".into());
        let student = Student::new("stud-1".into(), "Ana".into(), "ana@x.com".into());
        let class = ClassGroup::new("Turma A".into(), professor.id);
        directory.insert_professor(professor);
        directory.insert_student(student.clone());
        directory.insert_class(&class).await.unwrap();
        (directory, student, class)
    }

    #[tokio::test]
    async fn summarize_resolves_party_names() {
        let (directory, student, class) = directory_with_parties().await;
        let check_in = Submission::new(
            student.id,
            class.id,
            ActivationCodeId::new(),
            4,
            SubmissionKind::CheckIn,
            Utc::now(),
        );
        let session = PracticeSession::open(&check_in);

        let projection = ProjectionService::new(directory);
        let summary = projection.summarize(&session).await.unwrap();
        assert_eq!(summary.student_name, "Ana");
        assert_eq!(summary.class_name, "Turma A");
        assert_eq!(summary.professor_name, "Prof. Silva");
        assert_eq!(summary.status, "OPEN");
    }

    #[tokio::test]
    async fn summarize_fails_on_dangling_student() {
        let (directory, _student, class) = directory_with_parties().await;
        let check_in = Submission::new(
            crate::types::StudentId::new(),
            class.id,
            ActivationCodeId::new(),
            4,
            SubmissionKind::CheckIn,
            Utc::now(),
        );
        let session = PracticeSession::open(&check_in);

        let projection = ProjectionService::new(directory);
        let err = projection.summarize(&session).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
