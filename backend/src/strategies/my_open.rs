use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::session_view::SessionSummary;
use crate::repositories::session_repository::SessionRepositoryTrait;
use crate::services::projection::ProjectionService;
use crate::strategies::{RetrievalMode, SessionFilter, SessionListStrategy};

/// Lists the calling student's own open sessions across classes, newest
/// first.
pub struct MyOpenStrategy {
    sessions: Arc<dyn SessionRepositoryTrait>,
    projection: ProjectionService,
}

impl MyOpenStrategy {
    pub fn new(sessions: Arc<dyn SessionRepositoryTrait>, projection: ProjectionService) -> Self {
        Self {
            sessions,
            projection,
        }
    }
}

#[async_trait]
impl SessionListStrategy for MyOpenStrategy {
    fn mode(&self) -> RetrievalMode {
        RetrievalMode::MyOpen
    }

    async fn execute(&self, filter: &SessionFilter) -> Result<Vec<SessionSummary>, AppError> {
        let student_id = filter
            .student_id
            .ok_or(AppError::MissingParameter("student_id"))?;
        let sessions = self.sessions.find_open_by_student(student_id).await?;
        self.projection.summarize_all(&sessions).await
    }
}
