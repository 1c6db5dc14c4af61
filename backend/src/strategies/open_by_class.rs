use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::session_view::SessionSummary;
use crate::repositories::session_repository::SessionRepositoryTrait;
use crate::services::projection::ProjectionService;
use crate::strategies::{RetrievalMode, SessionFilter, SessionListStrategy};

/// Lists the currently open sessions of one class, newest first. This is
/// the professor's live view of who is still practicing.
pub struct OpenByClassStrategy {
    sessions: Arc<dyn SessionRepositoryTrait>,
    projection: ProjectionService,
}

impl OpenByClassStrategy {
    pub fn new(sessions: Arc<dyn SessionRepositoryTrait>, projection: ProjectionService) -> Self {
        Self {
            sessions,
            projection,
        }
    }
}

#[async_trait]
impl SessionListStrategy for OpenByClassStrategy {
    fn mode(&self) -> RetrievalMode {
        RetrievalMode::OpenByClass
    }

    async fn execute(&self, filter: &SessionFilter) -> Result<Vec<SessionSummary>, AppError> {
        let class_id = filter
            .class_id
            .ok_or(AppError::MissingParameter("class_id"))?;
        let sessions = self.sessions.find_open_by_class(class_id).await?;
        self.projection.summarize_all(&sessions).await
    }
}
