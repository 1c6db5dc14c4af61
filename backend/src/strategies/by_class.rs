use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::session_view::SessionSummary;
use crate::repositories::session_repository::SessionRepositoryTrait;
use crate::services::projection::ProjectionService;
use crate::strategies::{RetrievalMode, SessionFilter, SessionListStrategy};

/// Lists every session of one class, newest first.
pub struct ByClassStrategy {
    sessions: Arc<dyn SessionRepositoryTrait>,
    projection: ProjectionService,
}

impl ByClassStrategy {
    pub fn new(sessions: Arc<dyn SessionRepositoryTrait>, projection: ProjectionService) -> Self {
        Self {
            sessions,
            projection,
        }
    }
}

#[async_trait]
impl SessionListStrategy for ByClassStrategy {
    fn mode(&self) -> RetrievalMode {
        RetrievalMode::ByClass
    }

    async fn execute(&self, filter: &SessionFilter) -> Result<Vec<SessionSummary>, AppError> {
        let class_id = filter
            .class_id
            .ok_or(AppError::MissingParameter("class_id"))?;
        let sessions = self.sessions.find_by_class(class_id).await?;
        self.projection.summarize_all(&sessions).await
    }
}
