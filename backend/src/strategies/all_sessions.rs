use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::session_view::SessionSummary;
use crate::repositories::session_repository::SessionRepositoryTrait;
use crate::services::projection::ProjectionService;
use crate::strategies::{RetrievalMode, SessionFilter, SessionListStrategy};

/// Lists every session in the system, newest first. Professor-only in the
/// HTTP layer; the core does not re-check the role.
pub struct AllSessionsStrategy {
    sessions: Arc<dyn SessionRepositoryTrait>,
    projection: ProjectionService,
}

impl AllSessionsStrategy {
    pub fn new(sessions: Arc<dyn SessionRepositoryTrait>, projection: ProjectionService) -> Self {
        Self {
            sessions,
            projection,
        }
    }
}

#[async_trait]
impl SessionListStrategy for AllSessionsStrategy {
    fn mode(&self) -> RetrievalMode {
        RetrievalMode::All
    }

    async fn execute(&self, _filter: &SessionFilter) -> Result<Vec<SessionSummary>, AppError> {
        let sessions = self.sessions.find_all().await?;
        self.projection.summarize_all(&sessions).await
    }
}
