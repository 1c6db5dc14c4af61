use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::session_view::SessionSummary;
use crate::repositories::session_repository::SessionRepositoryTrait;
use crate::services::projection::ProjectionService;
use crate::strategies::{RetrievalMode, SessionFilter, SessionListStrategy};

/// Lists one class's sessions that started within a time window, newest
/// first.
pub struct ByClassAndPeriodStrategy {
    sessions: Arc<dyn SessionRepositoryTrait>,
    projection: ProjectionService,
}

impl ByClassAndPeriodStrategy {
    pub fn new(sessions: Arc<dyn SessionRepositoryTrait>, projection: ProjectionService) -> Self {
        Self {
            sessions,
            projection,
        }
    }
}

#[async_trait]
impl SessionListStrategy for ByClassAndPeriodStrategy {
    fn mode(&self) -> RetrievalMode {
        RetrievalMode::ByClassAndPeriod
    }

    async fn execute(&self, filter: &SessionFilter) -> Result<Vec<SessionSummary>, AppError> {
        let class_id = filter
            .class_id
            .ok_or(AppError::MissingParameter("class_id"))?;
        let start = filter
            .period_start
            .ok_or(AppError::MissingParameter("period_start"))?;
        let end = filter
            .period_end
            .ok_or(AppError::MissingParameter("period_end"))?;
        // Rejected before the store sees the query.
        if start > end {
            return Err(AppError::InvalidRange);
        }
        let sessions = self
            .sessions
            .find_by_class_and_period(class_id, start, end)
            .await?;
        self.projection.summarize_all(&sessions).await
    }
}
