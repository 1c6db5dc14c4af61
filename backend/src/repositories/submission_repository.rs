//! Submission store trait and its Postgres implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::submission::Submission;
use crate::types::SubmissionId;

/// Store for emotional submissions. Submissions are append-only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionRepositoryTrait: Send + Sync {
    async fn insert(&self, submission: &Submission) -> Result<(), AppError>;

    async fn find_by_id(&self, id: SubmissionId) -> Result<Submission, AppError>;

    /// All submissions, newest first. Feeds the dashboard.
    async fn find_all_desc(&self) -> Result<Vec<Submission>, AppError>;
}

const SELECT_COLUMNS: &str =
    "id, student_id, class_id, code_id, emotion, kind, recorded_at";

/// Postgres-backed submission store.
#[derive(Debug, Clone)]
pub struct PgSubmissionRepository {
    pool: PgPool,
}

impl PgSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionRepositoryTrait for PgSubmissionRepository {
    async fn insert(&self, submission: &Submission) -> Result<(), AppError> {
        let query = format!(
            "INSERT INTO submissions ({}) VALUES ($1, $2, $3, $4, $5, $6, $7)",
            SELECT_COLUMNS
        );
        sqlx::query(&query)
            .bind(submission.id)
            .bind(submission.student_id)
            .bind(submission.class_id)
            .bind(submission.code_id)
            .bind(submission.emotion)
            .bind(submission.kind)
            .bind(submission.recorded_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: SubmissionId) -> Result<Submission, AppError> {
        let query = format!("SELECT {} FROM submissions WHERE id = $1", SELECT_COLUMNS);
        let row = sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission".into()))?;
        Ok(row)
    }

    async fn find_all_desc(&self) -> Result<Vec<Submission>, AppError> {
        let query = format!(
            "SELECT {} FROM submissions ORDER BY recorded_at DESC",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, Submission>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_submission_repository_can_be_created() {
        let _mock = MockSubmissionRepositoryTrait::new();
    }
}
