//! Practice session store trait and its Postgres implementation.
//!
//! The trait is designed to be mockable using mockall for testing. Use
//! `MockSessionRepositoryTrait` in tests to mock the behavior.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::practice_session::PracticeSession;
use crate::models::submission::Submission;
use crate::repositories::transaction::{begin_transaction, commit_transaction};
use crate::types::{ClassId, SessionId, StudentId};

/// Store for practice sessions.
///
/// Every list query returns sessions ordered by `started_at` descending;
/// the query strategies rely on that contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepositoryTrait: Send + Sync {
    /// The most recent open session for the (student, class) pair, if any.
    async fn find_open_for(
        &self,
        student_id: StudentId,
        class_id: ClassId,
    ) -> Result<Option<PracticeSession>, AppError>;

    /// Atomically persists one lifecycle transition: the check-out
    /// submission synthesized by an auto-close (an insert), the session
    /// being closed (an update) and/or the session being opened (an
    /// insert). Partial application must never be observable; a failed
    /// transition leaves no synthetic submission behind.
    async fn persist_transition<'a>(
        &self,
        synthetic_check_out: Option<&'a Submission>,
        closed: Option<&'a PracticeSession>,
        opened: Option<&'a PracticeSession>,
    ) -> Result<(), AppError>;

    async fn find_by_id(&self, id: SessionId) -> Result<PracticeSession, AppError>;

    async fn find_all(&self) -> Result<Vec<PracticeSession>, AppError>;

    async fn find_by_class(&self, class_id: ClassId) -> Result<Vec<PracticeSession>, AppError>;

    async fn find_open_by_class(&self, class_id: ClassId)
        -> Result<Vec<PracticeSession>, AppError>;

    async fn find_open_by_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<PracticeSession>, AppError>;

    async fn find_by_class_and_period(
        &self,
        class_id: ClassId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PracticeSession>, AppError>;
}

const SELECT_COLUMNS: &str = "id, student_id, class_id, check_in_id, check_out_id, \
     started_at, ended_at, duration_seconds, start_emotion, end_emotion";

/// Postgres-backed session store.
#[derive(Debug, Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepositoryTrait for PgSessionRepository {
    async fn find_open_for(
        &self,
        student_id: StudentId,
        class_id: ClassId,
    ) -> Result<Option<PracticeSession>, AppError> {
        let query = format!(
            "SELECT {} FROM practice_sessions \
             WHERE student_id = $1 AND class_id = $2 AND check_out_id IS NULL \
             ORDER BY started_at DESC LIMIT 1",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, PracticeSession>(&query)
            .bind(student_id)
            .bind(class_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn persist_transition<'a>(
        &self,
        synthetic_check_out: Option<&'a Submission>,
        closed: Option<&'a PracticeSession>,
        opened: Option<&'a PracticeSession>,
    ) -> Result<(), AppError> {
        let mut tx = begin_transaction(&self.pool).await?;

        if let Some(submission) = synthetic_check_out {
            sqlx::query(
                "INSERT INTO submissions \
                 (id, student_id, class_id, code_id, emotion, kind, recorded_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(submission.id)
            .bind(submission.student_id)
            .bind(submission.class_id)
            .bind(submission.code_id)
            .bind(submission.emotion)
            .bind(submission.kind)
            .bind(submission.recorded_at)
            .execute(tx.as_mut())
            .await?;
        }

        if let Some(session) = closed {
            sqlx::query(
                "UPDATE practice_sessions \
                 SET check_out_id = $2, ended_at = $3, duration_seconds = $4, end_emotion = $5 \
                 WHERE id = $1",
            )
            .bind(session.id)
            .bind(session.check_out_id)
            .bind(session.ended_at)
            .bind(session.duration_seconds)
            .bind(session.end_emotion)
            .execute(tx.as_mut())
            .await?;
        }

        if let Some(session) = opened {
            let query = format!(
                "INSERT INTO practice_sessions ({}) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
                SELECT_COLUMNS
            );
            sqlx::query(&query)
                .bind(session.id)
                .bind(session.student_id)
                .bind(session.class_id)
                .bind(session.check_in_id)
                .bind(session.check_out_id)
                .bind(session.started_at)
                .bind(session.ended_at)
                .bind(session.duration_seconds)
                .bind(session.start_emotion)
                .bind(session.end_emotion)
                .execute(tx.as_mut())
                .await?;
        }

        commit_transaction(tx).await
    }

    async fn find_by_id(&self, id: SessionId) -> Result<PracticeSession, AppError> {
        let query = format!(
            "SELECT {} FROM practice_sessions WHERE id = $1",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, PracticeSession>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Practice session".into()))?;
        Ok(row)
    }

    async fn find_all(&self) -> Result<Vec<PracticeSession>, AppError> {
        let query = format!(
            "SELECT {} FROM practice_sessions ORDER BY started_at DESC",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, PracticeSession>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_class(&self, class_id: ClassId) -> Result<Vec<PracticeSession>, AppError> {
        let query = format!(
            "SELECT {} FROM practice_sessions WHERE class_id = $1 ORDER BY started_at DESC",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, PracticeSession>(&query)
            .bind(class_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_open_by_class(
        &self,
        class_id: ClassId,
    ) -> Result<Vec<PracticeSession>, AppError> {
        let query = format!(
            "SELECT {} FROM practice_sessions \
             WHERE class_id = $1 AND check_out_id IS NULL ORDER BY started_at DESC",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, PracticeSession>(&query)
            .bind(class_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_open_by_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<PracticeSession>, AppError> {
        let query = format!(
            "SELECT {} FROM practice_sessions \
             WHERE student_id = $1 AND check_out_id IS NULL ORDER BY started_at DESC",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, PracticeSession>(&query)
            .bind(student_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_class_and_period(
        &self,
        class_id: ClassId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PracticeSession>, AppError> {
        let query = format!(
            "SELECT {} FROM practice_sessions \
             WHERE class_id = $1 AND started_at BETWEEN $2 AND $3 ORDER BY started_at DESC",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, PracticeSession>(&query)
            .bind(class_id)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
