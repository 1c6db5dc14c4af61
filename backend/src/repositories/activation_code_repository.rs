//! Activation code store trait and its Postgres implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::activation_code::ActivationCode;
use crate::types::ActivationCodeId;

/// Store for activation codes. Codes are immutable after issuance except
/// for deactivation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivationCodeRepositoryTrait: Send + Sync {
    async fn insert(&self, code: &ActivationCode) -> Result<(), AppError>;

    /// Resolves a code value to a usable code: active and strictly before
    /// its expiry at `now`.
    async fn find_usable(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ActivationCode>, AppError>;

    async fn deactivate(&self, id: ActivationCodeId) -> Result<(), AppError>;
}

const SELECT_COLUMNS: &str =
    "id, code, kind, issued_at, expires_at, professor_id, class_id, active";

/// Postgres-backed activation code store.
#[derive(Debug, Clone)]
pub struct PgActivationCodeRepository {
    pool: PgPool,
}

impl PgActivationCodeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivationCodeRepositoryTrait for PgActivationCodeRepository {
    async fn insert(&self, code: &ActivationCode) -> Result<(), AppError> {
        let query = format!(
            "INSERT INTO activation_codes ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            SELECT_COLUMNS
        );
        sqlx::query(&query)
            .bind(code.id)
            .bind(&code.code)
            .bind(code.kind)
            .bind(code.issued_at)
            .bind(code.expires_at)
            .bind(code.professor_id)
            .bind(code.class_id)
            .bind(code.active)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_usable(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ActivationCode>, AppError> {
        let query = format!(
            "SELECT {} FROM activation_codes \
             WHERE code = $1 AND active = TRUE AND expires_at > $2",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, ActivationCode>(&query)
            .bind(code)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn deactivate(&self, id: ActivationCodeId) -> Result<(), AppError> {
        sqlx::query("UPDATE activation_codes SET active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_activation_code_repository_can_be_created() {
        let _mock = MockActivationCodeRepositoryTrait::new();
    }
}
