//! Transaction management utilities for the Postgres stores.

use crate::error::AppError;
use sqlx::postgres::PgTransaction;
use sqlx::PgPool;

/// Begin a new database transaction.
///
/// Returns a transaction handle that can be used for multiple database
/// operations. On success, commit via [`commit_transaction`]; dropping the
/// handle rolls back.
pub async fn begin_transaction(db: &PgPool) -> Result<PgTransaction<'_>, AppError> {
    db.begin()
        .await
        .map_err(|e| AppError::Internal(e.into()))
}

/// Commit a transaction, making all changes within it visible.
pub async fn commit_transaction(tx: PgTransaction<'_>) -> Result<(), AppError> {
    tx.commit()
        .await
        .map_err(|e| AppError::Internal(e.into()))
}
