//! Scoped transaction handling for mutations.
//!
//! Callers open a transaction with [`begin`], run their writes against
//! `&mut *tx`, and hand the outcome to [`settle`]. Early returns via `?` drop
//! the transaction, which sqlx rolls back, and dropping it always returns the
//! connection to the pool.

use sqlx::{Sqlite, Transaction};
use tracing::warn;

use crate::{DbError, DbPool};

/// Open a transaction on a pooled connection.
pub async fn begin(pool: &DbPool) -> Result<Transaction<'static, Sqlite>, DbError> {
    Ok(pool.begin().await?)
}

/// Commit when `outcome` is `Ok`, roll back when it is `Err`.
///
/// A failed rollback is logged and the original error is returned, since it
/// is the one the caller needs to report.
pub async fn settle<T>(
    tx: Transaction<'_, Sqlite>,
    outcome: Result<T, DbError>,
) -> Result<T, DbError> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("rollback failed after {err}: {rollback_err}");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::memory_pool;

    async fn venue_count(pool: &crate::DbPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM venues")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn insert_raw(conn: &mut sqlx::SqliteConnection) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO venues (name, city, state, address, created_date)
             VALUES ('Raw', 'Austin', 'TX', '1 Main St', '2024-01-01T00:00:00+00:00')",
        )
        .execute(conn)
        .await?;
        Ok(())
    }

    #[tokio::test]
    async fn ok_outcome_is_committed() {
        let pool = memory_pool().await.unwrap();
        let mut tx = begin(&pool).await.unwrap();
        let outcome = insert_raw(&mut tx).await;
        settle(tx, outcome).await.unwrap();
        assert_eq!(venue_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn err_outcome_is_rolled_back() {
        let pool = memory_pool().await.unwrap();
        let mut tx = begin(&pool).await.unwrap();
        insert_raw(&mut tx).await.unwrap();
        let result = settle::<()>(tx, Err(DbError::NotFound)).await;
        assert!(matches!(result, Err(DbError::NotFound)));
        assert_eq!(venue_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn dropped_transaction_releases_the_connection() {
        let pool = memory_pool().await.unwrap();
        {
            let mut tx = begin(&pool).await.unwrap();
            insert_raw(&mut tx).await.unwrap();
        }
        // The single pooled connection must be free again, and the write gone.
        assert_eq!(venue_count(&pool).await, 0);
    }
}
