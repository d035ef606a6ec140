//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// The id named by a get, update or delete matched no row.
    #[error("row not found")]
    NotFound,

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl DbError {
    /// True when the store refused a write on a foreign key, unique or
    /// not-null constraint, e.g. a show naming an artist that does not exist.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Self::Sqlx(sqlx::Error::Database(db_err)) => !matches!(
                db_err.kind(),
                sqlx::error::ErrorKind::Other
            ),
            _ => false,
        }
    }
}
