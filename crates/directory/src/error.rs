//! Domain-level error types.

use std::collections::BTreeMap;

use thiserror::Error;

/// Per-field validation messages, keyed by form field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Errors produced by directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The requested venue, artist or show does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        entity: &'static str,
        id: i64,
    },

    /// The submitted form was rejected; nothing was written.
    #[error("invalid submission: {}", summarize(.0))]
    Validation(FieldErrors),

    /// The store failed; any transaction in flight was rolled back.
    #[error("database error: {0}")]
    Persistence(#[from] db::DbError),

    /// The row was found and its name read, but removing it failed.
    /// Nothing was deleted.
    #[error("deleting {entity} {name:?} failed: {source}")]
    DeleteFailed {
        entity: &'static str,
        name: String,
        #[source]
        source: db::DbError,
    },
}

impl DirectoryError {
    /// Map `DbError::NotFound` onto a typed not-found for `entity`.
    pub(crate) fn from_db(entity: &'static str, id: i64) -> impl FnOnce(db::DbError) -> Self {
        move |err| match err {
            db::DbError::NotFound => Self::NotFound { entity, id },
            other => Self::Persistence(other),
        }
    }

    /// Like [`from_db`](Self::from_db), but keeps the name read before the
    /// delete so the failure can still be reported by name.
    pub(crate) fn delete_failed(
        entity: &'static str,
        id: i64,
        name: String,
    ) -> impl FnOnce(db::DbError) -> Self {
        move |err| match err {
            db::DbError::NotFound => Self::NotFound { entity, id },
            source => Self::DeleteFailed { entity, name, source },
        }
    }
}

/// Render field errors the way the flash line shows them:
/// `name This field is required.; state Not a valid choice.`
pub fn summarize(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{field} {}", messages.join("|")))
        .collect::<Vec<_>>()
        .join("; ")
}
