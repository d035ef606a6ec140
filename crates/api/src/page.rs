//! The page envelope, error pages, and their HTTP mapping.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use directory::{error::summarize, DirectoryError, FieldErrors};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::flash;

/// A rendered page: flash messages for this request plus the page data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub flashes: Vec<String>,
    pub data: T,
}

impl<T> Page<T> {
    pub fn new(data: T) -> Self {
        Self { flashes: Vec::new(), data }
    }

    pub fn with_flash(data: T, message: impl Into<String>) -> Self {
        Self { flashes: vec![message.into()], data }
    }
}

impl<T: Default> Page<T> {
    /// Render `result`, or an empty page with the generic notice when loading
    /// failed. `NotFound` is left to the caller.
    pub fn or_notice(result: Result<T, DirectoryError>, what: &str) -> Result<Self, ApiError> {
        match result {
            Ok(data) => Ok(Self::new(data)),
            Err(DirectoryError::NotFound { .. }) => Err(ApiError::NotFound),
            Err(err) => {
                error!("loading {what} failed: {err}");
                Ok(Self::with_flash(T::default(), flash::SOMETHING_WENT_WRONG))
            }
        }
    }
}

/// Body of the 404 and 500 pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPage {
    pub status: u16,
    pub error: String,
}

/// Data of a rejected submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rejected {
    pub errors: FieldErrors,
}

/// Data of a successful create or edit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Saved {
    pub id: i64,
}

/// Outcomes that replace the normal page.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing id or unknown route: the 404 page.
    #[error("not found")]
    NotFound,
    /// Field-level form errors, rendered with status 422; nothing was stored.
    #[error("invalid submission: {}", summarize(.0))]
    Validation(FieldErrors),
    /// Anything else: the 500 page.
    #[error("internal error")]
    Internal,
}

impl ApiError {
    fn error_page(status: StatusCode) -> Response {
        let body = ErrorPage {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => Self::error_page(StatusCode::NOT_FOUND),
            Self::Internal => Self::error_page(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Validation(errors) => {
                let message = flash::invalid(&errors);
                let page = Page::with_flash(Rejected { errors }, message);
                (StatusCode::UNPROCESSABLE_ENTITY, Json(page)).into_response()
            }
        }
    }
}

/// Render a handler panic as the 500 page.
pub fn panic_page(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic"
    };
    error!("handler panicked: {message}");
    ApiError::Internal.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence_errors_become_an_empty_page_with_notice() {
        let result: Result<Vec<i64>, DirectoryError> =
            Err(DirectoryError::Persistence(db::DbError::NotFound));
        let page = Page::or_notice(result, "test").unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.flashes, vec![flash::SOMETHING_WENT_WRONG]);
    }

    #[test]
    fn not_found_is_not_swallowed() {
        let result: Result<Vec<i64>, DirectoryError> =
            Err(DirectoryError::NotFound { entity: "venue", id: 1 });
        assert!(matches!(Page::or_notice(result, "test"), Err(ApiError::NotFound)));
    }

    #[test]
    fn validation_maps_to_422() {
        let mut errors = FieldErrors::new();
        errors.insert("name".into(), vec!["This field is required.".into()]);
        let response = ApiError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn panic_page_is_a_500() {
        let response = panic_page(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
