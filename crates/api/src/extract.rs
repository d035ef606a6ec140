//! Extractors whose rejections render as pages instead of axum's plain-text
//! responses.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use directory::FieldErrors;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::page::ApiError;

/// The numeric `:id` segment. Anything that is not an integer is the 404
/// page, the same as an id that does not exist.
#[derive(Debug, Clone, Copy)]
pub struct EntityId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;
        Ok(Self(id))
    }
}

/// A JSON form body. A body that cannot be read as the form is rejected
/// with the 422 page, keyed under `body`.
#[derive(Debug)]
pub struct JsonForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(form)) => Ok(Self(form)),
            Err(rejection) => {
                let reason = rejection.body_text();
                warn!("unreadable form body: {reason}");
                let mut errors = FieldErrors::new();
                errors.insert("body".into(), vec![reason]);
                Err(ApiError::Validation(errors))
            }
        }
    }
}
