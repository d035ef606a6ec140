//! Request handlers — one per (entity, action).
//!
//! Handlers take "now" once per request, call into `directory::service`, and
//! turn the outcome into a page. Store failures are logged and become flash
//! messages; only missing ids and unknown routes leave the normal page.

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

pub use crate::AppState;

use serde::Deserialize;

use crate::page::ApiError;

/// The search box on the venue and artist lists.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

/// Router fallback.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
