use axum::{extract::State, Json};
use chrono::Utc;
use directory::{service::shows, views::ShowListing, DirectoryError, ShowForm};
use tracing::error;

use super::AppState;
use crate::{
    extract::JsonForm,
    flash,
    page::{ApiError, Page, Saved},
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Page<Vec<ShowListing>>>, ApiError> {
    let result = shows::list(&state.pool).await;
    Page::or_notice(result, "shows").map(Json)
}

pub async fn create_form() -> Json<Page<ShowForm>> {
    Json(Page::new(ShowForm::blank(Utc::now())))
}

pub async fn create_submission(
    State(state): State<AppState>,
    JsonForm(form): JsonForm<ShowForm>,
) -> Result<Json<Page<Option<Saved>>>, ApiError> {
    match shows::create(&state.pool, &form).await {
        Ok(show) => Ok(Json(Page::with_flash(Some(Saved { id: show.id }), flash::SHOW_CREATED))),
        Err(DirectoryError::Validation(errors)) => Err(ApiError::Validation(errors)),
        Err(err) => {
            error!("creating show failed: {err}");
            Ok(Json(Page::with_flash(None, flash::SHOW_CREATE_FAILED)))
        }
    }
}
