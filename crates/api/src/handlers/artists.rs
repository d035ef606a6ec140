use axum::{extract::State, Form, Json};
use chrono::Utc;
use directory::{
    service::artists,
    views::{ArtistDetail, EntityHit, SearchResults},
    ArtistForm, DirectoryError,
};
use tracing::error;

use super::{AppState, SearchForm};
use crate::{
    extract::{EntityId, JsonForm},
    flash,
    page::{ApiError, Page, Saved},
};

const KIND: &str = "Artist";

pub async fn list(State(state): State<AppState>) -> Result<Json<Page<Vec<EntityHit>>>, ApiError> {
    let result = artists::list(&state.pool, Utc::now()).await;
    Page::or_notice(result, "artists").map(Json)
}

pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Json<Page<SearchResults>>, ApiError> {
    match artists::search(&state.pool, &form.search_term, Utc::now()).await {
        Ok(results) => Ok(Json(Page::new(results))),
        Err(err) => {
            error!("artist search failed: {err}");
            let empty = SearchResults::new(form.search_term, Vec::new());
            Ok(Json(Page::with_flash(empty, flash::SOMETHING_WENT_WRONG)))
        }
    }
}

pub async fn detail(
    EntityId(id): EntityId,
    State(state): State<AppState>,
) -> Result<Json<Page<Option<ArtistDetail>>>, ApiError> {
    let result = artists::detail(&state.pool, id, Utc::now()).await.map(Some);
    Page::or_notice(result, "artist").map(Json)
}

pub async fn create_form() -> Json<Page<ArtistForm>> {
    Json(Page::new(ArtistForm::default()))
}

pub async fn create_submission(
    State(state): State<AppState>,
    JsonForm(form): JsonForm<ArtistForm>,
) -> Result<Json<Page<Option<Saved>>>, ApiError> {
    match artists::create(&state.pool, &form, Utc::now()).await {
        Ok(id) => Ok(Json(Page::with_flash(Some(Saved { id }), flash::created(KIND, &form.name)))),
        Err(DirectoryError::Validation(errors)) => Err(ApiError::Validation(errors)),
        Err(err) => {
            error!("creating artist failed: {err}");
            Ok(Json(Page::with_flash(None, flash::create_failed(KIND, &form.name))))
        }
    }
}

pub async fn edit_form(
    EntityId(id): EntityId,
    State(state): State<AppState>,
) -> Result<Json<Page<ArtistForm>>, ApiError> {
    match artists::edit_form(&state.pool, id).await {
        Ok(form) => Ok(Json(Page::new(form))),
        Err(DirectoryError::NotFound { .. }) => Err(ApiError::NotFound),
        Err(err) => {
            error!("loading artist {id} for edit failed: {err}");
            Err(ApiError::Internal)
        }
    }
}

pub async fn edit_submission(
    EntityId(id): EntityId,
    State(state): State<AppState>,
    JsonForm(form): JsonForm<ArtistForm>,
) -> Result<Json<Page<Option<Saved>>>, ApiError> {
    match artists::update(&state.pool, id, &form).await {
        Ok(()) => Ok(Json(Page::with_flash(Some(Saved { id }), flash::updated(KIND, &form.name)))),
        Err(DirectoryError::Validation(errors)) => Err(ApiError::Validation(errors)),
        Err(DirectoryError::NotFound { .. }) => Err(ApiError::NotFound),
        Err(err) => {
            error!("updating artist {id} failed: {err}");
            Ok(Json(Page::with_flash(None, flash::update_failed(KIND, &form.name))))
        }
    }
}

pub async fn delete(
    EntityId(id): EntityId,
    State(state): State<AppState>,
) -> Result<Json<Page<()>>, ApiError> {
    match artists::delete(&state.pool, id).await {
        Ok(name) => Ok(Json(Page::with_flash((), flash::deleted(KIND, &name)))),
        Err(DirectoryError::NotFound { .. }) => Err(ApiError::NotFound),
        Err(err) => {
            error!("deleting artist {id} failed: {err}");
            let name = match &err {
                DirectoryError::DeleteFailed { name, .. } => name.as_str(),
                _ => "",
            };
            Ok(Json(Page::with_flash((), flash::delete_failed(KIND, name))))
        }
    }
}
