use axum::{extract::State, Form, Json};
use chrono::Utc;
use directory::{
    service::venues,
    views::{Area, SearchResults, VenueDetail},
    DirectoryError, VenueForm,
};
use tracing::error;

use super::{AppState, SearchForm};
use crate::{
    extract::{EntityId, JsonForm},
    flash,
    page::{ApiError, Page, Saved},
};

const KIND: &str = "Venue";

pub async fn list(State(state): State<AppState>) -> Result<Json<Page<Vec<Area>>>, ApiError> {
    let result = venues::list_areas(&state.pool, Utc::now()).await;
    Page::or_notice(result, "venues").map(Json)
}

pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Json<Page<SearchResults>>, ApiError> {
    match venues::search(&state.pool, &form.search_term, Utc::now()).await {
        Ok(results) => Ok(Json(Page::new(results))),
        Err(err) => {
            error!("venue search failed: {err}");
            let empty = SearchResults::new(form.search_term, Vec::new());
            Ok(Json(Page::with_flash(empty, flash::SOMETHING_WENT_WRONG)))
        }
    }
}

pub async fn detail(
    EntityId(id): EntityId,
    State(state): State<AppState>,
) -> Result<Json<Page<Option<VenueDetail>>>, ApiError> {
    let result = venues::detail(&state.pool, id, Utc::now()).await.map(Some);
    Page::or_notice(result, "venue").map(Json)
}

pub async fn create_form() -> Json<Page<VenueForm>> {
    Json(Page::new(VenueForm::default()))
}

pub async fn create_submission(
    State(state): State<AppState>,
    JsonForm(form): JsonForm<VenueForm>,
) -> Result<Json<Page<Option<Saved>>>, ApiError> {
    match venues::create(&state.pool, &form, Utc::now()).await {
        Ok(id) => Ok(Json(Page::with_flash(Some(Saved { id }), flash::created(KIND, &form.name)))),
        Err(DirectoryError::Validation(errors)) => Err(ApiError::Validation(errors)),
        Err(err) => {
            error!("creating venue failed: {err}");
            Ok(Json(Page::with_flash(None, flash::create_failed(KIND, &form.name))))
        }
    }
}

pub async fn edit_form(
    EntityId(id): EntityId,
    State(state): State<AppState>,
) -> Result<Json<Page<VenueForm>>, ApiError> {
    match venues::edit_form(&state.pool, id).await {
        Ok(form) => Ok(Json(Page::new(form))),
        Err(DirectoryError::NotFound { .. }) => Err(ApiError::NotFound),
        Err(err) => {
            error!("loading venue {id} for edit failed: {err}");
            Err(ApiError::Internal)
        }
    }
}

pub async fn edit_submission(
    EntityId(id): EntityId,
    State(state): State<AppState>,
    JsonForm(form): JsonForm<VenueForm>,
) -> Result<Json<Page<Option<Saved>>>, ApiError> {
    match venues::update(&state.pool, id, &form).await {
        Ok(()) => Ok(Json(Page::with_flash(Some(Saved { id }), flash::updated(KIND, &form.name)))),
        Err(DirectoryError::Validation(errors)) => Err(ApiError::Validation(errors)),
        Err(DirectoryError::NotFound { .. }) => Err(ApiError::NotFound),
        Err(err) => {
            error!("updating venue {id} failed: {err}");
            Ok(Json(Page::with_flash(None, flash::update_failed(KIND, &form.name))))
        }
    }
}

pub async fn delete(
    EntityId(id): EntityId,
    State(state): State<AppState>,
) -> Result<Json<Page<()>>, ApiError> {
    match venues::delete(&state.pool, id).await {
        Ok(name) => Ok(Json(Page::with_flash((), flash::deleted(KIND, &name)))),
        Err(DirectoryError::NotFound { .. }) => Err(ApiError::NotFound),
        Err(err) => {
            error!("deleting venue {id} failed: {err}");
            let name = match &err {
                DirectoryError::DeleteFailed { name, .. } => name.as_str(),
                _ => "",
            };
            Ok(Json(Page::with_flash((), flash::delete_failed(KIND, name))))
        }
    }
}
