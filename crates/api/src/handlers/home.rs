use axum::{extract::State, Json};
use directory::{service::home, views::HomePage};

use super::AppState;
use crate::page::{ApiError, Page};

pub async fn index(State(state): State<AppState>) -> Result<Json<Page<HomePage>>, ApiError> {
    let result = home::home_page(&state.pool).await;
    Page::or_notice(result, "home page").map(Json)
}
