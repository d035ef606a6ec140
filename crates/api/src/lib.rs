//! `api` crate — the HTTP surface of the booking directory.
//!
//! Exposes:
//!   GET    /
//!   GET    /venues                 POST /venues/search
//!   GET    /venues/:id             DELETE /venues/:id
//!   GET    /venues/create          POST /venues/create
//!   GET    /venues/:id/edit        POST /venues/:id/edit
//!   (the same six routes under /artists)
//!   GET    /shows
//!   GET    /shows/create           POST /shows/create
//!   GET    /health
//!
//! Every page is a JSON [`page::Page`] carrying the flash messages for the
//! request alongside the page data.

use axum::{
    routing::{get, post},
    Router,
};
use db::DbPool;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::info;

pub mod extract;
pub mod flash;
pub mod handlers;
pub mod page;

/// State shared by every handler: just the pool. Connections are checked out
/// per operation and returned when the operation finishes.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Build the application router with tracing, panic and 404 handling.
pub fn build_router(state: AppState) -> Router {
    use handlers::{artists, health, home, shows, venues};

    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health::health))
        // venues
        .route("/venues", get(venues::list))
        .route("/venues/search", post(venues::search))
        .route("/venues/create", get(venues::create_form).post(venues::create_submission))
        .route("/venues/:id", get(venues::detail).delete(venues::delete))
        .route("/venues/:id/edit", get(venues::edit_form).post(venues::edit_submission))
        // artists
        .route("/artists", get(artists::list))
        .route("/artists/search", post(artists::search))
        .route("/artists/create", get(artists::create_form).post(artists::create_submission))
        .route("/artists/:id", get(artists::detail).delete(artists::delete))
        .route("/artists/:id/edit", get(artists::edit_form).post(artists::edit_submission))
        // shows
        .route("/shows", get(shows::list))
        .route("/shows/create", get(shows::create_form).post(shows::create_submission))
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(page::panic_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `bind` and serve until Ctrl-C.
pub async fn serve(bind: &str, pool: DbPool) -> std::io::Result<()> {
    let app = build_router(AppState::new(pool));
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
