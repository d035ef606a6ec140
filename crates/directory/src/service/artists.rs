//! Artist pages and mutations.

use chrono::{DateTime, Utc};
use db::{
    repository::{artists, genres, shows},
    transaction::{begin, settle},
    DbError, DbPool,
};
use sqlx::SqliteConnection;
use tracing::{info, instrument};

use crate::{
    forms::{ArtistForm, ArtistSubmission},
    views::{ArtistDetail, EntityHit, SearchResults},
    DirectoryError,
};

const ENTITY: &str = "artist";

/// Every artist by name, with upcoming-show counts.
#[instrument(skip(pool))]
pub async fn list(pool: &DbPool, now: DateTime<Utc>) -> Result<Vec<EntityHit>, DirectoryError> {
    let rows = artists::list_with_upcoming(pool, now).await?;
    Ok(rows.into_iter().map(EntityHit::from).collect())
}

/// Artists whose name contains `term`, ignoring case.
#[instrument(skip(pool))]
pub async fn search(
    pool: &DbPool,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults, DirectoryError> {
    let rows = artists::search(pool, term, now).await?;
    Ok(SearchResults::new(term, rows))
}

/// The artist page with its genres and past/upcoming shows.
#[instrument(skip(pool))]
pub async fn detail(
    pool: &DbPool,
    id: i64,
    now: DateTime<Utc>,
) -> Result<ArtistDetail, DirectoryError> {
    let row = artists::get(pool, id)
        .await
        .map_err(DirectoryError::from_db(ENTITY, id))?;
    let genre_names = genres::for_artist(pool, id).await?;
    let artist_shows = shows::for_artist(pool, id).await?;
    Ok(ArtistDetail::assemble(row, genre_names, artist_shows, now))
}

/// The edit form prefilled with the artist's current values.
#[instrument(skip(pool))]
pub async fn edit_form(pool: &DbPool, id: i64) -> Result<ArtistForm, DirectoryError> {
    let row = artists::get(pool, id)
        .await
        .map_err(DirectoryError::from_db(ENTITY, id))?;
    let genre_names = genres::for_artist(pool, id).await?;
    Ok(ArtistForm::from_row(&row, genre_names))
}

/// Validate and insert an artist with its genres; returns the new id.
#[instrument(skip(pool, form), fields(name = %form.name))]
pub async fn create(
    pool: &DbPool,
    form: &ArtistForm,
    now: DateTime<Utc>,
) -> Result<i64, DirectoryError> {
    let submission = form.validate().map_err(DirectoryError::Validation)?;

    let mut tx = begin(pool).await?;
    let outcome = insert_with_genres(&mut tx, &submission, now).await;
    let id = settle(tx, outcome).await?;

    info!(id, "artist created");
    Ok(id)
}

/// Validate and overwrite every field of an artist, replacing its genres.
#[instrument(skip(pool, form), fields(name = %form.name))]
pub async fn update(pool: &DbPool, id: i64, form: &ArtistForm) -> Result<(), DirectoryError> {
    let submission = form.validate().map_err(DirectoryError::Validation)?;

    let mut tx = begin(pool).await?;
    let outcome = overwrite_with_genres(&mut tx, id, &submission).await;
    settle(tx, outcome)
        .await
        .map_err(DirectoryError::from_db(ENTITY, id))?;

    info!(id, "artist updated");
    Ok(())
}

/// Delete an artist and, by cascade, its shows; returns the deleted name.
///
/// The name is read first, so a delete that fails still reports it.
#[instrument(skip(pool))]
pub async fn delete(pool: &DbPool, id: i64) -> Result<String, DirectoryError> {
    let mut tx = begin(pool).await?;
    let name = artists::name_of(&mut tx, id)
        .await
        .map_err(DirectoryError::from_db(ENTITY, id))?;
    let outcome = artists::delete(&mut tx, id).await;
    settle(tx, outcome)
        .await
        .map_err(DirectoryError::delete_failed(ENTITY, id, name.clone()))?;

    info!(id, %name, "artist deleted");
    Ok(name)
}

async fn insert_with_genres(
    conn: &mut SqliteConnection,
    submission: &ArtistSubmission,
    now: DateTime<Utc>,
) -> Result<i64, DbError> {
    let id = artists::insert(conn, &submission.fields, now).await?;
    genres::replace_for_artist(conn, id, &submission.genres).await?;
    Ok(id)
}

async fn overwrite_with_genres(
    conn: &mut SqliteConnection,
    id: i64,
    submission: &ArtistSubmission,
) -> Result<(), DbError> {
    artists::update(conn, id, &submission.fields).await?;
    genres::replace_for_artist(conn, id, &submission.genres).await
}
