//! Venue pages and mutations.

use chrono::{DateTime, Utc};
use db::{
    repository::{genres, shows, venues},
    transaction::{begin, settle},
    DbError, DbPool,
};
use sqlx::SqliteConnection;
use tracing::{info, instrument};

use crate::{
    forms::{VenueForm, VenueSubmission},
    views::{group_areas, Area, SearchResults, VenueDetail},
    DirectoryError,
};

const ENTITY: &str = "venue";

/// Every venue grouped by (city, state), with upcoming-show counts.
#[instrument(skip(pool))]
pub async fn list_areas(pool: &DbPool, now: DateTime<Utc>) -> Result<Vec<Area>, DirectoryError> {
    let rows = venues::list_with_upcoming(pool, now).await?;
    Ok(group_areas(rows))
}

/// Venues whose name contains `term`, ignoring case.
#[instrument(skip(pool))]
pub async fn search(
    pool: &DbPool,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults, DirectoryError> {
    let rows = venues::search(pool, term, now).await?;
    Ok(SearchResults::new(term, rows))
}

/// The venue page with its genres and past/upcoming shows.
#[instrument(skip(pool))]
pub async fn detail(
    pool: &DbPool,
    id: i64,
    now: DateTime<Utc>,
) -> Result<VenueDetail, DirectoryError> {
    let row = venues::get(pool, id)
        .await
        .map_err(DirectoryError::from_db(ENTITY, id))?;
    let genre_names = genres::for_venue(pool, id).await?;
    let venue_shows = shows::for_venue(pool, id).await?;
    Ok(VenueDetail::assemble(row, genre_names, venue_shows, now))
}

/// The edit form prefilled with the venue's current values.
#[instrument(skip(pool))]
pub async fn edit_form(pool: &DbPool, id: i64) -> Result<VenueForm, DirectoryError> {
    let row = venues::get(pool, id)
        .await
        .map_err(DirectoryError::from_db(ENTITY, id))?;
    let genre_names = genres::for_venue(pool, id).await?;
    Ok(VenueForm::from_row(&row, genre_names))
}

/// Validate and insert a venue with its genres; returns the new id.
#[instrument(skip(pool, form), fields(name = %form.name))]
pub async fn create(
    pool: &DbPool,
    form: &VenueForm,
    now: DateTime<Utc>,
) -> Result<i64, DirectoryError> {
    let submission = form.validate().map_err(DirectoryError::Validation)?;

    let mut tx = begin(pool).await?;
    let outcome = insert_with_genres(&mut tx, &submission, now).await;
    let id = settle(tx, outcome).await?;

    info!(id, "venue created");
    Ok(id)
}

/// Validate and overwrite every field of a venue, replacing its genres.
#[instrument(skip(pool, form), fields(name = %form.name))]
pub async fn update(pool: &DbPool, id: i64, form: &VenueForm) -> Result<(), DirectoryError> {
    let submission = form.validate().map_err(DirectoryError::Validation)?;

    let mut tx = begin(pool).await?;
    let outcome = overwrite_with_genres(&mut tx, id, &submission).await;
    settle(tx, outcome)
        .await
        .map_err(DirectoryError::from_db(ENTITY, id))?;

    info!(id, "venue updated");
    Ok(())
}

/// Delete a venue and, by cascade, its shows; returns the deleted name.
///
/// The name is read first, so a delete that fails still reports it.
#[instrument(skip(pool))]
pub async fn delete(pool: &DbPool, id: i64) -> Result<String, DirectoryError> {
    let mut tx = begin(pool).await?;
    let name = venues::name_of(&mut tx, id)
        .await
        .map_err(DirectoryError::from_db(ENTITY, id))?;
    let outcome = venues::delete(&mut tx, id).await;
    settle(tx, outcome)
        .await
        .map_err(DirectoryError::delete_failed(ENTITY, id, name.clone()))?;

    info!(id, %name, "venue deleted");
    Ok(name)
}

async fn insert_with_genres(
    conn: &mut SqliteConnection,
    submission: &VenueSubmission,
    now: DateTime<Utc>,
) -> Result<i64, DbError> {
    let id = venues::insert(conn, &submission.fields, now).await?;
    genres::replace_for_venue(conn, id, &submission.genres).await?;
    Ok(id)
}

async fn overwrite_with_genres(
    conn: &mut SqliteConnection,
    id: i64,
    submission: &VenueSubmission,
) -> Result<(), DbError> {
    venues::update(conn, id, &submission.fields).await?;
    genres::replace_for_venue(conn, id, &submission.genres).await
}
