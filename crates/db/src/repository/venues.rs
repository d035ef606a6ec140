//! Venue CRUD and query operations.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    DbError,
    models::{LocatedVenueRow, UpcomingCountRow, VenueFields, VenueRow},
};

use super::name_matches;

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, image_link, facebook_link, \
     website, seeking_talent, seeking_description, created_date";

/// Fetch a single venue by its primary key.
pub async fn get(pool: &SqlitePool, id: i64) -> Result<VenueRow, DbError> {
    let row = sqlx::query_as::<_, VenueRow>(&format!(
        "SELECT {VENUE_COLUMNS} FROM venues WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row)
}

/// Return the `limit` most recently created venues (newest first).
pub async fn list_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<VenueRow>, DbError> {
    let rows = sqlx::query_as::<_, VenueRow>(&format!(
        "SELECT {VENUE_COLUMNS} FROM venues ORDER BY created_date DESC, id DESC LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Return every venue with its location and count of shows starting
/// strictly after `now`, ordered by state, city, then name.
pub async fn list_with_upcoming(
    pool: &SqlitePool,
    now: DateTime<Utc>,
) -> Result<Vec<LocatedVenueRow>, DbError> {
    let rows = sqlx::query_as::<_, LocatedVenueRow>(
        r#"
        SELECT v.id, v.name, v.city, v.state, COUNT(s.id) AS num_upcoming_shows
        FROM venues v
        LEFT JOIN shows s ON s.venue_id = v.id AND s.start_time > ?
        GROUP BY v.id
        ORDER BY v.state, v.city, v.name, v.id
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Case-insensitive substring search on venue names.
///
/// SQLite only folds ASCII case, so names are matched here with full
/// Unicode lowercasing instead of `LIKE`.
pub async fn search(
    pool: &SqlitePool,
    term: &str,
    now: DateTime<Utc>,
) -> Result<Vec<UpcomingCountRow>, DbError> {
    let rows = sqlx::query_as::<_, UpcomingCountRow>(
        r#"
        SELECT v.id, v.name, COUNT(s.id) AS num_upcoming_shows
        FROM venues v
        LEFT JOIN shows s ON s.venue_id = v.id AND s.start_time > ?
        GROUP BY v.id
        ORDER BY v.name, v.id
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .filter(|row| name_matches(&row.name, term))
        .collect())
}

/// Insert a new venue and return its id.
///
/// `created_date` is written here and never touched again.
pub async fn insert(
    conn: &mut SqliteConnection,
    fields: &VenueFields,
    created_date: DateTime<Utc>,
) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO venues
            (name, city, state, address, phone, image_link, facebook_link,
             website, seeking_talent, seeking_description, created_date)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.address)
    .bind(&fields.phone)
    .bind(&fields.image_link)
    .bind(&fields.facebook_link)
    .bind(&fields.website)
    .bind(fields.seeking_talent)
    .bind(&fields.seeking_description)
    .bind(created_date)
    .fetch_one(conn)
    .await?;

    Ok(id)
}

/// Overwrite every mutable column of a venue.
///
/// Returns `DbError::NotFound` if no row was updated.
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    fields: &VenueFields,
) -> Result<(), DbError> {
    let result = sqlx::query(
        r#"
        UPDATE venues
        SET name = ?, city = ?, state = ?, address = ?, phone = ?, image_link = ?,
            facebook_link = ?, website = ?, seeking_talent = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.address)
    .bind(&fields.phone)
    .bind(&fields.image_link)
    .bind(&fields.facebook_link)
    .bind(&fields.website)
    .bind(fields.seeking_talent)
    .bind(&fields.seeking_description)
    .bind(id)
    .execute(conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}

/// The current name of a venue, read inside the caller's transaction.
///
/// Returns `DbError::NotFound` if the row does not exist.
pub async fn name_of(conn: &mut SqliteConnection, id: i64) -> Result<String, DbError> {
    let name = sqlx::query_scalar::<_, String>("SELECT name FROM venues WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or(DbError::NotFound)?;

    Ok(name)
}

/// Permanently delete a venue.
///
/// Its shows and genre links go with it (`ON DELETE CASCADE`).
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}
