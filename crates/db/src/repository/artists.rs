//! Artist CRUD and query operations.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    DbError,
    models::{ArtistFields, ArtistRow, UpcomingCountRow},
};

use super::name_matches;

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, image_link, facebook_link, website, \
     seeking_venue, seeking_description, created_date";

/// Fetch a single artist by its primary key.
pub async fn get(pool: &SqlitePool, id: i64) -> Result<ArtistRow, DbError> {
    let row = sqlx::query_as::<_, ArtistRow>(&format!(
        "SELECT {ARTIST_COLUMNS} FROM artists WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row)
}

/// Return the `limit` most recently created artists (newest first).
pub async fn list_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<ArtistRow>, DbError> {
    let rows = sqlx::query_as::<_, ArtistRow>(&format!(
        "SELECT {ARTIST_COLUMNS} FROM artists ORDER BY created_date DESC, id DESC LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Return every artist with the count of shows starting strictly after
/// `now`, ordered by name.
pub async fn list_with_upcoming(
    pool: &SqlitePool,
    now: DateTime<Utc>,
) -> Result<Vec<UpcomingCountRow>, DbError> {
    let rows = sqlx::query_as::<_, UpcomingCountRow>(
        r#"
        SELECT a.id, a.name, COUNT(s.id) AS num_upcoming_shows
        FROM artists a
        LEFT JOIN shows s ON s.artist_id = a.id AND s.start_time > ?
        GROUP BY a.id
        ORDER BY a.name, a.id
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Case-insensitive substring search on artist names.
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
        SELECT a.id, a.name, COUNT(s.id) AS num_upcoming_shows
        FROM artists a
        LEFT JOIN shows s ON s.artist_id = a.id AND s.start_time > ?
        GROUP BY a.id
        ORDER BY a.name, a.id
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

/// Insert a new artist and return its id.
pub async fn insert(
    conn: &mut SqliteConnection,
    fields: &ArtistFields,
    created_date: DateTime<Utc>,
) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO artists
            (name, city, state, phone, image_link, facebook_link, website,
             seeking_venue, seeking_description, created_date)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.phone)
    .bind(&fields.image_link)
    .bind(&fields.facebook_link)
    .bind(&fields.website)
    .bind(fields.seeking_venue)
    .bind(&fields.seeking_description)
    .bind(created_date)
    .fetch_one(conn)
    .await?;

    Ok(id)
}

/// Overwrite every mutable column of an artist.
///
/// Returns `DbError::NotFound` if no row was updated.
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    fields: &ArtistFields,
) -> Result<(), DbError> {
    let result = sqlx::query(
        r#"
        UPDATE artists
        SET name = ?, city = ?, state = ?, phone = ?, image_link = ?, facebook_link = ?,
            website = ?, seeking_venue = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.phone)
    .bind(&fields.image_link)
    .bind(&fields.facebook_link)
    .bind(&fields.website)
    .bind(fields.seeking_venue)
    .bind(&fields.seeking_description)
    .bind(id)
    .execute(conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}

/// The current name of an artist, read inside the caller's transaction.
///
/// Returns `DbError::NotFound` if the row does not exist.
pub async fn name_of(conn: &mut SqliteConnection, id: i64) -> Result<String, DbError> {
    let name = sqlx::query_scalar::<_, String>("SELECT name FROM artists WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or(DbError::NotFound)?;

    Ok(name)
}

/// Permanently delete an artist.
///
/// Its shows and genre links go with it (`ON DELETE CASCADE`).
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}
