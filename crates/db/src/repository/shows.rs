//! Show queries and creation.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    DbError,
    models::{CounterpartShowRow, ShowListingRow, ShowRow},
};

/// Return every show, earliest first, with venue and artist names attached.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<ShowListingRow>, DbError> {
    let rows = sqlx::query_as::<_, ShowListingRow>(
        r#"
        SELECT s.id, s.venue_id, v.name AS venue_name,
               s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
               s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        JOIN artists a ON a.id = s.artist_id
        ORDER BY s.start_time ASC, s.id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Every show held at a venue, earliest first, with the performing artist.
pub async fn for_venue(
    pool: &SqlitePool,
    venue_id: i64,
) -> Result<Vec<CounterpartShowRow>, DbError> {
    let rows = sqlx::query_as::<_, CounterpartShowRow>(
        r#"
        SELECT a.id AS counterpart_id, a.name AS counterpart_name,
               a.image_link AS counterpart_image_link, s.start_time
        FROM shows s
        JOIN artists a ON a.id = s.artist_id
        WHERE s.venue_id = ?
        ORDER BY s.start_time ASC, s.id ASC
        "#,
    )
    .bind(venue_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Every show an artist plays, earliest first, with the hosting venue.
pub async fn for_artist(
    pool: &SqlitePool,
    artist_id: i64,
) -> Result<Vec<CounterpartShowRow>, DbError> {
    let rows = sqlx::query_as::<_, CounterpartShowRow>(
        r#"
        SELECT v.id AS counterpart_id, v.name AS counterpart_name,
               v.image_link AS counterpart_image_link, s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        WHERE s.artist_id = ?
        ORDER BY s.start_time ASC, s.id ASC
        "#,
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Insert a new show.
///
/// Fails with a foreign key violation when the artist or venue does not exist.
pub async fn insert(
    conn: &mut SqliteConnection,
    artist_id: i64,
    venue_id: i64,
    start_time: DateTime<Utc>,
) -> Result<ShowRow, DbError> {
    let row = sqlx::query_as::<_, ShowRow>(
        r#"
        INSERT INTO shows (artist_id, venue_id, start_time)
        VALUES (?, ?, ?)
        RETURNING id, artist_id, venue_id, start_time
        "#,
    )
    .bind(artist_id)
    .bind(venue_id)
    .bind(start_time)
    .fetch_one(conn)
    .await?;

    Ok(row)
}
