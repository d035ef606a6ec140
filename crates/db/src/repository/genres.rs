//! Genre lookup and the venue/artist genre links.

use sqlx::{SqliteConnection, SqlitePool};

use crate::{DbError, models::GenreRow};

/// Return the id of the genre called `name`, creating it if needed.
pub async fn get_or_insert(conn: &mut SqliteConnection, name: &str) -> Result<i64, DbError> {
    sqlx::query("INSERT INTO genres (name) VALUES (?) ON CONFLICT (name) DO NOTHING")
        .bind(name)
        .execute(&mut *conn)
        .await?;

    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM genres WHERE name = ?")
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;

    Ok(id)
}

/// All known genres, alphabetically.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<GenreRow>, DbError> {
    let rows = sqlx::query_as::<_, GenreRow>("SELECT id, name FROM genres ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Genre names linked to a venue, alphabetically.
pub async fn for_venue(pool: &SqlitePool, venue_id: i64) -> Result<Vec<String>, DbError> {
    let names = sqlx::query_scalar::<_, String>(
        r#"
        SELECT g.name
        FROM venue_genres vg
        JOIN genres g ON g.id = vg.genre_id
        WHERE vg.venue_id = ?
        ORDER BY g.name
        "#,
    )
    .bind(venue_id)
    .fetch_all(pool)
    .await?;

    Ok(names)
}

/// Genre names linked to an artist, alphabetically.
pub async fn for_artist(pool: &SqlitePool, artist_id: i64) -> Result<Vec<String>, DbError> {
    let names = sqlx::query_scalar::<_, String>(
        r#"
        SELECT g.name
        FROM artist_genres ag
        JOIN genres g ON g.id = ag.genre_id
        WHERE ag.artist_id = ?
        ORDER BY g.name
        "#,
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await?;

    Ok(names)
}

/// Replace a venue's genre set wholesale.
pub async fn replace_for_venue(
    conn: &mut SqliteConnection,
    venue_id: i64,
    names: &[String],
) -> Result<(), DbError> {
    sqlx::query("DELETE FROM venue_genres WHERE venue_id = ?")
        .bind(venue_id)
        .execute(&mut *conn)
        .await?;

    for name in names {
        let genre_id = get_or_insert(conn, name).await?;
        sqlx::query(
            "INSERT INTO venue_genres (venue_id, genre_id) VALUES (?, ?) ON CONFLICT DO NOTHING",
        )
        .bind(venue_id)
        .bind(genre_id)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// Replace an artist's genre set wholesale.
pub async fn replace_for_artist(
    conn: &mut SqliteConnection,
    artist_id: i64,
    names: &[String],
) -> Result<(), DbError> {
    sqlx::query("DELETE FROM artist_genres WHERE artist_id = ?")
        .bind(artist_id)
        .execute(&mut *conn)
        .await?;

    for name in names {
        let genre_id = get_or_insert(conn, name).await?;
        sqlx::query(
            "INSERT INTO artist_genres (artist_id, genre_id) VALUES (?, ?) ON CONFLICT DO NOTHING",
        )
        .bind(artist_id)
        .bind(genre_id)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::memory_pool;

    #[tokio::test]
    async fn get_or_insert_reuses_existing_names() {
        let pool = memory_pool().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        let first = get_or_insert(&mut conn, "Jazz").await.unwrap();
        let again = get_or_insert(&mut conn, "Jazz").await.unwrap();
        let other = get_or_insert(&mut conn, "Blues").await.unwrap();
        drop(conn);

        assert_eq!(first, again);
        assert_ne!(first, other);
        let names: Vec<String> = list_all(&pool).await.unwrap().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Blues", "Jazz"]);
    }
}
