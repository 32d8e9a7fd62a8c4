//! Album queries: catalog listings, search, and availability.

use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Album record
#[derive(Debug, Clone)]
pub struct Album {
    pub id: i64,
    /// External catalog reference, if any
    pub reference: Option<i64>,
    /// Unix timestamp, set once at creation
    pub created_at: i64,
    /// Denormalized "not yet claimed by a booking" hint; drives the public
    /// listing filter, never flips back to true
    pub available: bool,
    pub title: String,
    /// Cover image URL
    pub picture: String,
}

fn album_from_row(row: &SqliteRow) -> Album {
    Album {
        id: row.get("id"),
        reference: row.get("reference"),
        created_at: row.get("created_at"),
        available: row.get::<i64, _>("available") != 0,
        title: row.get("title"),
        picture: row.get("picture"),
    }
}

const ALBUM_COLUMNS: &str = "id, reference, created_at, available, title, picture";

/// Insert a new album, returning its id.
pub async fn create_album(
    pool: &SqlitePool,
    title: &str,
    picture: &str,
    reference: Option<i64>,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO albums (reference, created_at, available, title, picture)
        VALUES (?, ?, 1, ?, ?)
        "#,
    )
    .bind(reference)
    .bind(chrono::Utc::now().timestamp())
    .bind(title)
    .bind(picture)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Associate an artist with an album through the join table.
pub async fn link_artist(pool: &SqlitePool, album_id: i64, artist_id: i64) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO album_artists (album_id, artist_id)
        VALUES (?, ?)
        ON CONFLICT(album_id, artist_id) DO NOTHING
        "#,
    )
    .bind(album_id)
    .bind(artist_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load an album by id.
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Album>> {
    let row = sqlx::query(&format!(
        "SELECT {ALBUM_COLUMNS} FROM albums WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(album_from_row))
}

/// Most recently created available albums, newest first.
pub async fn list_featured(pool: &SqlitePool, limit: i64) -> Result<Vec<Album>> {
    let rows = sqlx::query(&format!(
        "SELECT {ALBUM_COLUMNS} FROM albums
         WHERE available = 1
         ORDER BY created_at DESC, id DESC
         LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(album_from_row).collect())
}

/// Number of available albums (drives listing pagination).
pub async fn count_available(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM albums WHERE available = 1")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// One page of available albums in stable id order.
pub async fn list_available_page(pool: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<Album>> {
    let rows = sqlx::query(&format!(
        "SELECT {ALBUM_COLUMNS} FROM albums
         WHERE available = 1
         ORDER BY id
         LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(album_from_row).collect())
}

/// Escape LIKE metacharacters so a search query matches literally.
fn escape_like(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Search albums by title, falling back to artist name.
///
/// An empty query returns every album regardless of availability, and neither
/// branch filters on `available` — longstanding documented behavior of the
/// search page, kept as-is. Only one branch ever executes, so no
/// deduplication pass is applied to the fallback join.
pub async fn search(pool: &SqlitePool, query: &str) -> Result<Vec<Album>> {
    if query.is_empty() {
        let rows = sqlx::query(&format!(
            "SELECT {ALBUM_COLUMNS} FROM albums ORDER BY id"
        ))
        .fetch_all(pool)
        .await?;
        return Ok(rows.iter().map(album_from_row).collect());
    }

    let pattern = escape_like(query);

    // Title match first (SQLite LIKE is case-insensitive for ASCII)
    let rows = sqlx::query(&format!(
        "SELECT {ALBUM_COLUMNS} FROM albums
         WHERE title LIKE '%' || ? || '%' ESCAPE '\\'
         ORDER BY id"
    ))
    .bind(&pattern)
    .fetch_all(pool)
    .await?;

    if !rows.is_empty() {
        return Ok(rows.iter().map(album_from_row).collect());
    }

    // Fall back to albums whose artist name matches
    let rows = sqlx::query(
        "SELECT al.id, al.reference, al.created_at, al.available, al.title, al.picture
         FROM albums al
         JOIN album_artists aa ON aa.album_id = al.id
         JOIN artists ar ON ar.id = aa.artist_id
         WHERE ar.name LIKE '%' || ? || '%' ESCAPE '\\'
         ORDER BY al.id",
    )
    .bind(&pattern)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(album_from_row).collect())
}

/// Names of an album's artists, for the detail page heading.
pub async fn artist_names(pool: &SqlitePool, album_id: i64) -> Result<Vec<String>> {
    let rows = sqlx::query(
        "SELECT ar.name
         FROM artists ar
         JOIN album_artists aa ON aa.artist_id = ar.id
         WHERE aa.album_id = ?
         ORDER BY ar.name",
    )
    .bind(album_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(|row| row.get("name")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[tokio::test]
    async fn test_create_and_get_album() {
        let pool = db::connect_in_memory().await.unwrap();

        let id = create_album(&pool, "Transmission Impossible", "http://x/cover.jpg", Some(42))
            .await
            .unwrap();

        let album = get_by_id(&pool, id).await.unwrap().expect("album not found");
        assert_eq!(album.title, "Transmission Impossible");
        assert_eq!(album.reference, Some(42));
        assert!(album.available);

        assert!(get_by_id(&pool, id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_title_then_artist_fallback() {
        let pool = db::connect_in_memory().await.unwrap();

        let album_id = create_album(&pool, "A Night at the Opera", "", None)
            .await
            .unwrap();
        let artist_id = db::artists::create_artist(&pool, "Queen")
            .await
            .unwrap()
            .unwrap();
        link_artist(&pool, album_id, artist_id).await.unwrap();

        // Title branch
        let hits = search(&pool, "opera").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, album_id);

        // No title match, artist fallback
        let hits = search(&pool, "Queen").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, album_id);

        // Neither matches
        assert!(search(&pool, "zeppelin").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_treats_like_metacharacters_literally() {
        let pool = db::connect_in_memory().await.unwrap();

        create_album(&pool, "Cat", "", None).await.unwrap();
        let dynamite = create_album(&pool, "100% Dynamite", "", None)
            .await
            .unwrap();
        let moon_pix = create_album(&pool, "Moon Pix", "", None).await.unwrap();
        let artist_id = db::artists::create_artist(&pool, "Cat Power")
            .await
            .unwrap()
            .unwrap();
        link_artist(&pool, moon_pix, artist_id).await.unwrap();

        // Underscore is not a single-character wildcard: "C_t" is not a
        // substring of "Cat" (title) or "Cat Power" (artist fallback)
        assert!(search(&pool, "C_t").await.unwrap().is_empty());

        // Percent matches literally
        let hits = search(&pool, "100%").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, dynamite);

        // Escaped input still matches as a plain substring
        let hits = search(&pool, "Cat").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Cat");
    }

    #[tokio::test]
    async fn test_empty_search_includes_unavailable() {
        let pool = db::connect_in_memory().await.unwrap();

        let a = create_album(&pool, "First", "", None).await.unwrap();
        let _b = create_album(&pool, "Second", "", None).await.unwrap();
        sqlx::query("UPDATE albums SET available = 0 WHERE id = ?")
            .bind(a)
            .execute(&pool)
            .await
            .unwrap();

        assert_eq!(search(&pool, "").await.unwrap().len(), 2);
        assert_eq!(count_available(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_featured_newest_first() {
        let pool = db::connect_in_memory().await.unwrap();

        let first = create_album(&pool, "Old", "", None).await.unwrap();
        let second = create_album(&pool, "New", "", None).await.unwrap();

        let featured = list_featured(&pool, 12).await.unwrap();
        assert_eq!(featured.len(), 2);
        // Same-second inserts fall back to id order
        assert_eq!(featured[0].id, second);
        assert_eq!(featured[1].id, first);
    }
}
