//! Artist queries.

use anyhow::Result;
use sqlx::{Row, SqlitePool};

use super::albums::Album;

/// Artist record. Identity is the name (unique).
#[derive(Debug, Clone)]
pub struct Artist {
    pub id: i64,
    pub name: String,
}

/// Insert a new artist, returning its id, or `None` if the name is taken.
pub async fn create_artist(pool: &SqlitePool, name: &str) -> Result<Option<i64>> {
    let result = sqlx::query("INSERT INTO artists (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await;

    match result {
        Ok(done) => Ok(Some(done.last_insert_rowid())),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Load an artist by id.
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Artist>> {
    let row = sqlx::query("SELECT id, name FROM artists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| Artist {
        id: row.get("id"),
        name: row.get("name"),
    }))
}

/// Albums associated with an artist (staff cross-reference).
pub async fn albums_for_artist(pool: &SqlitePool, artist_id: i64) -> Result<Vec<Album>> {
    let rows = sqlx::query(
        "SELECT al.id, al.reference, al.created_at, al.available, al.title, al.picture
         FROM albums al
         JOIN album_artists aa ON aa.album_id = al.id
         WHERE aa.artist_id = ?
         ORDER BY al.id",
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| Album {
            id: row.get("id"),
            reference: row.get("reference"),
            created_at: row.get("created_at"),
            available: row.get::<i64, _>("available") != 0,
            title: row.get("title"),
            picture: row.get("picture"),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[tokio::test]
    async fn test_artist_name_is_unique() {
        let pool = db::connect_in_memory().await.unwrap();

        let id = create_artist(&pool, "Journey").await.unwrap();
        assert!(id.is_some());

        let dup = create_artist(&pool, "Journey").await.unwrap();
        assert!(dup.is_none());
    }

    #[tokio::test]
    async fn test_albums_for_artist() {
        let pool = db::connect_in_memory().await.unwrap();

        let artist = create_artist(&pool, "Journey").await.unwrap().unwrap();
        let album = db::albums::create_album(&pool, "Escape", "", None)
            .await
            .unwrap();
        db::albums::link_artist(&pool, album, artist).await.unwrap();

        let albums = albums_for_artist(&pool, artist).await.unwrap();
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].title, "Escape");
    }
}
