//! Database access layer for disquaire
//!
//! One module per entity (artists, albums, contacts, bookings), each exposing
//! explicit query functions over the shared SQLite pool. Schema is created on
//! startup via CREATE TABLE IF NOT EXISTS.

pub mod albums;
pub mod artists;
pub mod bookings;
pub mod contacts;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;

/// Open (or create) the database file and initialize the schema.
pub async fn connect(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true);

    tracing::debug!("Connecting to database: {}", db_path.display());
    let pool = SqlitePool::connect_with(options).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Open an in-memory database with the full schema.
///
/// Pinned to a single connection: every pooled connection would otherwise get
/// its own empty in-memory database.
pub async fn connect_in_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Create the catalog and booking tables if they don't exist.
///
/// The UNIQUE constraint on bookings.album_id enforces one booking per album
/// and is the only cross-request coordination in the system.
async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS albums (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            reference INTEGER,
            created_at INTEGER NOT NULL,
            available INTEGER NOT NULL DEFAULT 1,
            title TEXT NOT NULL,
            picture TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS album_artists (
            album_id INTEGER NOT NULL REFERENCES albums(id) ON DELETE CASCADE,
            artist_id INTEGER NOT NULL REFERENCES artists(id),
            PRIMARY KEY (album_id, artist_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at INTEGER NOT NULL,
            contacted INTEGER NOT NULL DEFAULT 0,
            album_id INTEGER NOT NULL UNIQUE REFERENCES albums(id),
            contact_id INTEGER NOT NULL REFERENCES contacts(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (artists, contacts, albums, album_artists, bookings)");

    Ok(())
}
