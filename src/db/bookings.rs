//! Booking queries for the administrative surface and tests.
//!
//! Booking creation itself lives in the transactional workflow
//! (`crate::booking`); this module only reads bookings back and toggles the
//! one staff-mutable field.

use anyhow::Result;
use sqlx::{Row, SqlitePool};

/// Booking record
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: i64,
    /// Unix timestamp, set once at creation
    pub created_at: i64,
    /// Staff-maintained flag; the only field mutable after creation
    pub contacted: bool,
    pub album_id: i64,
    pub contact_id: i64,
}

/// Booking joined with album title and contact identity, for staff listings.
#[derive(Debug, Clone)]
pub struct BookingOverview {
    pub id: i64,
    pub created_at: i64,
    pub contacted: bool,
    pub album_id: i64,
    pub album_title: String,
    pub contact_id: i64,
    pub contact_name: String,
    pub contact_email: String,
}

fn overview_from_row(row: &sqlx::sqlite::SqliteRow) -> BookingOverview {
    BookingOverview {
        id: row.get("id"),
        created_at: row.get("created_at"),
        contacted: row.get::<i64, _>("contacted") != 0,
        album_id: row.get("album_id"),
        album_title: row.get("album_title"),
        contact_id: row.get("contact_id"),
        contact_name: row.get("contact_name"),
        contact_email: row.get("contact_email"),
    }
}

/// Load a booking by id.
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Booking>> {
    let row = sqlx::query(
        "SELECT id, created_at, contacted, album_id, contact_id FROM bookings WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Booking {
        id: row.get("id"),
        created_at: row.get("created_at"),
        contacted: row.get::<i64, _>("contacted") != 0,
        album_id: row.get("album_id"),
        contact_id: row.get("contact_id"),
    }))
}

/// Total number of bookings, optionally filtered by contacted state.
pub async fn count(pool: &SqlitePool, contacted: Option<bool>) -> Result<i64> {
    let count: i64 = match contacted {
        None => {
            sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
                .fetch_one(pool)
                .await?
        }
        Some(flag) => {
            sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE contacted = ?")
                .bind(flag as i64)
                .fetch_one(pool)
                .await?
        }
    };

    Ok(count)
}

/// One page of bookings with album and contact details, newest first.
pub async fn list_page(
    pool: &SqlitePool,
    contacted: Option<bool>,
    limit: i64,
    offset: i64,
) -> Result<Vec<BookingOverview>> {
    let base = "SELECT b.id, b.created_at, b.contacted, b.album_id, al.title AS album_title,
                       b.contact_id, c.name AS contact_name, c.email AS contact_email
                FROM bookings b
                JOIN albums al ON al.id = b.album_id
                JOIN contacts c ON c.id = b.contact_id";

    let rows = match contacted {
        None => {
            sqlx::query(&format!(
                "{base} ORDER BY b.created_at DESC, b.id DESC LIMIT ? OFFSET ?"
            ))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        Some(flag) => {
            sqlx::query(&format!(
                "{base} WHERE b.contacted = ? ORDER BY b.created_at DESC, b.id DESC LIMIT ? OFFSET ?"
            ))
            .bind(flag as i64)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows.iter().map(overview_from_row).collect())
}

/// Bookings made by one contact (staff cross-reference).
pub async fn list_for_contact(pool: &SqlitePool, contact_id: i64) -> Result<Vec<BookingOverview>> {
    let rows = sqlx::query(
        "SELECT b.id, b.created_at, b.contacted, b.album_id, al.title AS album_title,
                b.contact_id, c.name AS contact_name, c.email AS contact_email
         FROM bookings b
         JOIN albums al ON al.id = b.album_id
         JOIN contacts c ON c.id = b.contact_id
         WHERE b.contact_id = ?
         ORDER BY b.created_at DESC, b.id DESC",
    )
    .bind(contact_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(overview_from_row).collect())
}

/// Set the contacted flag. Returns false if no such booking exists.
pub async fn set_contacted(pool: &SqlitePool, id: i64, contacted: bool) -> Result<bool> {
    let result = sqlx::query("UPDATE bookings SET contacted = ? WHERE id = ?")
        .bind(contacted as i64)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
