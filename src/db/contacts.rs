//! Contact queries.
//!
//! Contacts are created lazily by the booking workflow and deduplicated by
//! email there; the email column itself carries no uniqueness constraint.

use anyhow::Result;
use sqlx::{Row, SqlitePool};

/// Contact record
#[derive(Debug, Clone)]
pub struct Contact {
    pub id: i64,
    pub email: String,
    pub name: String,
}

fn contact_from_row(row: &sqlx::sqlite::SqliteRow) -> Contact {
    Contact {
        id: row.get("id"),
        email: row.get("email"),
        name: row.get("name"),
    }
}

/// Load a contact by id.
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Contact>> {
    let row = sqlx::query("SELECT id, email, name FROM contacts WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(contact_from_row))
}

/// First contact with the given email, if any.
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Contact>> {
    let row = sqlx::query("SELECT id, email, name FROM contacts WHERE email = ? ORDER BY id LIMIT 1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(contact_from_row))
}

/// Total number of contacts.
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
