//! Booking workflow: reserve an album for a contact.
//!
//! The whole workflow runs inside one transaction so that contact creation
//! and booking creation are atomic: a losing race leaves no trace, including
//! any contact row it created. No application-level locking; the UNIQUE
//! constraint on bookings.album_id decides concurrent submissions for the
//! same album, and the album's `available` flag is only a denormalized
//! listing hint.

use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};
use tracing::{info, warn};

use crate::db::albums::Album;
use crate::forms::ContactForm;

/// Terminal result of one booking submission.
#[derive(Debug)]
pub enum BookingOutcome {
    /// Booking committed; the album is no longer available.
    Confirmed(Album),
    /// The album id does not resolve (tampered or stale form).
    AlbumMissing,
    /// Another booking for this album won the race; nothing was persisted.
    AlreadyBooked,
}

/// Reserve `album_id` for the submitted contact.
///
/// The form is assumed validated by the caller. The album is re-fetched
/// inside the transaction even if the caller rendered it from earlier data.
pub async fn place_booking(
    pool: &SqlitePool,
    album_id: i64,
    form: &ContactForm,
) -> Result<BookingOutcome> {
    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let album_row = sqlx::query(
        "SELECT id, reference, created_at, available, title, picture FROM albums WHERE id = ?",
    )
    .bind(album_id)
    .fetch_optional(&mut *tx)
    .await?;

    let album = match album_row {
        Some(row) => Album {
            id: row.get("id"),
            reference: row.get("reference"),
            created_at: row.get("created_at"),
            available: row.get::<i64, _>("available") != 0,
            title: row.get("title"),
            picture: row.get("picture"),
        },
        None => return Ok(BookingOutcome::AlbumMissing),
    };

    // Reuse an existing contact with this email, or create one. A reused
    // contact keeps its original name even if the submission differs.
    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM contacts WHERE email = ? ORDER BY id LIMIT 1")
            .bind(&form.email)
            .fetch_optional(&mut *tx)
            .await?;

    let contact_id = match existing {
        Some(id) => id,
        None => {
            let result = sqlx::query("INSERT INTO contacts (email, name) VALUES (?, ?)")
                .bind(&form.email)
                .bind(&form.name)
                .execute(&mut *tx)
                .await?;
            result.last_insert_rowid()
        }
    };

    let inserted = sqlx::query(
        "INSERT INTO bookings (created_at, contacted, album_id, contact_id) VALUES (?, 0, ?, ?)",
    )
    .bind(chrono::Utc::now().timestamp())
    .bind(album.id)
    .bind(contact_id)
    .execute(&mut *tx)
    .await;

    match inserted {
        Ok(_) => {}
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            warn!(album_id, "Booking conflict: album already booked");
            tx.rollback().await?;
            return Ok(BookingOutcome::AlreadyBooked);
        }
        Err(e) => return Err(e.into()),
    }

    // Keep the listing filter in step with the new booking.
    sqlx::query("UPDATE albums SET available = 0 WHERE id = ?")
        .bind(album.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await.context("Failed to commit booking")?;

    info!(album_id = album.id, contact_id, "Booking confirmed");
    Ok(BookingOutcome::Confirmed(album))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn form(name: &str, email: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_booking_creates_contact_and_claims_album() {
        let pool = db::connect_in_memory().await.unwrap();
        let album_id = db::albums::create_album(&pool, "Escape", "", None)
            .await
            .unwrap();

        let outcome = place_booking(&pool, album_id, &form("Freddie", "fred@queen.forever"))
            .await
            .unwrap();
        assert!(matches!(outcome, BookingOutcome::Confirmed(ref a) if a.id == album_id));

        assert_eq!(db::bookings::count(&pool, None).await.unwrap(), 1);
        let contact = db::contacts::find_by_email(&pool, "fred@queen.forever")
            .await
            .unwrap()
            .expect("contact created");
        assert_eq!(contact.name, "Freddie");

        let album = db::albums::get_by_id(&pool, album_id).await.unwrap().unwrap();
        assert!(!album.available);
    }

    #[tokio::test]
    async fn test_contact_reused_keeps_first_name() {
        let pool = db::connect_in_memory().await.unwrap();
        let first = db::albums::create_album(&pool, "One", "", None).await.unwrap();
        let second = db::albums::create_album(&pool, "Two", "", None).await.unwrap();

        place_booking(&pool, first, &form("Freddie", "fred@queen.forever"))
            .await
            .unwrap();
        place_booking(&pool, second, &form("Frederick", "fred@queen.forever"))
            .await
            .unwrap();

        assert_eq!(db::contacts::count(&pool).await.unwrap(), 1);
        let contact = db::contacts::find_by_email(&pool, "fred@queen.forever")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(contact.name, "Freddie");
        assert_eq!(
            db::bookings::list_for_contact(&pool, contact.id).await.unwrap().len(),
            2
        );
    }

    #[tokio::test]
    async fn test_missing_album() {
        let pool = db::connect_in_memory().await.unwrap();

        let outcome = place_booking(&pool, 9999, &form("Freddie", "fred@queen.forever"))
            .await
            .unwrap();
        assert!(matches!(outcome, BookingOutcome::AlbumMissing));
        assert_eq!(db::bookings::count(&pool, None).await.unwrap(), 0);
        assert_eq!(db::contacts::count(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_conflict_rolls_back_new_contact() {
        let pool = db::connect_in_memory().await.unwrap();
        let album_id = db::albums::create_album(&pool, "Escape", "", None)
            .await
            .unwrap();

        place_booking(&pool, album_id, &form("Freddie", "fred@queen.forever"))
            .await
            .unwrap();

        // Second submission from a different person loses the race; its
        // freshly created contact must roll back with the booking.
        let outcome = place_booking(&pool, album_id, &form("Brian", "brian@queen.forever"))
            .await
            .unwrap();
        assert!(matches!(outcome, BookingOutcome::AlreadyBooked));

        assert_eq!(db::bookings::count(&pool, None).await.unwrap(), 1);
        assert_eq!(db::contacts::count(&pool).await.unwrap(), 1);
        assert!(db::contacts::find_by_email(&pool, "brian@queen.forever")
            .await
            .unwrap()
            .is_none());
    }
}
