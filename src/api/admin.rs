//! Administrative JSON API.
//!
//! Staff tooling over the same data model: booking follow-up, contact and
//! artist cross-references, and catalog entry. Kept deliberately separate
//! from the public HTML surface.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::db::{albums, artists, bookings, contacts};
use crate::error::{ApiError, ApiResult};
use crate::pagination;
use crate::AppState;

/// Bookings per page on the staff listing
const ADMIN_PAGE_SIZE: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub page: Option<String>,
    /// Optional filter on the contacted flag
    pub contacted: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    pub total_results: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub bookings: Vec<Value>,
}

fn booking_json(b: &bookings::BookingOverview) -> Value {
    json!({
        "id": b.id,
        "created_at": b.created_at,
        "contacted": b.contacted,
        "album": { "id": b.album_id, "title": b.album_title },
        "contact": { "id": b.contact_id, "name": b.contact_name, "email": b.contact_email },
    })
}

fn album_json(a: &albums::Album) -> Value {
    json!({
        "id": a.id,
        "reference": a.reference,
        "created_at": a.created_at,
        "available": a.available,
        "title": a.title,
        "picture": a.picture,
    })
}

/// GET /admin/bookings?page=N&contacted=bool
///
/// Paginated bookings with album and contact details, newest first.
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> ApiResult<Json<BookingListResponse>> {
    let requested = pagination::parse_page(query.page.as_deref());

    let total = bookings::count(&state.db, query.contacted).await?;
    let p = pagination::calculate_pagination(total, requested, ADMIN_PAGE_SIZE);

    let rows = bookings::list_page(&state.db, query.contacted, ADMIN_PAGE_SIZE, p.offset).await?;

    Ok(Json(BookingListResponse {
        total_results: total,
        page: p.page,
        page_size: ADMIN_PAGE_SIZE,
        total_pages: p.total_pages,
        bookings: rows.iter().map(booking_json).collect(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct SetContacted {
    pub contacted: bool,
}

/// POST /admin/bookings/:id/contacted
///
/// Toggle the contacted flag, the only booking field mutable after creation.
pub async fn set_booking_contacted(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
    Json(body): Json<SetContacted>,
) -> ApiResult<Json<Value>> {
    let booking = bookings::get_by_id(&state.db, booking_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("booking {booking_id}")))?;

    bookings::set_contacted(&state.db, booking.id, body.contacted).await?;

    Ok(Json(json!({
        "id": booking.id,
        "album_id": booking.album_id,
        "contacted": body.contacted,
    })))
}

/// GET /admin/contacts/:id
///
/// Contact with all of their bookings.
pub async fn get_contact(
    State(state): State<AppState>,
    Path(contact_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let contact = contacts::get_by_id(&state.db, contact_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("contact {contact_id}")))?;

    let rows = bookings::list_for_contact(&state.db, contact_id).await?;

    Ok(Json(json!({
        "id": contact.id,
        "name": contact.name,
        "email": contact.email,
        "bookings": rows.iter().map(booking_json).collect::<Vec<_>>(),
    })))
}

/// GET /admin/artists/:id
///
/// Artist with their albums.
pub async fn get_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let artist = artists::get_by_id(&state.db, artist_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("artist {artist_id}")))?;

    let album_rows = artists::albums_for_artist(&state.db, artist_id).await?;

    Ok(Json(json!({
        "id": artist.id,
        "name": artist.name,
        "albums": album_rows.iter().map(album_json).collect::<Vec<_>>(),
    })))
}

#[derive(Debug, Deserialize)]
pub struct NewArtist {
    pub name: String,
}

/// POST /admin/artists
pub async fn create_artist(
    State(state): State<AppState>,
    Json(body): Json<NewArtist>,
) -> ApiResult<Json<Value>> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("artist name must not be empty".to_string()));
    }

    let id = artists::create_artist(&state.db, name)
        .await?
        .ok_or_else(|| ApiError::Conflict(format!("artist '{name}' already exists")))?;

    Ok(Json(json!({ "id": id, "name": name })))
}

#[derive(Debug, Deserialize)]
pub struct NewAlbum {
    pub title: String,
    #[serde(default)]
    pub picture: String,
    pub reference: Option<i64>,
    #[serde(default)]
    pub artist_ids: Vec<i64>,
}

/// POST /admin/albums
///
/// Create an album and link its artists. Unknown artist ids are rejected
/// before anything is written.
pub async fn create_album(
    State(state): State<AppState>,
    Json(body): Json<NewAlbum>,
) -> ApiResult<Json<Value>> {
    if body.title.trim().is_empty() {
        return Err(ApiError::BadRequest("album title must not be empty".to_string()));
    }

    for artist_id in &body.artist_ids {
        if artists::get_by_id(&state.db, *artist_id).await?.is_none() {
            return Err(ApiError::BadRequest(format!("unknown artist id {artist_id}")));
        }
    }

    let album_id =
        albums::create_album(&state.db, body.title.trim(), &body.picture, body.reference).await?;
    for artist_id in &body.artist_ids {
        albums::link_artist(&state.db, album_id, *artist_id).await?;
    }

    Ok(Json(json!({ "id": album_id, "title": body.title.trim() })))
}
