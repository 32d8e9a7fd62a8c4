//! Album detail page and booking submission.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};

use crate::api::pages;
use crate::booking::{self, BookingOutcome};
use crate::db::albums;
use crate::error::ApiResult;
use crate::forms::{ContactForm, FormErrors};
use crate::AppState;

/// GET /albums/:id
///
/// Detail view with an empty booking form; 404 if the album doesn't exist.
pub async fn detail_get(
    State(state): State<AppState>,
    Path(album_id): Path<i64>,
) -> ApiResult<Response> {
    let Some(album) = albums::get_by_id(&state.db, album_id).await? else {
        return Ok(not_found());
    };

    let artists = albums::artist_names(&state.db, album_id).await?;
    let html = pages::detail_page(
        &album,
        &artists.join(" "),
        &ContactForm::default(),
        &FormErrors::default(),
    );
    Ok(Html(html).into_response())
}

/// POST /albums/:id
///
/// Booking submission. Validation failures and booking conflicts re-render
/// the detail page with messages at HTTP 200 so the visitor can retry; a
/// nonexistent album id is a 404 in all cases.
pub async fn detail_post(
    State(state): State<AppState>,
    Path(album_id): Path<i64>,
    Form(form): Form<ContactForm>,
) -> ApiResult<Response> {
    let errors = form.validate();
    if !errors.is_empty() {
        let Some(album) = albums::get_by_id(&state.db, album_id).await? else {
            return Ok(not_found());
        };
        let artists = albums::artist_names(&state.db, album_id).await?;
        let html = pages::detail_page(&album, &artists.join(" "), &form, &errors);
        return Ok(Html(html).into_response());
    }

    match booking::place_booking(&state.db, album_id, &form).await? {
        BookingOutcome::Confirmed(album) => {
            Ok(Html(pages::confirmation_page(&album.title)).into_response())
        }
        BookingOutcome::AlbumMissing => Ok(not_found()),
        BookingOutcome::AlreadyBooked => {
            // The form raced another submission; nothing persisted. Tell the
            // visitor to try again rather than surfacing a technical error.
            let Some(album) = albums::get_by_id(&state.db, album_id).await? else {
                return Ok(not_found());
            };
            let artists = albums::artist_names(&state.db, album_id).await?;
            let errors = FormErrors {
                internal: Some("An internal error occurred. Please try your request again."),
                ..FormErrors::default()
            };
            let html = pages::detail_page(&album, &artists.join(" "), &form, &errors);
            Ok(Html(html).into_response())
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(pages::not_found_page())).into_response()
}
