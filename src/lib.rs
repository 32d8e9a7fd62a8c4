//! disquaire - record shop catalog and booking service
//!
//! Public HTML surface for browsing albums and reserving one via the contact
//! form, plus a JSON administrative API for staff follow-up. Backed by
//! SQLite; the booking path is a single transaction guarded by a uniqueness
//! constraint rather than application locks.

pub mod api;
pub mod booking;
pub mod db;
pub mod error;
pub mod forms;
pub mod pagination;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        // Public pages (registered with and without trailing slash)
        .route("/", get(api::catalog::index))
        .route("/albums", get(api::catalog::listing))
        .route("/albums/", get(api::catalog::listing))
        .route(
            "/albums/:id",
            get(api::detail::detail_get).post(api::detail::detail_post),
        )
        .route(
            "/albums/:id/",
            get(api::detail::detail_get).post(api::detail::detail_post),
        )
        .route("/search", get(api::catalog::search))
        .route("/search/", get(api::catalog::search))
        // Administrative JSON API
        .route("/admin/bookings", get(api::admin::list_bookings))
        .route(
            "/admin/bookings/:id/contacted",
            post(api::admin::set_booking_contacted),
        )
        .route("/admin/contacts/:id", get(api::admin::get_contact))
        .route("/admin/artists/:id", get(api::admin::get_artist))
        .route("/admin/artists", post(api::admin::create_artist))
        .route("/admin/albums", post(api::admin::create_album))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
