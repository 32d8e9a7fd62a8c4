//! Public catalog handlers: front page, paginated listing, search.

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use crate::api::pages;
use crate::db::albums;
use crate::error::ApiResult;
use crate::pagination::{self, FEATURED_COUNT, PAGE_SIZE};
use crate::AppState;

/// Query parameters for the listing page.
///
/// The page number is kept as a raw string so that junk values degrade to
/// page 1 instead of a rejected request.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub page: Option<String>,
}

/// Query parameters for the search page.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

/// GET /
///
/// Featured listing: the 12 newest available albums.
pub async fn index(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let albums = albums::list_featured(&state.db, FEATURED_COUNT).await?;
    Ok(Html(pages::index_page(&albums)))
}

/// GET /albums?page=N
///
/// Paginated listing of available albums, 9 per page. Out-of-range or
/// non-numeric page numbers are clamped; this handler never 4xxes.
pub async fn listing(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> ApiResult<Html<String>> {
    let requested = pagination::parse_page(query.page.as_deref());

    let total = albums::count_available(&state.db).await?;
    let p = pagination::calculate_pagination(total, requested, PAGE_SIZE);

    let albums = albums::list_available_page(&state.db, PAGE_SIZE, p.offset).await?;
    Ok(Html(pages::listing_page(&albums, &p)))
}

/// GET /search?query=q
///
/// Title search with artist-name fallback. An empty query lists the whole
/// catalog, unavailable albums included.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Html<String>> {
    let q = query.query.unwrap_or_default();
    let albums = albums::search(&state.db, &q).await?;
    Ok(Html(pages::search_page(&q, &albums)))
}
