use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use serde::Deserialize;
use std::sync::Arc;

use super::{artist_details, db_error, render, typed};
use crate::api::mode::{CatalogTarget, RequestMode};
use crate::api::response::{AppError, AppForm, AppQuery};
use crate::catalog::ArtistDetail;
use crate::storage::{TableHandle, ARTIST_DETAILS};
use crate::views;
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub search: String,
}

#[derive(Debug, Deserialize)]
pub struct DetailParams {
    #[serde(default)]
    pub doc_id: Option<u64>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Catalog of artist cards. Fragment requests flip a single card.
/// Route: GET /catalog
pub async fn catalog(
    State(state): State<Arc<AppState>>,
    mode: RequestMode,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let table = state.db.with_table(ARTIST_DETAILS).map_err(db_error)?;

    match mode {
        RequestMode::Full => {
            let artists = artist_details(&table.all_items().map_err(db_error)?)?;
            Ok(Html(
                views::layout(
                    &state.config.site_title,
                    views::catalog_content(&artists, false),
                )
                .into_string(),
            ))
        }
        RequestMode::Fragment => {
            let target = CatalogTarget::from_headers(&headers)?;
            let artist = find_artist(&table, target.artist_id())?;

            tracing::debug!(artist_id = artist.id, ?target, "Flipping catalog card");

            let card = match target {
                CatalogTarget::Profile(_) => views::artist_profile(&artist),
                CatalogTarget::Name(_) => views::artist_name(&artist),
            };
            Ok(Html(card.into_string()))
        }
    }
}

/// Search page, populated with every artist.
/// Route: GET /search
pub async fn search_get(
    State(state): State<Arc<AppState>>,
    mode: RequestMode,
) -> Result<Html<String>, AppError> {
    let table = state.db.with_table(ARTIST_DETAILS).map_err(db_error)?;
    let artists = artist_details(&table.all_items().map_err(db_error)?)?;

    Ok(render(
        mode,
        &state.config.site_title,
        || views::catalog_content(&artists, true),
        || views::catalog_content(&artists, true),
    ))
}

/// Narrow the artist list by name. Fragment requests get only `artist_cards`.
/// Route: POST /search
pub async fn search_post(
    State(state): State<Arc<AppState>>,
    mode: RequestMode,
    AppForm(form): AppForm<SearchForm>,
) -> Result<Html<String>, AppError> {
    let table = state.db.with_table(ARTIST_DETAILS).map_err(db_error)?;

    // An empty term is "no search": show everything, like GET /search
    let docs = match table.search("name", &form.search).map_err(db_error)? {
        Some(docs) => docs,
        None => table.all_items().map_err(db_error)?,
    };
    let artists = artist_details(&docs)?;

    tracing::debug!(term = %form.search, matches = artists.len(), "Artist search");

    Ok(render(
        mode,
        &state.config.site_title,
        || views::catalog_content(&artists, true),
        || views::artist_cards(&artists),
    ))
}

/// Artist detail sections with infinite scroll.
///
/// Direct navigation always starts from document 1. Fragment requests load
/// the requested `doc_id` and link to the next one while it exists.
/// Route: GET /detail
pub async fn detail(
    State(state): State<Arc<AppState>>,
    mode: RequestMode,
    query: Result<AppQuery<DetailParams>, AppError>,
) -> Result<Html<String>, AppError> {
    // Direct navigation ignores the query string, however malformed
    let doc_id = match mode {
        RequestMode::Full => 1,
        RequestMode::Fragment => {
            let AppQuery(params) = query?;
            params
                .doc_id
                .ok_or_else(|| AppError::bad_request("doc_id is required"))?
        }
    };

    let table = state.db.with_table(ARTIST_DETAILS).map_err(db_error)?;
    let doc = table.get_by_id(doc_id).map_err(db_error)?;
    let artist: ArtistDetail = typed(&doc)?;

    // Stop scrolling at the end of the catalog instead of requesting a missing id
    let next_id = match doc_id.checked_add(1) {
        Some(next) if table.contains(next).map_err(db_error)? => Some(next),
        _ => None,
    };

    Ok(render(
        mode,
        &state.config.site_title,
        || views::details_content(&artist, next_id),
        || views::details(&artist, next_id),
    ))
}

// ============================================================================
// Helpers
// ============================================================================

fn find_artist(table: &TableHandle, id: i64) -> Result<ArtistDetail, AppError> {
    let docs = table.find("id", id).map_err(db_error)?;
    let doc = docs
        .first()
        .ok_or_else(|| AppError::not_found(format!("No artist with id {id}")))?;
    typed(doc)
}
