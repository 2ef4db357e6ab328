use axum::extract::State;
use axum::response::Html;
use std::sync::Arc;

use super::{db_error, render, typed};
use crate::api::mode::RequestMode;
use crate::api::response::AppError;
use crate::catalog::ArtistInfo;
use crate::storage::{DatabaseError, ARTIST_INFO};
use crate::views;
use crate::AppState;

/// Home page: a random artist. Fragment requests get only `main_image`.
/// Route: GET /
pub async fn home(
    State(state): State<Arc<AppState>>,
    mode: RequestMode,
) -> Result<Html<String>, AppError> {
    let table = state.db.with_table(ARTIST_INFO).map_err(db_error)?;

    let artist_count = table.len().map_err(db_error)?;
    let artist: Option<ArtistInfo> = if artist_count == 0 {
        None
    } else {
        let doc = table.get_random_item().map_err(random_pick_error)?;
        Some(typed(&doc)?)
    };

    tracing::debug!(artist_count, ?mode, "Rendering home");

    Ok(render(
        mode,
        &state.config.site_title,
        || views::home_content(artist_count, artist.as_ref()),
        || views::main_image(artist.as_ref()),
    ))
}

/// A drawn id with no record means the ids are not contiguous. That is a
/// fault in the loaded data, not a page the client asked for.
fn random_pick_error(e: DatabaseError) -> AppError {
    match e {
        DatabaseError::NotFound { table, id } => {
            AppError::internal(format!("Random pick hit a gap at id {id} in {table}"))
        }
        other => db_error(other),
    }
}

/// Route: GET /about
pub async fn about(State(state): State<Arc<AppState>>, mode: RequestMode) -> Html<String> {
    let site_title = &state.config.site_title;
    render(
        mode,
        site_title,
        || views::about_content(site_title),
        || views::about_content(site_title),
    )
}
