mod admin;
mod artists;
mod pages;
mod static_files;

use axum::response::Html;
use maud::Markup;

use crate::api::mode::RequestMode;
use crate::api::response::AppError;
use crate::catalog::ArtistDetail;
use crate::storage::{DatabaseError, Document};
use crate::views;

pub use admin::health;
pub use artists::{catalog, detail, search_get, search_post};
pub use pages::{about, home};
pub use static_files::serve_static;

/// Map a DatabaseError to an AppError
fn db_error(e: DatabaseError) -> AppError {
    match e {
        DatabaseError::NotFound { table, id } => {
            AppError::not_found(format!("No record {id} in {table}"))
        }
        DatabaseError::EmptyTable(table) => AppError::not_found(format!("{table} is empty")),
        _ => AppError::internal(e.to_string()),
    }
}

/// Project a stored document onto a typed record; a missing required field
/// is a data fault, not a client error.
fn typed<T: serde::de::DeserializeOwned>(doc: &Document) -> Result<T, AppError> {
    doc.deserialize_into()
        .map_err(|e| AppError::internal(format!("Malformed record {}: {e}", doc.id)))
}

fn artist_details(docs: &[Document]) -> Result<Vec<ArtistDetail>, AppError> {
    docs.iter().map(typed).collect()
}

/// Wrap the page content in the layout for full requests, or return the fragment alone.
fn render(
    mode: RequestMode,
    site_title: &str,
    page: impl FnOnce() -> Markup,
    fragment: impl FnOnce() -> Markup,
) -> Html<String> {
    let markup = match mode {
        RequestMode::Full => views::layout(site_title, page()),
        RequestMode::Fragment => fragment(),
    };
    Html(markup.into_string())
}
