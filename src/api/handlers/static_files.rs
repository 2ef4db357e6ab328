use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::path::{Component, PathBuf};
use std::sync::Arc;

use crate::api::response::AppError;
use crate::AppState;

/// Serve a file from the static directory (compiled stylesheet, images, scripts).
/// Route: GET /static/*path
pub async fn serve_static(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response, AppError> {
    let relative = PathBuf::from(&path);
    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return Err(AppError::bad_request("Invalid static path"));
    }

    let full_path = PathBuf::from(&state.config.assets.static_dir).join(&relative);
    let data = match tokio::fs::read(&full_path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::not_found("Asset not found"));
        }
        Err(e) => return Err(AppError::internal(format!("Failed to read asset: {e}"))),
    };

    let mime_type = mime_guess::from_path(&full_path).first_or_octet_stream();

    let mut response = (StatusCode::OK, data).into_response();
    let headers = response.headers_mut();

    if let Ok(value) = mime_type.as_ref().parse() {
        headers.insert(header::CONTENT_TYPE, value);
    }

    // Assets are rebuilt on restart only
    headers.insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("public, max-age=3600"),
    );

    Ok(response)
}
