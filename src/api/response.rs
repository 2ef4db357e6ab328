use axum::extract::rejection::FormRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::de::DeserializeOwned;

use crate::views;

// ============================================================================
// Unified error type for handlers
// ============================================================================

/// Handler error: a client failure (4xx) or a server error (5xx).
#[derive(Debug)]
pub enum AppError {
    Fail(StatusCode, String),
    Error(StatusCode, String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Fail(code, msg) => {
                (code, Html(views::error_block(code.as_u16(), &msg).into_string())).into_response()
            }
            AppError::Error(code, msg) => {
                // Internal details stay in the logs
                tracing::error!(status = code.as_u16(), error = %msg, "Request failed");
                (
                    code,
                    Html(views::error_block(code.as_u16(), "Something went wrong").into_string()),
                )
                    .into_response()
            }
        }
    }
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::Fail(StatusCode::BAD_REQUEST, message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::Fail(StatusCode::NOT_FOUND, message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Error(StatusCode::INTERNAL_SERVER_ERROR, message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Fail(code, _) | AppError::Error(code, _) => *code,
        }
    }
}

// ============================================================================
// Custom extractors (reject with AppError)
// ============================================================================

/// Drop-in replacement for `axum::Form` that rejects with a 400 fragment.
pub struct AppForm<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for AppForm<T>
where
    axum::Form<T>: FromRequest<S, Rejection = FormRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, AppError> {
        match Form::<T>::from_request(req, state).await {
            Ok(Form(value)) => Ok(AppForm(value)),
            Err(rejection) => {
                let message = match rejection {
                    FormRejection::InvalidFormContentType(_) => {
                        "Expected a form-encoded request body".to_string()
                    }
                    other => format!("Invalid form submission: {}", other.body_text()),
                };
                Err(AppError::bad_request(message))
            }
        }
    }
}

/// Drop-in replacement for `axum::extract::Query` that rejects with a 400 fragment.
pub struct AppQuery<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, AppError> {
        let query = parts.uri.query().unwrap_or_default();
        serde_qs::from_str(query)
            .map(AppQuery)
            .map_err(|e| AppError::bad_request(format!("Invalid query parameter: {e}")))
    }
}
