//! Error pages and the request-fatal error type.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::observability::metrics;
use crate::pages::templates::{NotFoundHtml, PageContent, ServerErrorHtml};

/// Failures that abort the current request with the 500 page.
///
/// Backend absence and rejection are never represented here; handlers
/// recover from those with a notification.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("age must be a whole number, got '{0}'")]
    InvalidAge(String),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        server_error_page()
    }
}

/// The static 404 page.
pub fn not_found_page() -> Response {
    metrics::record_page("not_found", 404);
    (
        StatusCode::NOT_FOUND,
        Html(NotFoundHtml.page(Vec::new()).to_string()),
    )
        .into_response()
}

/// The static 500 page.
pub fn server_error_page() -> Response {
    metrics::record_page("server_error", 500);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(ServerErrorHtml.page(Vec::new()).to_string()),
    )
        .into_response()
}

/// Router fallback.
pub async fn not_found() -> Response {
    not_found_page()
}

/// Turns a handler panic into the 500 page.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!(panic = %detail, "Handler panicked");
    server_error_page()
}
