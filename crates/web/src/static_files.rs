//! Static file serving

use std::path::Path;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::debug;

/// Serve the bytes of `path` verbatim, with a content type derived from the
/// file extension. A missing or unreadable file is a 404, never an error.
pub fn serve_file(path: &Path) -> Response {
    match std::fs::read(path) {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type_for(path))],
            bytes,
        )
            .into_response(),
        Err(e) => {
            debug!("static miss {}: {}", path.display(), e);
            not_found()
        }
    }
}

/// Plain 404 response.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "File not found").into_response()
}

pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("html") => "text/html",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
