use axum::http::StatusCode;

use crate::app::errors;

pub const GREETING: &str = "Hello from shopgate";

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn greeting() -> &'static str {
    GREETING
}

/// Reached only after the security filter has let the request through.
pub async fn not_found(uri: axum::http::Uri) -> axum::response::Response {
    errors::json_error(
        StatusCode::NOT_FOUND,
        "not_found",
        format!("no route for {}", uri.path()),
    )
}
