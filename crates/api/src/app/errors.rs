use axum::http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE};
use axum::response::IntoResponse;
use serde_json::json;

use shopgate_auth::{AccessDenied, AuthError};

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// 401 with a `WWW-Authenticate: Basic realm="..."` challenge.
pub fn unauthorized(realm: &str, message: impl Into<String>) -> axum::response::Response {
    let mut res = json_error(StatusCode::UNAUTHORIZED, "unauthorized", message);
    if let Ok(challenge) = HeaderValue::from_str(&format!("Basic realm=\"{realm}\"")) {
        res.headers_mut().insert(WWW_AUTHENTICATE, challenge);
    }
    res
}

pub fn access_denied_to_response(denied: AccessDenied, realm: &str) -> axum::response::Response {
    match denied {
        AccessDenied::Unauthenticated => unauthorized(realm, denied.to_string()),
        AccessDenied::Forbidden { .. } => {
            json_error(StatusCode::FORBIDDEN, "forbidden", denied.to_string())
        }
    }
}

pub fn auth_error_to_response(err: AuthError, realm: &str) -> axum::response::Response {
    match err {
        AuthError::UserNotFound(_) | AuthError::BadCredentials => {
            unauthorized(realm, AuthError::BadCredentials.to_string())
        }
        AuthError::Hashing(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "hashing_error", msg)
        }
        AuthError::Store(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}
