use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use shopgate_auth::{AccessRules, AuthError, Principal};
use shopgate_infra::UserDetailsService;

use crate::app::errors;
use crate::context::PrincipalContext;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct SecurityState {
    pub users: UserDetailsService,
    pub rules: Arc<AccessRules>,
    pub realm: Arc<str>,
}

/// Username/password pair decoded from an `Authorization: Basic` header.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl core::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BasicAuthError {
    #[error("authorization header is not valid ASCII")]
    NotAscii,

    #[error("failed to decode basic authentication token")]
    Base64,

    #[error("basic authentication token is not valid UTF-8")]
    NotUtf8,

    #[error("invalid basic authentication token")]
    MissingSeparator,
}

/// Security filter chain: authenticate Basic credentials (if any), then apply
/// the first matching access rule.
///
/// Bad credentials are rejected even on `permitAll` routes.
pub async fn security_middleware(
    State(state): State<SecurityState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let request_id = Uuid::now_v7();
    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path()
    );

    async move {
        let principal = match authenticate(&state, req.headers()).await {
            Ok(p) => p,
            Err(res) => return with_request_id(res, request_id),
        };

        let method = req.method().clone();
        let path = req.uri().path().to_string();
        if let Err(denied) =
            crate::authz::authorize_request(&state.rules, &method, &path, principal.as_ref())
        {
            return with_request_id(errors::access_denied_to_response(denied, &state.realm), request_id);
        }

        if let Some(principal) = principal {
            req.extensions_mut().insert(PrincipalContext::new(principal));
        }

        let res = next.run(req).await;
        tracing::debug!(status = res.status().as_u16(), "request completed");
        with_request_id(res, request_id)
    }
    .instrument(span)
    .await
}

/// `Ok(None)` for anonymous requests; `Err(response)` when credentials were
/// presented but could not be verified.
async fn authenticate(state: &SecurityState, headers: &HeaderMap) -> Result<Option<Principal>, Response> {
    let creds = match extract_basic(headers) {
        Ok(Some(c)) => c,
        Ok(None) => return Ok(None),
        Err(e) => {
            tracing::info!(error = %e, "malformed basic authorization header");
            return Err(errors::unauthorized(&state.realm, e.to_string()));
        }
    };

    match state.users.authenticate(&creds.username, &creds.password).await {
        Ok(principal) => {
            tracing::debug!(username = %principal.username(), "authenticated");
            Ok(Some(principal))
        }
        Err(e @ (AuthError::Store(_) | AuthError::Hashing(_))) => {
            tracing::error!(error = %e, "credential check failed");
            Err(errors::auth_error_to_response(e, &state.realm))
        }
        Err(e) => {
            tracing::info!(username = %creds.username, "basic authentication failed");
            Err(errors::auth_error_to_response(e, &state.realm))
        }
    }
}

/// Decode `Authorization: Basic ...`.
///
/// Returns `Ok(None)` when the header is absent or uses another scheme.
pub fn extract_basic(headers: &HeaderMap) -> Result<Option<BasicCredentials>, BasicAuthError> {
    let header = match headers.get(axum::http::header::AUTHORIZATION) {
        Some(h) => h,
        None => return Ok(None),
    };

    let header = header.to_str().map_err(|_| BasicAuthError::NotAscii)?.trim();

    let token = match header.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("basic") => token.trim(),
        _ if header.eq_ignore_ascii_case("basic") => "",
        _ => return Ok(None),
    };

    let decoded = STANDARD.decode(token).map_err(|_| BasicAuthError::Base64)?;
    let decoded = String::from_utf8(decoded).map_err(|_| BasicAuthError::NotUtf8)?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or(BasicAuthError::MissingSeparator)?;

    Ok(Some(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    }))
}

fn with_request_id(mut res: Response, request_id: Uuid) -> Response {
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}
