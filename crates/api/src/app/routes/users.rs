use std::sync::Arc;

use axum::{
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use shopgate_infra::USER_REGISTERED;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub async fn guest() -> &'static str {
    "Hello, Guest!"
}

pub async fn user_home() -> &'static str {
    "Hello, User!"
}

pub async fn admin_home() -> &'static str {
    "Hello, Admin!"
}

pub async fn get_email(Extension(principal): Extension<PrincipalContext>) -> &'static str {
    tracing::debug!(username = %principal.username(), "email requested");
    "Your email is:"
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::RegisterRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(JsonRejection::MissingJsonContentType(rejection)) => {
            return errors::json_error(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "unsupported_media_type",
                rejection.body_text(),
            );
        }
        Err(rejection) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text());
        }
    };

    match services.users.register(body.into()).await {
        Ok(_) => (StatusCode::OK, USER_REGISTERED).into_response(),
        Err(e) => errors::auth_error_to_response(e, &services.realm),
    }
}
