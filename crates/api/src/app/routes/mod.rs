use axum::{
    routing::{get, post},
    Router,
};

pub mod products;
pub mod system;
pub mod users;

/// Every endpoint the service exposes. Access control is applied by the
/// security layer wrapped around this router, not per route.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::greeting))
        .route("/health", get(system::health))
        .merge(products::router())
        .route("/guest", get(users::guest))
        .route("/user/home", get(users::user_home))
        .route("/admin/home", get(users::admin_home))
        .route("/getEmail", get(users::get_email))
        .route("/register", post(users::register))
        .fallback(system::not_found)
}
