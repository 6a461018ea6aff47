//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: product list and user directory wiring
//! - `routes/`: HTTP handlers
//! - `dto.rs`: request bodies
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use shopgate_auth::{AccessRules, default_rules};
use shopgate_infra::ShopgateConfig;

use crate::middleware::{self, SecurityState};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router from configuration (public entrypoint used by `main.rs`).
pub async fn build_app(config: &ShopgateConfig) -> anyhow::Result<Router> {
    let services = services::build_services(config).await?;
    Ok(build_router(services, default_rules()))
}

/// Wrap every route (and the 404 fallback) in the security filter.
pub fn build_router(services: services::AppServices, rules: AccessRules) -> Router {
    let security = SecurityState {
        users: services.users.clone(),
        rules: Arc::new(rules),
        realm: services.realm.clone(),
    };

    // Outermost first: the security filter runs before any handler state is touched.
    routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn_with_state(
                security,
                middleware::security_middleware,
            ))
            .layer(Extension(Arc::new(services))),
    )
}
