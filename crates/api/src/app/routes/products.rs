use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    routing::{delete, post},
    Json, Router,
};

use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/Products", post(add_product).get(list_products))
        .route("/Products/:product", delete(delete_product))
}

/// The raw request body is stored as the product. Invalid UTF-8 is replaced
/// rather than rejected.
pub async fn add_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> &'static str {
    services.products.add(String::from_utf8_lossy(&body))
}

pub async fn list_products(Extension(services): Extension<Arc<AppServices>>) -> Json<Vec<String>> {
    Json(services.products.list())
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(product): Path<String>,
) -> String {
    services.products.delete(&product)
}
