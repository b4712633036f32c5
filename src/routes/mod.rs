mod health;
mod products;

use axum::{
    routing::{get, put},
    Router,
};

use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            put(products::update_product)
                .get(products::get_product)
                .delete(products::delete_product),
        )
}
