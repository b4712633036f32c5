use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    config::AppConfig,
    database,
    error::Result,
    routes,
    services::{self, ProductService},
    store::{InMemoryProductStore, PgProductStore, ProductStore},
};

#[derive(Clone)]
pub struct AppState {
    pub service: ProductService,
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let store: Arc<dyn ProductStore> = match &config.database.url {
        Some(url) => {
            let pool = database::create_pool(url, config.database.max_connections).await?;
            Arc::new(PgProductStore::new(pool))
        }
        None => {
            tracing::warn!("DB_URL not set, falling back to the in-memory store");
            Arc::new(InMemoryProductStore::new())
        }
    };

    let service = ProductService::new(store, services::from_strategy(config.id_strategy));
    let state = AppState { service };

    let cors = match &config.cors.allowed_origins {
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .iter()
                .map(|origin| {
                    origin.parse::<HeaderValue>().map_err(|_| {
                        crate::error::AppError::ConfigError(format!(
                            "Invalid CORS origin: {}",
                            origin
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([http::header::CONTENT_TYPE])
                .allow_origin(allowed)
        }
        None => CorsLayer::new()
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_origin(Any),
    };

    let app = routes::create_router()
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(cors)
        .with_state(state);

    Ok(app)
}
