use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::{
    error::Result,
    models::{Product, ProductPayload},
    AppState,
};

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = state.service.create(payload).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.service.list().await?;

    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let product = state.service.get(&id).await?;

    Ok(Json(product))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Product>> {
    let product = state.service.update(&id, payload).await?;

    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    state.service.delete(&id).await?;

    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
