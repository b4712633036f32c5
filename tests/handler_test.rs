//! Black-box tests for the HTTP surface: routing, status codes, and
//! JSON bodies, driven through the full router over the in-memory
//! store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use async_trait::async_trait;
use catalog_back::models::Product;
use catalog_back::routes;
use catalog_back::services::{ProductService, UuidIdGenerator};
use catalog_back::store::{InMemoryProductStore, ProductStore};
use catalog_back::{AppError, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let service = ProductService::new(
        Arc::new(InMemoryProductStore::new()),
        Arc::new(UuidIdGenerator),
    );
    routes::create_router().with_state(AppState { service })
}

/// Store whose connection is gone; every operation fails.
struct UnavailableStore;

fn connection_refused() -> AppError {
    AppError::StoreError("connection refused".to_string())
}

#[async_trait]
impl ProductStore for UnavailableStore {
    async fn insert(&self, _product: &Product) -> catalog_back::Result<()> {
        Err(connection_refused())
    }

    async fn list(&self) -> catalog_back::Result<Vec<Product>> {
        Err(connection_refused())
    }

    async fn find_by_id(&self, _id: &str) -> catalog_back::Result<Option<Product>> {
        Err(connection_refused())
    }

    async fn update(&self, _product: &Product) -> catalog_back::Result<bool> {
        Err(connection_refused())
    }

    async fn delete(&self, _id: &str) -> catalog_back::Result<bool> {
        Err(connection_refused())
    }

    async fn health_check(&self) -> catalog_back::Result<()> {
        Err(connection_refused())
    }
}

fn app_with_unavailable_store() -> Router {
    let service = ProductService::new(Arc::new(UnavailableStore), Arc::new(UuidIdGenerator));
    routes::create_router().with_state(AppState { service })
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_product(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/products")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn put_product(id: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(format!("/products/{}", id))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn root_reports_liveness() {
    let response = app().oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"Server is running");
}

#[tokio::test]
async fn readiness_reports_store_connected() {
    let response = app().oneshot(get("/health/ready")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn store_fault_maps_to_500_with_generic_body() {
    let app = app_with_unavailable_store();

    let response = app.clone().oneshot(get("/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Store unavailable");

    let response = app
        .oneshot(post_product(json!({ "name": "Pen", "price": 1.5 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Store unavailable");
}

#[tokio::test]
async fn readiness_returns_500_when_store_is_down() {
    let response = app_with_unavailable_store()
        .oneshot(get("/health/ready"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn create_product_returns_201_with_generated_id() {
    let response = app()
        .oneshot(post_product(
            json!({ "name": "Pen", "price": 1.5, "description": "blue" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let product: Product = json_body(response.into_body()).await;
    assert!(!product.id.is_empty());
    assert_eq!(product.name, "Pen");
    assert_eq!(product.description.as_deref(), Some("blue"));
    assert_eq!(product.price, 1.5);
}

#[tokio::test]
async fn create_product_rejects_blank_name() {
    for name in ["", "   "] {
        let response = app()
            .oneshot(post_product(json!({ "name": name, "price": 1.0 })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["error"], "Product name is required");
    }
}

#[tokio::test]
async fn create_product_rejects_missing_or_negative_price() {
    let response = app()
        .oneshot(post_product(json!({ "name": "Pen" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Product price is required");

    let response = app()
        .oneshot(post_product(json!({ "name": "Pen", "price": -2.0 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_product_accepts_zero_price() {
    let response = app()
        .oneshot(post_product(json!({ "name": "Sample", "price": 0 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn get_unknown_product_returns_404() {
    let response = app().oneshot(get("/products/no-such-id")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn created_product_round_trips_through_get() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_product(json!({ "name": "Pen", "price": 1.5 })))
        .await
        .unwrap();
    let created: Product = json_body(response.into_body()).await;

    let response = app
        .oneshot(get(&format!("/products/{}", created.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Product = json_body(response.into_body()).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn update_replaces_fields_and_is_idempotent() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_product(json!({ "name": "Pen", "price": 1.5 })))
        .await
        .unwrap();
    let created: Product = json_body(response.into_body()).await;

    let new_fields = json!({ "name": "Marker", "description": "red", "price": 2.0 });
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(put_product(&created.id, new_fields.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(get(&format!("/products/{}", created.id)))
        .await
        .unwrap();
    let fetched: Product = json_body(response.into_body()).await;
    assert_eq!(fetched.name, "Marker");
    assert_eq!(fetched.description.as_deref(), Some("red"));
    assert_eq!(fetched.price, 2.0);
}

#[tokio::test]
async fn update_unknown_product_returns_404() {
    let response = app()
        .oneshot(put_product("no-such-id", json!({ "name": "Pen", "price": 1.0 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_with_invalid_payload_returns_400() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_product(json!({ "name": "Pen", "price": 1.5 })))
        .await
        .unwrap();
    let created: Product = json_body(response.into_body()).await;

    let response = app
        .clone()
        .oneshot(put_product(&created.id, json!({ "name": "", "price": 2.0 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The stored record is untouched.
    let response = app
        .oneshot(get(&format!("/products/{}", created.id)))
        .await
        .unwrap();
    let fetched: Product = json_body(response.into_body()).await;
    assert_eq!(fetched.name, "Pen");
}

#[tokio::test]
async fn delete_removes_product_exactly_once() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_product(json!({ "name": "Pen", "price": 1.5 })))
        .await
        .unwrap();
    let created: Product = json_body(response.into_body()).await;

    let response = app
        .clone()
        .oneshot(delete(&format!("/products/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Product deleted successfully");

    let response = app
        .clone()
        .oneshot(get(&format!("/products/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(delete(&format!("/products/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_every_created_product() {
    let app = app();

    let mut created_names = Vec::new();
    for i in 0..4 {
        let name = format!("Item {}", i);
        let response = app
            .clone()
            .oneshot(post_product(json!({ "name": name.clone(), "price": i as f64 })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        created_names.push(name);
    }

    let response = app.oneshot(get("/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let mut products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 4);
    products.sort_by(|a, b| a.name.cmp(&b.name));
    for (product, name) in products.iter().zip(&created_names) {
        assert_eq!(&product.name, name);
    }
}
