use std::sync::Arc;

use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::{Product, ProductPayload};
use crate::services::IdGenerator;
use crate::store::ProductStore;

/// Business logic for the product resource: validation first, then a
/// single store call. No retries, no partial mutation.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
    ids: Arc<dyn IdGenerator>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    #[instrument(skip(self, payload), fields(product_name = %payload.name))]
    pub async fn create(&self, payload: ProductPayload) -> Result<Product> {
        let price = validate(&payload)?;

        let product = Product {
            id: self.ids.generate(),
            name: payload.name,
            description: payload.description,
            price,
        };
        self.store.insert(&product).await?;

        tracing::info!(id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>> {
        self.store.list().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Product> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
    }

    /// Full replacement of the mutable fields; the identifier never
    /// changes. Validation runs before the store is touched.
    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: &str, payload: ProductPayload) -> Result<Product> {
        let price = validate(&payload)?;

        let product = Product {
            id: id.to_string(),
            name: payload.name,
            description: payload.description,
            price,
        };
        if !self.store.update(&product).await? {
            return Err(AppError::NotFound("Product not found".to_string()));
        }

        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound("Product not found".to_string()));
        }

        tracing::info!(%id, "Product deleted");
        Ok(())
    }

    pub async fn store_health(&self) -> Result<()> {
        self.store.health_check().await
    }
}

/// The one validation routine shared by create and update: `name` must
/// be non-empty after trimming, `price` present and non-negative.
fn validate(payload: &ProductPayload) -> Result<f64> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation {
            field: "name",
            message: "Product name is required".to_string(),
        });
    }

    match payload.price {
        Some(price) if price >= 0.0 => Ok(price),
        Some(_) => Err(AppError::Validation {
            field: "price",
            message: "Product price must be a positive number".to_string(),
        }),
        None => Err(AppError::Validation {
            field: "price",
            message: "Product price is required".to_string(),
        }),
    }
}
