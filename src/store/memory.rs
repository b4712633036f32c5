use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{AppError, Result};
use crate::models::Product;
use crate::store::ProductStore;

/// Map-backed store used in tests and when no database is configured.
#[derive(Default)]
pub struct InMemoryProductStore {
    products: RwLock<HashMap<String, Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, product: &Product) -> Result<()> {
        let mut products = self.products.write().await;
        // Identifiers are unique, same as the primary key in Postgres.
        match products.entry(product.id.clone()) {
            Entry::Occupied(_) => Err(AppError::StoreError(format!(
                "Duplicate product id: {}",
                product.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(product.clone());
                Ok(())
            }
        }
    }

    async fn list(&self) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(id).cloned())
    }

    async fn update(&self, product: &Product) -> Result<bool> {
        let mut products = self.products.write().await;
        match products.get_mut(&product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut products = self.products.write().await;
        Ok(products.remove(id).is_some())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
