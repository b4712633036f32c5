mod memory;
mod postgres;

pub use memory::InMemoryProductStore;
pub use postgres::PgProductStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Product;

/// Persistence contract for products.
///
/// Implementations provide per-operation atomicity; the service layer
/// never retries and performs a single store call per request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persist a new product under its pre-assigned identifier.
    async fn insert(&self, product: &Product) -> Result<()>;

    /// All products in store-native order.
    async fn list(&self) -> Result<Vec<Product>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>>;

    /// Replace the mutable fields of the product with a matching id.
    /// Returns false when no record matched.
    async fn update(&self, product: &Product) -> Result<bool>;

    /// Returns false when no record matched.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Cheap connectivity probe for the readiness endpoint.
    async fn health_check(&self) -> Result<()>;
}
