use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::Product;
use crate::store::ProductStore;

/// Postgres-backed product store.
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn insert(&self, product: &Product) -> Result<()> {
        sqlx::query("INSERT INTO products (id, name, description, price) VALUES ($1, $2, $3, $4)")
            .bind(&product.id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products")
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    async fn update(&self, product: &Product) -> Result<bool> {
        let result =
            sqlx::query("UPDATE products SET name = $2, description = $3, price = $4 WHERE id = $1")
                .bind(&product.id)
                .bind(&product.name)
                .bind(&product.description)
                .bind(product.price)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
