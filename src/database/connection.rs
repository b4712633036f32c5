use crate::error::{AppError, Result};
use sqlx::{PgPool, postgres::PgPoolOptions};

pub async fn create_pool(url: &str, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| AppError::StoreError(format!("Failed to run migrations: {}", e)))?;

    tracing::info!(
        "Database connection established with {} max connections",
        max_connections
    );

    Ok(pool)
}
