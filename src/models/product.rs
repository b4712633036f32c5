use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

/// Request body shared by create and update. `price` stays optional so
/// that an absent field is reported as a validation error rather than a
/// deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPayload {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
}
