use std::sync::Arc;

use rand::Rng;
use uuid::Uuid;

use crate::config::IdStrategy;

/// Identifier-minting strategy for new products.
///
/// The source variants disagreed on who assigns identifiers (database
/// auto-keys vs. service-side random tokens), so the strategy is
/// injected rather than hard-coded.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Time-ordered UUID identifiers.
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> String {
        Uuid::now_v7().to_string()
    }
}

/// Random 16-digit numeric-string tokens.
pub struct NumericTokenIdGenerator;

impl IdGenerator for NumericTokenIdGenerator {
    fn generate(&self) -> String {
        let token: u64 = rand::thread_rng().gen_range(0..10_000_000_000_000_000);
        format!("{:016}", token)
    }
}

pub fn from_strategy(strategy: IdStrategy) -> Arc<dyn IdGenerator> {
    match strategy {
        IdStrategy::Uuid => Arc::new(UuidIdGenerator),
        IdStrategy::NumericToken => Arc::new(NumericTokenIdGenerator),
    }
}
