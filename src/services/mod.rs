mod id_generator;
mod product_service;

pub use id_generator::{from_strategy, IdGenerator, NumericTokenIdGenerator, UuidIdGenerator};
pub use product_service::ProductService;
