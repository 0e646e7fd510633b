//! Synthetic e-commerce dataset generator.
//!
//! Parents are generated before children and children draw their foreign
//! keys from in-memory key pools, so the five CSV artifacts are
//! referentially consistent by construction. Generation is deterministic for
//! a given seed and anchor date.

pub mod engine;
pub mod errors;
pub mod fakers;
pub mod model;
pub mod output;
pub mod pools;
pub mod records;

pub use engine::{GenerationEngine, GenerationResult, generate_dataset, write_dataset};
pub use errors::GenerationError;
pub use model::{GenerateOptions, GenerationReport, TableReport};
pub use records::{
    Customer, Dataset, Order, OrderItem, OrderStatus, Payment, PaymentMethod, PaymentStatus,
    Product, Record,
};
