//! Core contracts shared by the ecomgen pipeline stages.
//!
//! This crate defines the compiled-in table catalog (columns, primary and
//! foreign keys), the dependency ordering derived from it, and the pipeline
//! configuration consumed by the generator, loader and reporter.

pub mod config;
pub mod error;
pub mod graph;
pub mod schema;
pub mod validation;

pub use config::{GenerationConfig, PipelineConfig};
pub use error::{Error, Result};
pub use graph::{dependency_order, drop_order};
pub use schema::{
    CATALOG, CUSTOMERS, ColumnDef, ColumnKind, ForeignKeyDef, ORDER_ITEMS, ORDERS, PAYMENTS,
    PRODUCTS, TableDef, table,
};
pub use validation::validate_catalog;
