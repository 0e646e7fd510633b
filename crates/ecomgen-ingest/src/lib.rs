//! Bulk loader for the generated CSV artifacts.
//!
//! Recreates the fixed schema in a SQLite store, loads each table inside its
//! own transaction and reports data-quality findings without failing on them.

pub mod engine;
pub mod errors;
pub mod loader;
pub mod model;
pub mod report;
pub mod source;
pub mod store;
pub mod validation;

pub use engine::{IngestEngine, preflight};
pub use errors::IngestError;
pub use loader::{LoadStatus, load_table};
pub use model::{IngestOptions, IngestResult};
pub use report::render_validation_report;
pub use source::{SourceTable, read_source};
pub use store::{open_store, reset_schema, stored_row_count};
pub use validation::{ColumnNulls, OrphanCount, TableValidation, ValidationReport, validate};
