//! Fixed analytical reports over the loaded store.
//!
//! Each query is printed as a console table and exported to
//! `<output_dir>/<query>.csv`.

pub mod engine;
pub mod errors;
pub mod export;
pub mod model;
pub mod queries;
pub mod render;
pub mod runner;

pub use engine::ReportEngine;
pub use errors::ReportError;
pub use export::write_result_csv;
pub use model::{QueryFailure, QueryOutput, QueryResult, ReportOptions, ReportSummary};
pub use queries::{QUERIES, QueryDef, query};
pub use render::render_table;
pub use runner::{open_read_only, run_query};
