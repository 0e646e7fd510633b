use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors emitted by the loader.
///
/// Data-quality findings (nulls, duplicate keys, dangling references, a table
/// that failed to load) are not errors; they land in the validation report.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Core(#[from] ecomgen_core::Error),
    #[error("missing input file for '{table}': {}", .path.display())]
    MissingInput { table: &'static str, path: PathBuf },
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot open store {}: {source}", .path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("header mismatch in {}: expected [{expected}], found [{found}]", .path.display())]
    HeaderMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },
    #[error(
        "wrong column count in {} line {line}: expected {expected}, found {found}",
        .path.display()
    )]
    ColumnCount {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("invalid value in {} line {line}, column '{column}': {message}", .path.display())]
    InvalidValue {
        path: PathBuf,
        line: u64,
        column: &'static str,
        message: String,
    },
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
