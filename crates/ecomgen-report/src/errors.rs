use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted by the reporter.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("store not found: {} (run the load stage first)", .path.display())]
    MissingStore { path: PathBuf },
    #[error("cannot open store {}: {source}", .path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("query '{query}' needs table '{table}', which is missing from the store")]
    MissingTable { query: String, table: String },
    #[error("query '{query}' failed: {source}")]
    Query {
        query: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("unknown query: {0}")]
    UnknownQuery(String),
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
