use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Core(#[from] ecomgen_core::Error),
    #[error("no parent rows in '{0}' to draw foreign keys from")]
    EmptyPool(&'static str),
    #[error("unsupported table: {0}")]
    Unsupported(String),
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
