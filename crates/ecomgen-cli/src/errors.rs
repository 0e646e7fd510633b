use ecomgen_core::Error as CoreError;
use ecomgen_generate::GenerationError;
use ecomgen_ingest::IngestError;
use ecomgen_report::ReportError;
use thiserror::Error;

/// Fatal CLI errors. The binary prints `fatal: <error>` and exits 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{stage} stage failed: configuration error: {source}")]
    Config {
        stage: &'static str,
        #[source]
        source: CoreError,
    },
    #[error("logging error: {0}")]
    Logging(String),
    #[error("generate stage failed: {0}")]
    Generate(#[from] GenerationError),
    #[error("load stage failed: {0}")]
    Load(#[from] IngestError),
    #[error("report stage failed: {0}")]
    Report(#[from] ReportError),
    #[error("report stage failed: {} of {total} queries failed ({})", .failed.len(), .failed.join(", "))]
    ReportFailures { failed: Vec<String>, total: usize },
}

pub type CliResult<T> = Result<T, CliError>;
