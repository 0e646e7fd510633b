use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use ecomgen_core::PipelineConfig;

use crate::validation::ValidationReport;

/// Options for the load stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Directory holding the five source CSV files.
    pub data_dir: PathBuf,
    /// SQLite store, created if absent.
    pub db_path: PathBuf,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

impl IngestOptions {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            db_path: config.db_path.clone(),
        }
    }
}

/// Result of a load run.
#[derive(Debug, Clone)]
pub struct IngestResult {
    pub db_path: PathBuf,
    pub validation: ValidationReport,
    pub duration_ms: u64,
}
