use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use ecomgen_core::{GenerationConfig, PipelineConfig};

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Directory where the CSV artifacts are written.
    pub out_dir: PathBuf,
    /// Row counts, seed and date anchor.
    pub config: GenerationConfig,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

impl GenerateOptions {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            out_dir: config.data_dir.clone(),
            config: config.generation.clone(),
        }
    }
}

/// Summary of one written artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: String,
    pub path: PathBuf,
    pub rows: u64,
    pub bytes: u64,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub anchor_date: NaiveDate,
    pub tables: Vec<TableReport>,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn rows(&self, table: &str) -> Option<u64> {
        self.tables
            .iter()
            .find(|report| report.table == table)
            .map(|report| report.rows)
    }
}
