use std::path::Path;

use ecomgen_core::PipelineConfig;
use ecomgen_ingest::{IngestEngine, IngestOptions, render_validation_report};

use crate::errors::CliResult;

pub fn run(config: &PipelineConfig, metrics: Option<&Path>) -> CliResult<()> {
    let result = IngestEngine::new(IngestOptions::from_config(config)).run()?;

    println!("{}", render_validation_report(&result.validation));

    if let Some(path) = metrics {
        result.validation.write_json(path)?;
        tracing::info!(event = "metrics_written", path = %path.display());
    }

    println!(
        "\nLoad complete. Store written to {}",
        result.db_path.display()
    );
    Ok(())
}
