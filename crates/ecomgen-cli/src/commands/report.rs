use ecomgen_core::PipelineConfig;
use ecomgen_report::{ReportEngine, ReportOptions, render_table};

use crate::errors::{CliError, CliResult};

pub fn run(config: &PipelineConfig, keep_going: bool, only: Vec<String>) -> CliResult<()> {
    let engine = ReportEngine::new(ReportOptions {
        db_path: config.db_path.clone(),
        output_dir: config.output_dir.clone(),
        keep_going,
        only,
    });
    let total = engine.selected()?.len();

    let summary = engine.run_with(|query, result| {
        println!("{}\n", render_table(query, result));
    })?;

    if !summary.is_success() {
        return Err(CliError::ReportFailures {
            failed: summary
                .failures
                .iter()
                .map(|failure| failure.query.clone())
                .collect(),
            total,
        });
    }

    println!(
        "Exported {} reports to {}",
        summary.outputs.len(),
        config.output_dir.display()
    );
    Ok(())
}
