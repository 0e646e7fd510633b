use ecomgen_core::PipelineConfig;
use ecomgen_generate::{GenerateOptions, GenerationEngine};

use crate::errors::CliResult;

pub fn run(config: &PipelineConfig) -> CliResult<()> {
    let options = GenerateOptions::from_config(config);
    let result = GenerationEngine::new(options).run()?;
    let report = &result.report;

    println!(
        "Generated {} tables in {} (seed {}, anchor {})",
        report.tables.len(),
        result.out_dir.display(),
        report.seed,
        report.anchor_date
    );
    for table in &report.tables {
        println!(
            "  {:<12} {:>6} rows  {:>9} bytes  {}",
            table.table,
            table.rows,
            table.bytes,
            table.path.display()
        );
    }

    Ok(())
}
