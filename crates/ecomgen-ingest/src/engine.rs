use std::time::Instant;

use tracing::info;

use ecomgen_core::{CATALOG, dependency_order, validate_catalog};

use crate::errors::IngestError;
use crate::loader::load_table;
use crate::model::{IngestOptions, IngestResult};
use crate::source::{SourceTable, read_source};
use crate::store::{open_store, reset_schema, set_foreign_keys};
use crate::validation::validate;

/// Loads the generated CSV files into the store and validates the result.
#[derive(Debug, Clone)]
pub struct IngestEngine {
    options: IngestOptions,
}

impl IngestEngine {
    pub fn new(options: IngestOptions) -> Self {
        Self { options }
    }

    pub fn run(&self) -> Result<IngestResult, IngestError> {
        let start = Instant::now();
        validate_catalog(CATALOG)?;
        let tables = dependency_order(CATALOG)?;

        // Nothing touches the store until every input exists and parses.
        preflight(&self.options)?;
        let sources = tables
            .iter()
            .map(|table| read_source(*table, &self.options.data_dir))
            .collect::<Result<Vec<SourceTable>, _>>()?;

        let mut conn = open_store(&self.options.db_path)?;
        reset_schema(&conn, &tables)?;

        // A rolled-back parent must not empty its children; dangling
        // references are counted by validation instead.
        set_foreign_keys(&conn, false)?;
        let mut loads = Vec::with_capacity(sources.len());
        for source in &sources {
            loads.push(load_table(&mut conn, source)?);
        }
        set_foreign_keys(&conn, true)?;

        let validation = validate(&conn, &self.options.db_path, &sources, &loads)?;
        let duration_ms = start.elapsed().as_millis() as u64;

        info!(
            db_path = %self.options.db_path.display(),
            tables = validation.tables.len(),
            failed_tables = validation.failed_tables().len(),
            nulls = validation.total_nulls(),
            duplicate_keys = validation.total_duplicates(),
            orphans = validation.total_orphans(),
            duration_ms,
            "load completed"
        );

        Ok(IngestResult {
            db_path: self.options.db_path.clone(),
            validation,
            duration_ms,
        })
    }
}

/// Fail before any side effect if an input file is missing.
pub fn preflight(options: &IngestOptions) -> Result<(), IngestError> {
    for table in CATALOG {
        let path = options.data_dir.join(table.file_name);
        if !path.is_file() {
            return Err(IngestError::MissingInput {
                table: table.name,
                path,
            });
        }
    }
    Ok(())
}
