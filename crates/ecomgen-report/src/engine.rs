use std::time::Instant;

use tracing::{error, info};

use crate::errors::ReportError;
use crate::export::write_result_csv;
use crate::model::{QueryFailure, QueryOutput, QueryResult, ReportOptions, ReportSummary};
use crate::queries::{QUERIES, QueryDef, query};
use crate::runner::{open_read_only, run_query};

/// Runs the report catalog against a loaded store.
#[derive(Debug, Clone)]
pub struct ReportEngine {
    options: ReportOptions,
}

impl ReportEngine {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Queries selected for this run, in catalog order.
    pub fn selected(&self) -> Result<Vec<&'static QueryDef>, ReportError> {
        if self.options.only.is_empty() {
            return Ok(QUERIES.to_vec());
        }
        for name in &self.options.only {
            if query(name).is_none() {
                return Err(ReportError::UnknownQuery(name.clone()));
            }
        }
        Ok(QUERIES
            .iter()
            .copied()
            .filter(|query| self.options.only.iter().any(|name| name == query.name))
            .collect())
    }

    pub fn run(&self) -> Result<ReportSummary, ReportError> {
        self.run_with(|_, _| {})
    }

    /// Execute each selected query, export it and hand the result to
    /// `on_result` (the CLI prints it).
    ///
    /// Without `keep_going` the first failure aborts the run. With it, the
    /// failure is recorded in the summary and the next query runs.
    pub fn run_with<F>(&self, mut on_result: F) -> Result<ReportSummary, ReportError>
    where
        F: FnMut(&QueryDef, &QueryResult),
    {
        let start = Instant::now();
        let queries = self.selected()?;
        let conn = open_read_only(&self.options.db_path)?;

        let mut summary = ReportSummary::default();
        for query in queries {
            let outcome = run_query(&conn, query).and_then(|result| {
                let path = write_result_csv(&result, &self.options.output_dir)?;
                Ok((result, path))
            });

            match outcome {
                Ok((result, path)) => {
                    on_result(query, &result);
                    info!(
                        query = query.name,
                        rows = result.row_count(),
                        path = %path.display(),
                        "report exported"
                    );
                    summary.outputs.push(QueryOutput {
                        query: query.name.to_string(),
                        path,
                        rows: result.row_count() as u64,
                    });
                }
                Err(err) if self.options.keep_going => {
                    error!(query = query.name, error = %err, "report failed, continuing");
                    summary.failures.push(QueryFailure {
                        query: query.name.to_string(),
                        message: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        summary.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            exported = summary.outputs.len(),
            failed = summary.failures.len(),
            duration_ms = summary.duration_ms,
            "reports completed"
        );
        Ok(summary)
    }
}
