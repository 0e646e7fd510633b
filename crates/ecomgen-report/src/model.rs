use std::path::PathBuf;

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

/// Options for the report stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Store written by the load stage; opened read-only.
    pub db_path: PathBuf,
    /// Directory receiving `<query>.csv` exports.
    pub output_dir: PathBuf,
    /// Skip a failed query and continue with the rest.
    pub keep_going: bool,
    /// Restrict the run to these queries; empty runs all of them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub only: Vec<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("db").join("ecom.db"),
            output_dir: PathBuf::from("output"),
            keep_going: false,
            only: Vec::new(),
        }
    }
}

/// Columns and rows returned by one query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Rows rendered as text, the shared form of console and CSV output.
    pub fn text_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(format_value).collect())
            .collect()
    }
}

/// Text form of a cell. Reals keep two decimals so exports are stable.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(value) => value.to_string(),
        Value::Real(value) => format!("{value:.2}"),
        Value::Text(value) => value.clone(),
        Value::Blob(bytes) => format!("<{} bytes>", bytes.len()),
    }
}

/// One exported report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOutput {
    pub query: String,
    pub path: PathBuf,
    pub rows: u64,
}

/// A query that failed while `keep_going` was set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryFailure {
    pub query: String,
    pub message: String,
}

/// Outcome of a report run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub outputs: Vec<QueryOutput>,
    pub failures: Vec<QueryFailure>,
    pub duration_ms: u64,
}

impl ReportSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_format_for_export() {
        assert_eq!(format_value(&Value::Null), "");
        assert_eq!(format_value(&Value::Integer(7)), "7");
        assert_eq!(format_value(&Value::Real(12.5)), "12.50");
        assert_eq!(format_value(&Value::Real(0.1 + 0.2)), "0.30");
        assert_eq!(format_value(&Value::Text("2024-05".to_string())), "2024-05");
    }
}
