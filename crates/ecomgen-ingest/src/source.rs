use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rusqlite::types::Value;
use tracing::debug;

use ecomgen_core::{ColumnDef, ColumnKind, TableDef};

use crate::errors::IngestError;

/// One source CSV parsed into typed rows, in catalog column order.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub table: &'static TableDef,
    pub path: PathBuf,
    pub rows: Vec<Vec<Value>>,
}

impl SourceTable {
    pub fn row_count(&self) -> u64 {
        self.rows.len() as u64
    }

    /// Values of one column, nulls included.
    pub fn column(&self, name: &str) -> impl Iterator<Item = &Value> {
        let idx = self.table.column_index(name);
        self.rows
            .iter()
            .filter_map(move |row| idx.and_then(|idx| row.get(idx)))
    }
}

/// Read `<data_dir>/<file_name>` for `table`.
///
/// The header must list exactly the catalog columns in order and every row
/// must carry the same number of fields. Empty fields become SQL NULL.
pub fn read_source(table: &'static TableDef, data_dir: &Path) -> Result<SourceTable, IngestError> {
    let path = data_dir.join(table.file_name);
    let file = File::open(&path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            IngestError::MissingInput {
                table: table.name,
                path: path.clone(),
            }
        } else {
            IngestError::Io {
                path: path.clone(),
                source,
            }
        }
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();
    let expected = table.column_names();
    let matches = headers.len() == expected.len()
        && headers
            .iter()
            .zip(&expected)
            .all(|(found, wanted)| found.eq_ignore_ascii_case(wanted));
    if !matches {
        return Err(IngestError::HeaderMismatch {
            path,
            expected: expected.join(","),
            found: headers.join(","),
        });
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        if record.len() != table.columns.len() {
            return Err(IngestError::ColumnCount {
                path,
                line,
                expected: table.columns.len(),
                found: record.len(),
            });
        }

        let mut row = Vec::with_capacity(table.columns.len());
        for (column, raw) in table.columns.iter().zip(record.iter()) {
            let value = parse_value(column, raw).map_err(|message| IngestError::InvalidValue {
                path: path.clone(),
                line,
                column: column.name,
                message,
            })?;
            row.push(value);
        }
        rows.push(row);
    }

    debug!(table = table.name, rows = rows.len(), path = %path.display(), "source read");
    Ok(SourceTable { table, path, rows })
}

fn parse_value(column: &ColumnDef, raw: &str) -> Result<Value, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    match column.kind {
        ColumnKind::Integer => trimmed
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| format!("invalid integer '{trimmed}'")),
        ColumnKind::Real => trimmed
            .parse::<f64>()
            .map(Value::Real)
            .map_err(|_| format!("invalid number '{trimmed}'")),
        ColumnKind::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(|date| Value::Text(date.format("%Y-%m-%d").to_string()))
            .map_err(|_| format!("invalid date '{trimmed}'")),
        ColumnKind::Text => Ok(Value::Text(raw.to_string())),
    }
}
