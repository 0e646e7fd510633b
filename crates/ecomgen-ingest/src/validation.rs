use std::collections::{HashMap, HashSet};
use std::path::Path;

use rusqlite::Connection;
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

use crate::errors::IngestError;
use crate::loader::LoadStatus;
use crate::source::SourceTable;
use crate::store::stored_row_count;

/// Missing values found in one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNulls {
    pub column: String,
    pub required: bool,
    pub nulls: u64,
}

/// Child values that do not appear among the parent's source keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanCount {
    pub column: String,
    pub parent_table: String,
    pub orphans: u64,
}

/// Data-quality findings for a single table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableValidation {
    pub table: String,
    pub source_rows: u64,
    pub stored_rows: u64,
    pub load: LoadStatus,
    pub nulls: Vec<ColumnNulls>,
    /// Rows whose primary key already appeared earlier in the file.
    pub duplicate_keys: u64,
    pub orphans: Vec<OrphanCount>,
}

impl TableValidation {
    pub fn total_nulls(&self) -> u64 {
        self.nulls.iter().map(|column| column.nulls).sum()
    }

    pub fn total_orphans(&self) -> u64 {
        self.orphans.iter().map(|fk| fk.orphans).sum()
    }

    pub fn row_counts_match(&self) -> bool {
        self.source_rows == self.stored_rows
    }
}

/// Informational report produced after every load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub db_path: String,
    pub tables: Vec<TableValidation>,
}

impl ValidationReport {
    pub fn table(&self, name: &str) -> Option<&TableValidation> {
        self.tables.iter().find(|table| table.table == name)
    }

    pub fn total_nulls(&self) -> u64 {
        self.tables.iter().map(TableValidation::total_nulls).sum()
    }

    pub fn total_duplicates(&self) -> u64 {
        self.tables.iter().map(|table| table.duplicate_keys).sum()
    }

    pub fn total_orphans(&self) -> u64 {
        self.tables.iter().map(TableValidation::total_orphans).sum()
    }

    pub fn failed_tables(&self) -> Vec<&str> {
        self.tables
            .iter()
            .filter(|table| !table.load.is_loaded())
            .map(|table| table.table.as_str())
            .collect()
    }

    pub fn has_issues(&self) -> bool {
        self.total_nulls() > 0
            || self.total_duplicates() > 0
            || self.total_orphans() > 0
            || self
                .tables
                .iter()
                .any(|table| !table.load.is_loaded() || !table.row_counts_match())
    }

    /// Write the report as pretty JSON.
    pub fn write_json(&self, path: &Path) -> Result<(), IngestError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| IngestError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Compute the validation report from the parsed sources and the store.
///
/// `sources` and `loads` are parallel, in load order.
pub fn validate(
    conn: &Connection,
    db_path: &Path,
    sources: &[SourceTable],
    loads: &[LoadStatus],
) -> Result<ValidationReport, IngestError> {
    let keys: HashMap<&str, HashSet<String>> = sources
        .iter()
        .map(|source| (source.table.name, key_set(source)))
        .collect();

    let mut tables = Vec::with_capacity(sources.len());
    for (source, load) in sources.iter().zip(loads) {
        let table = source.table;
        let nulls = table
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| ColumnNulls {
                column: column.name.to_string(),
                required: column.required,
                nulls: source
                    .rows
                    .iter()
                    .filter(|row| matches!(row.get(idx), Some(Value::Null) | None))
                    .count() as u64,
            })
            .collect();

        let orphans = table
            .foreign_keys
            .iter()
            .map(|fk| {
                let parent = keys.get(fk.parent_table);
                let orphans = source
                    .column(fk.column)
                    .filter_map(value_key)
                    .filter(|value| !parent.is_some_and(|keys| keys.contains(value)))
                    .count() as u64;
                OrphanCount {
                    column: fk.column.to_string(),
                    parent_table: fk.parent_table.to_string(),
                    orphans,
                }
            })
            .collect();

        tables.push(TableValidation {
            table: table.name.to_string(),
            source_rows: source.row_count(),
            stored_rows: stored_row_count(conn, table)?,
            load: load.clone(),
            nulls,
            duplicate_keys: duplicate_keys(source),
            orphans,
        });
    }

    Ok(ValidationReport {
        db_path: db_path.display().to_string(),
        tables,
    })
}

fn duplicate_keys(source: &SourceTable) -> u64 {
    let mut seen = HashSet::new();
    source
        .column(source.table.primary_key)
        .filter_map(value_key)
        .filter(|key| !seen.insert(key.clone()))
        .count() as u64
}

fn key_set(source: &SourceTable) -> HashSet<String> {
    source
        .column(source.table.primary_key)
        .filter_map(value_key)
        .collect()
}

fn value_key(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Integer(value) => Some(value.to_string()),
        Value::Real(value) => Some(value.to_string()),
        Value::Text(value) => Some(value.clone()),
        Value::Blob(bytes) => Some(format!("{bytes:?}")),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use ecomgen_core::{CUSTOMERS, ORDERS};

    use super::*;

    fn customers(ids: &[i64]) -> SourceTable {
        SourceTable {
            table: &CUSTOMERS,
            path: PathBuf::from("customers.csv"),
            rows: ids
                .iter()
                .map(|id| {
                    vec![
                        Value::Integer(*id),
                        Value::Text(format!("Customer {id}")),
                        Value::Null,
                        Value::Null,
                        Value::Text("Porto".to_string()),
                        Value::Text("2024-01-01".to_string()),
                    ]
                })
                .collect(),
        }
    }

    #[test]
    fn counts_duplicates_after_first_occurrence() {
        assert_eq!(duplicate_keys(&customers(&[1, 2, 3])), 0);
        assert_eq!(duplicate_keys(&customers(&[1, 2, 2, 2, 3, 3])), 3);
    }

    #[test]
    fn reports_nulls_orphans_and_row_counts() {
        let conn = Connection::open_in_memory().expect("open in-memory store");
        crate::store::reset_schema(&conn, ecomgen_core::CATALOG).expect("reset");

        let orders = SourceTable {
            table: &ORDERS,
            path: PathBuf::from("orders.csv"),
            rows: vec![
                vec![
                    Value::Integer(1),
                    Value::Integer(1),
                    Value::Text("2024-02-01".to_string()),
                    Value::Text("shipped".to_string()),
                    Value::Real(10.0),
                ],
                vec![
                    Value::Integer(2),
                    Value::Integer(77),
                    Value::Text("2024-02-02".to_string()),
                    Value::Null,
                    Value::Real(12.5),
                ],
            ],
        };
        let sources = vec![customers(&[1, 2]), orders];
        let loads = vec![
            LoadStatus::Loaded { rows: 2 },
            LoadStatus::RolledBack {
                line: 3,
                reason: "FOREIGN KEY constraint failed".to_string(),
            },
        ];

        let report = validate(&conn, Path::new(":memory:"), &sources, &loads).expect("validate");

        let customers = report.table("customers").expect("customers");
        assert_eq!(customers.total_nulls(), 4);
        assert_eq!(customers.stored_rows, 0);
        assert!(!customers.row_counts_match());

        let orders = report.table("orders").expect("orders");
        assert_eq!(orders.total_orphans(), 1);
        assert_eq!(orders.nulls[3].nulls, 1);
        assert_eq!(report.failed_tables(), vec!["orders"]);
        assert!(report.has_issues());
    }
}
