use rusqlite::{Connection, ErrorCode, params_from_iter};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::IngestError;
use crate::source::SourceTable;

/// Outcome of loading one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadStatus {
    Loaded { rows: u64 },
    /// The table's transaction was rolled back after a constraint failure.
    RolledBack { line: u64, reason: String },
}

impl LoadStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadStatus::Loaded { .. })
    }
}

/// Insert every source row inside one transaction.
///
/// A constraint violation rolls back this table only and is returned as
/// [`LoadStatus::RolledBack`]. Any other database error is fatal.
pub fn load_table(conn: &mut Connection, source: &SourceTable) -> Result<LoadStatus, IngestError> {
    let table = source.table;
    let tx = conn.transaction()?;

    let failure = {
        let mut stmt = tx.prepare(&table.insert_sql())?;
        let mut failure = None;
        for (idx, row) in source.rows.iter().enumerate() {
            match stmt.execute(params_from_iter(row.iter())) {
                Ok(_) => {}
                Err(err) if is_constraint_violation(&err) => {
                    // header is line 1
                    failure = Some((idx as u64 + 2, err.to_string()));
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }
        failure
    };

    match failure {
        Some((line, reason)) => {
            tx.rollback()?;
            warn!(table = table.name, line, reason = %reason, "table load rolled back");
            Ok(LoadStatus::RolledBack { line, reason })
        }
        None => {
            tx.commit()?;
            let rows = source.row_count();
            info!(table = table.name, rows, "table loaded");
            Ok(LoadStatus::Loaded { rows })
        }
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ConstraintViolation
    )
}
