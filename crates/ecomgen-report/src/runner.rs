use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::errors::ReportError;
use crate::model::QueryResult;
use crate::queries::QueryDef;

/// Open an existing store read-only. A missing file is an error, never
/// an empty new database.
pub fn open_read_only(path: &Path) -> Result<Connection, ReportError> {
    if !path.is_file() {
        return Err(ReportError::MissingStore {
            path: path.to_path_buf(),
        });
    }
    Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(|source| {
        ReportError::Store {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Execute one report query and collect its full result set.
pub fn run_query(conn: &Connection, query: &QueryDef) -> Result<QueryResult, ReportError> {
    for table in query.tables {
        if !table_exists(conn, table)? {
            return Err(ReportError::MissingTable {
                query: query.name.to_string(),
                table: table.to_string(),
            });
        }
    }

    let query_err = |source| ReportError::Query {
        query: query.name.to_string(),
        source,
    };

    let mut stmt = conn.prepare(query.sql).map_err(query_err)?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let width = columns.len();

    let rows = stmt
        .query_map([], |row| {
            (0..width)
                .map(|idx| row.get::<_, Value>(idx))
                .collect::<Result<Vec<_>, _>>()
        })
        .map_err(query_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(query_err)?;

    debug!(query = query.name, rows = rows.len(), "query executed");
    Ok(QueryResult {
        name: query.name.to_string(),
        columns,
        rows,
    })
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool, ReportError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
