use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, info};

use ecomgen_core::{TableDef, dependency_order, drop_order};

use crate::errors::IngestError;

/// Open (creating if needed) the store and enable foreign-key enforcement.
pub fn open_store(path: &Path) -> Result<Connection, IngestError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| IngestError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let conn = Connection::open(path).map_err(|source| IngestError::Store {
        path: path.to_path_buf(),
        source,
    })?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|source| IngestError::Store {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), "store opened");
    Ok(conn)
}

/// Drop every catalog table (children first) and recreate them
/// (parents first).
pub fn reset_schema(conn: &Connection, tables: &[&'static TableDef]) -> Result<(), IngestError> {
    for table in drop_order(tables)? {
        conn.execute(&table.drop_table_sql(), [])?;
    }
    for table in dependency_order(tables)? {
        conn.execute(&table.create_table_sql(), [])?;
        debug!(table = table.name, "table created");
    }
    info!(tables = tables.len(), "schema reset");
    Ok(())
}

/// Toggle foreign-key enforcement. Has no effect inside a transaction.
pub fn set_foreign_keys(conn: &Connection, enabled: bool) -> Result<(), IngestError> {
    conn.pragma_update(None, "foreign_keys", enabled)?;
    debug!(enabled, "foreign key enforcement");
    Ok(())
}

pub fn stored_row_count(conn: &Connection, table: &TableDef) -> Result<u64, IngestError> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table.name), [], |row| {
        row.get(0)
    })?;
    Ok(count.max(0) as u64)
}

#[cfg(test)]
mod tests {
    use ecomgen_core::CATALOG;

    use super::*;

    fn existing_tables(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
            )
            .expect("prepare");
        stmt.query_map([], |row| row.get::<_, String>(0))
            .expect("query tables")
            .collect::<Result<Vec<_>, _>>()
            .expect("collect tables")
    }

    #[test]
    fn reset_creates_every_table_and_is_repeatable() {
        let conn = Connection::open_in_memory().expect("open in-memory store");
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .expect("enable foreign keys");

        reset_schema(&conn, CATALOG).expect("first reset");
        conn.execute("INSERT INTO customers (id, name) VALUES (1, 'Ada')", [])
            .expect("insert customer");
        reset_schema(&conn, CATALOG).expect("second reset");

        let tables = existing_tables(&conn);
        assert_eq!(
            tables,
            vec!["customers", "order_items", "orders", "payments", "products"]
        );
        assert_eq!(stored_row_count(&conn, CATALOG[0]).expect("count"), 0);
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let conn = Connection::open_in_memory().expect("open in-memory store");
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .expect("enable foreign keys");
        reset_schema(&conn, CATALOG).expect("reset");

        let result = conn.execute(
            "INSERT INTO orders (id, customer_id, order_date, status, total_amount) \
             VALUES (1, 99, '2024-01-01', 'shipped', 10.0)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn disabled_foreign_keys_accept_dangling_rows() {
        let conn = Connection::open_in_memory().expect("open in-memory store");
        reset_schema(&conn, CATALOG).expect("reset");
        set_foreign_keys(&conn, false).expect("disable foreign keys");

        conn.execute(
            "INSERT INTO orders (id, customer_id, order_date, status, total_amount) \
             VALUES (1, 99, '2024-01-01', 'shipped', 10.0)",
            [],
        )
        .expect("dangling order loads");

        set_foreign_keys(&conn, true).expect("enable foreign keys");
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .expect("read pragma");
        assert_eq!(enabled, 1);
    }

    #[test]
    fn open_creates_parent_directory() {
        let dir = std::env::temp_dir().join(format!(
            "ecomgen_store_{}",
            std::process::id()
        ));
        let path = dir.join("nested").join("ecom.db");
        let conn = open_store(&path).expect("open store");
        drop(conn);
        assert!(path.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
