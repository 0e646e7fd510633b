use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::graph::dependency_order;
use crate::schema::TableDef;

/// Validate internal consistency of a table catalog.
///
/// This checks:
/// - duplicate tables, file names and columns
/// - the primary key column exists
/// - foreign key columns and referenced targets exist
/// - foreign keys are acyclic
pub fn validate_catalog(tables: &[&'static TableDef]) -> Result<()> {
    let mut names = BTreeSet::new();
    let mut files = BTreeSet::new();

    for table in tables {
        if !names.insert(table.name) {
            return Err(Error::InvalidCatalog(format!(
                "duplicate table name: {}",
                table.name
            )));
        }
        if !files.insert(table.file_name) {
            return Err(Error::InvalidCatalog(format!(
                "duplicate file name: {}",
                table.file_name
            )));
        }

        let mut columns = BTreeSet::new();
        for column in table.columns {
            if !columns.insert(column.name) {
                return Err(Error::InvalidCatalog(format!(
                    "duplicate column name: {}.{}",
                    table.name, column.name
                )));
            }
        }

        if table.primary_key_index().is_none() {
            return Err(Error::InvalidCatalog(format!(
                "primary key column missing: {}.{}",
                table.name, table.primary_key
            )));
        }
    }

    for table in tables {
        for fk in table.foreign_keys {
            if table.column_index(fk.column).is_none() {
                return Err(Error::InvalidCatalog(format!(
                    "foreign key column missing: {}.{}",
                    table.name, fk.column
                )));
            }

            let parent = tables
                .iter()
                .find(|candidate| candidate.name == fk.parent_table)
                .ok_or_else(|| {
                    Error::InvalidCatalog(format!(
                        "foreign key target missing: {}.{} -> {}",
                        table.name, fk.column, fk.parent_table
                    ))
                })?;

            if parent.column_index(fk.parent_column).is_none() {
                return Err(Error::InvalidCatalog(format!(
                    "foreign key target column missing: {}.{}",
                    parent.name, fk.parent_column
                )));
            }
        }
    }

    dependency_order(tables).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CATALOG, CUSTOMERS, ColumnDef, ColumnKind, ForeignKeyDef};

    static DANGLING: TableDef = TableDef {
        name: "reviews",
        file_name: "reviews.csv",
        columns: &[
            ColumnDef::required("id", ColumnKind::Integer),
            ColumnDef::required("product_id", ColumnKind::Integer),
        ],
        primary_key: "id",
        foreign_keys: &[ForeignKeyDef {
            column: "product_id",
            parent_table: "products",
            parent_column: "id",
        }],
    };

    #[test]
    fn builtin_catalog_is_valid() {
        validate_catalog(CATALOG).expect("catalog should validate");
    }

    #[test]
    fn missing_parent_is_rejected() {
        let err = validate_catalog(&[&CUSTOMERS, &DANGLING]).expect_err("missing parent");
        assert!(err.to_string().contains("foreign key target missing"));
    }

    #[test]
    fn duplicate_table_is_rejected() {
        let err = validate_catalog(&[&CUSTOMERS, &CUSTOMERS]).expect_err("duplicate");
        assert!(err.to_string().contains("duplicate table name"));
    }
}
