use serde::Serialize;

/// Storage class of a catalog column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Integer,
    Real,
    Text,
    /// ISO-8601 calendar date (`YYYY-MM-DD`), stored as TEXT.
    Date,
}

impl ColumnKind {
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnKind::Integer => "INTEGER",
            ColumnKind::Real => "REAL",
            ColumnKind::Text | ColumnKind::Date => "TEXT",
        }
    }
}

/// Column definition in file and table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
    /// Expected to be populated. Nulls in required columns are reported by
    /// the validator, they are not rejected by the store.
    pub required: bool,
}

impl ColumnDef {
    pub const fn required(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Single-column foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForeignKeyDef {
    pub column: &'static str,
    pub parent_table: &'static str,
    pub parent_column: &'static str,
}

/// A fixed table of the pipeline schema together with its CSV artifact name.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct TableDef {
    pub name: &'static str,
    pub file_name: &'static str,
    pub columns: &'static [ColumnDef],
    pub primary_key: &'static str,
    pub foreign_keys: &'static [ForeignKeyDef],
}

impl TableDef {
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.name).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.name.eq_ignore_ascii_case(name))
    }

    pub fn primary_key_index(&self) -> Option<usize> {
        self.column_index(self.primary_key)
    }

    /// Render the `CREATE TABLE` statement. Only the primary key is declared
    /// NOT NULL so rows with missing values still load. Tables are
    /// `WITHOUT ROWID`, so an empty key is rejected rather than replaced by a
    /// fresh rowid.
    pub fn create_table_sql(&self) -> String {
        let mut lines: Vec<String> = self
            .columns
            .iter()
            .map(|column| {
                if column.name == self.primary_key {
                    format!(
                        "    {} {} PRIMARY KEY NOT NULL",
                        column.name,
                        column.kind.sql_type()
                    )
                } else {
                    format!("    {} {}", column.name, column.kind.sql_type())
                }
            })
            .collect();

        for fk in self.foreign_keys {
            lines.push(format!(
                "    FOREIGN KEY({}) REFERENCES {}({})",
                fk.column, fk.parent_table, fk.parent_column
            ));
        }

        format!(
            "CREATE TABLE {} (\n{}\n) WITHOUT ROWID",
            self.name,
            lines.join(",\n")
        )
    }

    pub fn drop_table_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", self.name)
    }

    pub fn insert_sql(&self) -> String {
        let placeholders: Vec<String> = (1..=self.columns.len())
            .map(|idx| format!("?{idx}"))
            .collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.name,
            self.column_names().join(", "),
            placeholders.join(", ")
        )
    }
}

pub static CUSTOMERS: TableDef = TableDef {
    name: "customers",
    file_name: "customers.csv",
    columns: &[
        ColumnDef::required("id", ColumnKind::Integer),
        ColumnDef::required("name", ColumnKind::Text),
        ColumnDef::required("email", ColumnKind::Text),
        ColumnDef::optional("phone", ColumnKind::Text),
        ColumnDef::optional("city", ColumnKind::Text),
        ColumnDef::optional("signup_date", ColumnKind::Date),
    ],
    primary_key: "id",
    foreign_keys: &[],
};

pub static PRODUCTS: TableDef = TableDef {
    name: "products",
    file_name: "products.csv",
    columns: &[
        ColumnDef::required("id", ColumnKind::Integer),
        ColumnDef::required("name", ColumnKind::Text),
        ColumnDef::optional("category", ColumnKind::Text),
        ColumnDef::required("unit_price", ColumnKind::Real),
    ],
    primary_key: "id",
    foreign_keys: &[],
};

pub static ORDERS: TableDef = TableDef {
    name: "orders",
    file_name: "orders.csv",
    columns: &[
        ColumnDef::required("id", ColumnKind::Integer),
        ColumnDef::required("customer_id", ColumnKind::Integer),
        ColumnDef::required("order_date", ColumnKind::Date),
        ColumnDef::required("status", ColumnKind::Text),
        ColumnDef::required("total_amount", ColumnKind::Real),
    ],
    primary_key: "id",
    foreign_keys: &[ForeignKeyDef {
        column: "customer_id",
        parent_table: "customers",
        parent_column: "id",
    }],
};

pub static ORDER_ITEMS: TableDef = TableDef {
    name: "order_items",
    file_name: "order_items.csv",
    columns: &[
        ColumnDef::required("id", ColumnKind::Integer),
        ColumnDef::required("order_id", ColumnKind::Integer),
        ColumnDef::required("product_id", ColumnKind::Integer),
        ColumnDef::required("quantity", ColumnKind::Integer),
        ColumnDef::required("unit_price", ColumnKind::Real),
    ],
    primary_key: "id",
    foreign_keys: &[
        ForeignKeyDef {
            column: "order_id",
            parent_table: "orders",
            parent_column: "id",
        },
        ForeignKeyDef {
            column: "product_id",
            parent_table: "products",
            parent_column: "id",
        },
    ],
};

pub static PAYMENTS: TableDef = TableDef {
    name: "payments",
    file_name: "payments.csv",
    columns: &[
        ColumnDef::required("id", ColumnKind::Integer),
        ColumnDef::required("order_id", ColumnKind::Integer),
        ColumnDef::required("amount", ColumnKind::Real),
        ColumnDef::required("method", ColumnKind::Text),
        ColumnDef::required("status", ColumnKind::Text),
        ColumnDef::required("paid_at", ColumnKind::Date),
    ],
    primary_key: "id",
    foreign_keys: &[ForeignKeyDef {
        column: "order_id",
        parent_table: "orders",
        parent_column: "id",
    }],
};

/// Every pipeline table. Use [`crate::dependency_order`] for load order.
pub static CATALOG: &[&TableDef] = &[&CUSTOMERS, &PRODUCTS, &ORDERS, &ORDER_ITEMS, &PAYMENTS];

/// Look up a catalog table by name.
pub fn table(name: &str) -> Option<&'static TableDef> {
    CATALOG.iter().copied().find(|table| table.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_table_declares_keys() {
        let sql = ORDER_ITEMS.create_table_sql();
        assert!(sql.starts_with("CREATE TABLE order_items ("));
        assert!(sql.contains("id INTEGER PRIMARY KEY NOT NULL"));
        assert!(sql.ends_with(") WITHOUT ROWID"));
        assert!(sql.contains("FOREIGN KEY(order_id) REFERENCES orders(id)"));
        assert!(sql.contains("FOREIGN KEY(product_id) REFERENCES products(id)"));
        assert!(!sql.contains("quantity INTEGER NOT NULL"));
    }

    #[test]
    fn insert_sql_binds_every_column() {
        assert_eq!(
            PRODUCTS.insert_sql(),
            "INSERT INTO products (id, name, category, unit_price) VALUES (?1, ?2, ?3, ?4)"
        );
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(table("payments").map(|t| t.file_name), Some("payments.csv"));
        assert!(table("refunds").is_none());
        assert_eq!(ORDERS.column_index("STATUS"), Some(3));
        assert_eq!(CUSTOMERS.primary_key_index(), Some(0));
    }
}
