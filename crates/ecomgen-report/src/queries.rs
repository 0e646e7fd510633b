/// A named, fixed aggregation over the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDef {
    pub name: &'static str,
    pub description: &'static str,
    /// Tables the query reads; checked before execution.
    pub tables: &'static [&'static str],
    pub sql: &'static str,
}

impl QueryDef {
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name)
    }
}

pub static TOP_CUSTOMERS: QueryDef = QueryDef {
    name: "top_customers",
    description: "Top 10 customers by total spend",
    tables: &["customers", "orders"],
    sql: "SELECT
    c.id AS customer_id,
    c.name,
    c.email,
    ROUND(SUM(o.total_amount), 2) AS total_spent,
    COUNT(o.id) AS orders_count
FROM customers c
JOIN orders o ON o.customer_id = c.id
GROUP BY c.id, c.name, c.email
ORDER BY total_spent DESC, customer_id ASC
LIMIT 10",
};

pub static PRODUCT_SALES: QueryDef = QueryDef {
    name: "product_sales",
    description: "Top 20 products by units sold, with revenue",
    tables: &["order_items", "products"],
    sql: "SELECT
    p.id AS product_id,
    p.name AS product_name,
    p.category,
    SUM(oi.quantity) AS total_quantity,
    ROUND(SUM(oi.quantity * oi.unit_price), 2) AS total_revenue
FROM order_items oi
JOIN products p ON p.id = oi.product_id
GROUP BY p.id, p.name, p.category
ORDER BY total_quantity DESC, product_id ASC
LIMIT 20",
};

pub static CITY_REVENUE: QueryDef = QueryDef {
    name: "city_revenue",
    description: "Order count and revenue per customer city",
    tables: &["customers", "orders"],
    sql: "SELECT
    c.city,
    COUNT(DISTINCT o.id) AS orders_count,
    ROUND(SUM(o.total_amount), 2) AS total_revenue
FROM customers c
JOIN orders o ON o.customer_id = c.id
GROUP BY c.city
ORDER BY total_revenue DESC, c.city ASC",
};

pub static ORDERS_PAYMENTS: QueryDef = QueryDef {
    name: "orders_payments",
    description: "Most recent 200 orders with their payment",
    tables: &["orders", "payments"],
    sql: "SELECT
    o.id AS order_id,
    o.order_date,
    o.total_amount,
    p.method AS payment_method,
    p.status AS payment_status,
    p.paid_at
FROM orders o
LEFT JOIN payments p ON p.order_id = o.id
ORDER BY o.order_date DESC, o.id DESC, p.id ASC
LIMIT 200",
};

pub static MONTHLY_SALES: QueryDef = QueryDef {
    name: "monthly_sales",
    description: "Orders, revenue and average order value per month",
    tables: &["orders"],
    sql: "SELECT
    strftime('%Y-%m', o.order_date) AS month,
    COUNT(o.id) AS orders_count,
    ROUND(SUM(o.total_amount), 2) AS total_revenue,
    ROUND(AVG(o.total_amount), 2) AS avg_order_value
FROM orders o
GROUP BY strftime('%Y-%m', o.order_date)
ORDER BY month ASC",
};

/// Every report, in execution order.
pub static QUERIES: &[&QueryDef] = &[
    &TOP_CUSTOMERS,
    &PRODUCT_SALES,
    &CITY_REVENUE,
    &ORDERS_PAYMENTS,
    &MONTHLY_SALES,
];

pub fn query(name: &str) -> Option<&'static QueryDef> {
    QUERIES.iter().copied().find(|query| query.name == name)
}
