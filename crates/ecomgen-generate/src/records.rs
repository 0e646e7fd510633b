use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use ecomgen_core::{CUSTOMERS, ORDER_ITEMS, ORDERS, PAYMENTS, PRODUCTS, TableDef};

/// A typed row bound to its catalog table.
///
/// Field declaration order must match the catalog column order; the CSV
/// writer emits the catalog header and serializes fields positionally.
pub trait Record: Serialize {
    fn table() -> &'static TableDef;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub signup_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    #[serde(with = "money")]
    pub unit_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub order_date: NaiveDate,
    pub status: OrderStatus,
    /// Rounded sum of the order's line totals.
    #[serde(with = "money")]
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: u32,
    /// Product price at the time of the order.
    #[serde(with = "money")]
    pub unit_price: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        money::round_cents(self.unit_price * f64::from(self.quantity))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Paypal,
    GiftCard,
    Upi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub order_id: i64,
    #[serde(with = "money")]
    pub amount: f64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub paid_at: NaiveDate,
}

impl Record for Customer {
    fn table() -> &'static TableDef {
        &CUSTOMERS
    }
}

impl Record for Product {
    fn table() -> &'static TableDef {
        &PRODUCTS
    }
}

impl Record for Order {
    fn table() -> &'static TableDef {
        &ORDERS
    }
}

impl Record for OrderItem {
    fn table() -> &'static TableDef {
        &ORDER_ITEMS
    }
}

impl Record for Payment {
    fn table() -> &'static TableDef {
        &PAYMENTS
    }
}

/// The five record sets of one generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub seed: u64,
    pub anchor_date: NaiveDate,
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub payments: Vec<Payment>,
}

/// Currency amounts serialize with exactly two decimals.
pub mod money {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn round_cents(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{value:.2}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        f64::deserialize(deserializer)
    }
}
