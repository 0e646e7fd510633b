use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{Duration, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use ecomgen_core::{CATALOG, GenerationConfig, dependency_order, validate_catalog};

use crate::errors::GenerationError;
use crate::fakers::{self, UniqueValues};
use crate::model::{GenerateOptions, GenerationReport, TableReport};
use crate::output::csv::write_records;
use crate::pools::KeyPool;
use crate::records::money::round_cents;
use crate::records::{
    Customer, Dataset, Order, OrderItem, OrderStatus, Payment, PaymentMethod, PaymentStatus,
    Product, Record,
};

const CATEGORIES: &[&str] = &[
    "Electronics",
    "Home & Kitchen",
    "Books",
    "Fashion",
    "Sports",
    "Beauty",
    "Toys",
];

const PAYMENT_METHODS: &[PaymentMethod] = &[
    PaymentMethod::CreditCard,
    PaymentMethod::DebitCard,
    PaymentMethod::Paypal,
    PaymentMethod::GiftCard,
    PaymentMethod::Upi,
];

const PAYMENT_STATUSES: &[(PaymentStatus, f64)] = &[
    (PaymentStatus::Completed, 0.80),
    (PaymentStatus::Pending, 0.10),
    (PaymentStatus::Failed, 0.05),
    (PaymentStatus::Refunded, 0.05),
];

const ORDER_STATUSES: &[(OrderStatus, f64)] = &[
    (OrderStatus::Delivered, 0.60),
    (OrderStatus::Shipped, 0.20),
    (OrderStatus::Processing, 0.10),
    (OrderStatus::Cancelled, 0.10),
];

const MIN_PRICE: f64 = 5.0;
const MAX_PRICE: f64 = 500.0;
const SIGNUP_WINDOW_DAYS: i64 = 730;
const ORDER_WINDOW_DAYS: i64 = 365;

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub out_dir: PathBuf,
    pub dataset: Dataset,
    pub report: GenerationReport,
}

/// Entry point for generating and writing the five artifacts.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn run(&self) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let dataset = generate_dataset(&self.options.config)?;
        let mut report = write_dataset(&dataset, &self.options.out_dir)?;
        report.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            seed = report.seed,
            tables = report.tables.len(),
            bytes_written = report.bytes_written,
            duration_ms = report.duration_ms,
            out_dir = %self.options.out_dir.display(),
            "generation completed"
        );

        Ok(GenerationResult {
            out_dir: self.options.out_dir.clone(),
            dataset,
            report,
        })
    }
}

/// Build all five record sets in memory, parents before children.
pub fn generate_dataset(config: &GenerationConfig) -> Result<Dataset, GenerationError> {
    config.validate()?;
    validate_catalog(CATALOG)?;

    let seed = config
        .effective_seed()
        .unwrap_or_else(|| rand::rng().random());
    let mut dataset = Dataset {
        seed,
        anchor_date: config.anchor_date,
        ..Dataset::default()
    };

    info!(
        seed,
        seeded = !config.unseeded,
        customers = config.customers,
        products = config.products,
        orders = config.orders,
        "generation started"
    );

    for table in dependency_order(CATALOG)? {
        let mut rng = ChaCha8Rng::seed_from_u64(hash_seed(seed, table.name));
        match table.name {
            "customers" => {
                dataset.customers = generate_customers(&mut rng, config);
            }
            "products" => {
                dataset.products = generate_products(&mut rng, config);
            }
            "orders" => {
                let customers = KeyPool::new(&dataset.customers)?;
                dataset.orders = generate_orders(&mut rng, config, customers);
            }
            "order_items" => {
                let products = KeyPool::new(&dataset.products)?;
                dataset.order_items =
                    generate_order_items(&mut rng, config, &mut dataset.orders, products)?;
            }
            "payments" => {
                let orders = KeyPool::new(&dataset.orders)?;
                dataset.payments = generate_payments(&mut rng, config, orders);
            }
            other => return Err(GenerationError::Unsupported(other.to_string())),
        }
        debug!(table = table.name, "table generated");
    }

    Ok(dataset)
}

/// Write the dataset as CSV into `out_dir`, overwriting prior artifacts.
pub fn write_dataset(dataset: &Dataset, out_dir: &Path) -> Result<GenerationReport, GenerationError> {
    std::fs::create_dir_all(out_dir).map_err(|source| GenerationError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let tables = vec![
        write_table(out_dir, &dataset.customers)?,
        write_table(out_dir, &dataset.products)?,
        write_table(out_dir, &dataset.orders)?,
        write_table(out_dir, &dataset.order_items)?,
        write_table(out_dir, &dataset.payments)?,
    ];
    let bytes_written = tables.iter().map(|table| table.bytes).sum();

    Ok(GenerationReport {
        seed: dataset.seed,
        anchor_date: dataset.anchor_date,
        tables,
        bytes_written,
        duration_ms: 0,
    })
}

fn write_table<T: Record>(out_dir: &Path, records: &[T]) -> Result<TableReport, GenerationError> {
    let table = T::table();
    let path = out_dir.join(table.file_name);
    let bytes = write_records(&path, records)?;

    info!(
        table = table.name,
        rows = records.len(),
        bytes,
        path = %path.display(),
        "table written"
    );

    Ok(TableReport {
        table: table.name.to_string(),
        path,
        rows: records.len() as u64,
        bytes,
    })
}

fn generate_customers(rng: &mut ChaCha8Rng, config: &GenerationConfig) -> Vec<Customer> {
    let mut emails = UniqueValues::new();
    let earliest = config.anchor_date - Duration::days(SIGNUP_WINDOW_DAYS);

    (1..=config.customers as i64)
        .map(|id| Customer {
            id,
            name: fakers::person_name(rng),
            email: fakers::unique_email(rng, &mut emails, id),
            phone: fakers::phone(rng),
            city: fakers::city(rng),
            signup_date: random_date(rng, earliest, config.anchor_date),
        })
        .collect()
}

fn generate_products(rng: &mut ChaCha8Rng, config: &GenerationConfig) -> Vec<Product> {
    let mut names = UniqueValues::new();

    (1..=config.products as i64)
        .map(|id| {
            let name = fakers::unique_product_name(rng, &mut names, id);
            let category = CATEGORIES[rng.random_range(0..CATEGORIES.len())].to_string();
            let unit_price = round_cents(rng.random_range(MIN_PRICE..=MAX_PRICE));
            Product {
                id,
                name,
                category,
                unit_price,
            }
        })
        .collect()
}

/// Orders start with a zero total; item generation fills it in.
fn generate_orders(
    rng: &mut ChaCha8Rng,
    config: &GenerationConfig,
    customers: KeyPool<'_, Customer>,
) -> Vec<Order> {
    let window_start = config.anchor_date - Duration::days(ORDER_WINDOW_DAYS);

    (1..=config.orders as i64)
        .map(|id| {
            let customer = customers.pick(rng);
            let earliest = customer.signup_date.max(window_start);
            Order {
                id,
                customer_id: customer.id,
                order_date: random_date(rng, earliest, config.anchor_date),
                status: pick_weighted(rng, ORDER_STATUSES),
                total_amount: 0.0,
            }
        })
        .collect()
}

fn generate_order_items(
    rng: &mut ChaCha8Rng,
    config: &GenerationConfig,
    orders: &mut [Order],
    products: KeyPool<'_, Product>,
) -> Result<Vec<OrderItem>, GenerationError> {
    let mut items = Vec::with_capacity(orders.len() * config.max_items_per_order as usize);
    let mut next_id = 1_i64;

    for order in orders.iter_mut() {
        let basket = rng.random_range(1..=config.max_items_per_order) as usize;
        let mut total = 0.0;
        for product in products.sample_distinct(rng, basket) {
            let item = OrderItem {
                id: next_id,
                order_id: order.id,
                product_id: product.id,
                quantity: rng.random_range(1..=config.max_quantity),
                unit_price: product.unit_price,
            };
            total += item.line_total();
            items.push(item);
            next_id += 1;
        }
        if total == 0.0 {
            return Err(GenerationError::EmptyPool(Product::table().name));
        }
        order.total_amount = round_cents(total);
    }

    Ok(items)
}

/// One payment per order, settling the full order total.
fn generate_payments(
    rng: &mut ChaCha8Rng,
    config: &GenerationConfig,
    orders: KeyPool<'_, Order>,
) -> Vec<Payment> {
    orders
        .iter()
        .zip(1_i64..)
        .map(|(order, id)| {
            let status = pick_weighted(rng, PAYMENT_STATUSES);
            let method = PAYMENT_METHODS[rng.random_range(0..PAYMENT_METHODS.len())];
            Payment {
                id,
                order_id: order.id,
                amount: order.total_amount,
                method,
                status,
                paid_at: random_date(rng, order.order_date, config.anchor_date),
            }
        })
        .collect()
}

/// Uniform date in `[start, end]`; collapses to `end` when the range is empty.
fn random_date<R: Rng + ?Sized>(rng: &mut R, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days();
    if span <= 0 {
        return end;
    }
    start + Duration::days(rng.random_range(0..=span))
}

fn pick_weighted<T: Copy, R: Rng + ?Sized>(rng: &mut R, choices: &[(T, f64)]) -> T {
    let total_weight: f64 = choices.iter().map(|(_, weight)| weight).sum();
    let mut roll = rng.random_range(0.0..total_weight);
    for (value, weight) in choices {
        if roll < *weight {
            return *value;
        }
        roll -= weight;
    }
    choices[choices.len() - 1].0
}

/// Derive an independent, stable stream per table from the run seed.
fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
