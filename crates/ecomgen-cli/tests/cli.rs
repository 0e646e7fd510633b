use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn temp_root(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ecomgen_cli_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp root");
    dir
}

fn ecomgen(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ecomgen").expect("binary built");
    cmd.current_dir(root);
    cmd
}

#[test]
fn full_pipeline_with_defaults() {
    let root = temp_root("pipeline");

    ecomgen(&root)
        .args(["generate", "--customers", "50", "--products", "30", "--orders", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seed 42"))
        .stdout(predicate::str::contains("customers.csv"));

    ecomgen(&root)
        .args(["load", "--metrics", "metrics/validation.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| customers | 50 | 50 | ok |"))
        .stdout(predicate::str::contains("Load complete"));
    assert!(root.join("db").join("ecom.db").is_file());
    assert!(root.join("metrics").join("validation.json").is_file());

    ecomgen(&root)
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains(">>> top_customers"))
        .stdout(predicate::str::contains(">>> monthly_sales"))
        .stdout(predicate::str::contains("Exported 5 reports"));

    for name in [
        "top_customers",
        "product_sales",
        "city_revenue",
        "orders_payments",
        "monthly_sales",
    ] {
        assert!(root.join("output").join(format!("{name}.csv")).is_file());
    }

    let _ = fs::remove_dir_all(&root);
}

fn loaded_store(label: &str) -> PathBuf {
    let root = temp_root(label);
    ecomgen(&root)
        .args(["generate", "--customers", "20", "--products", "10", "--orders", "40"])
        .assert()
        .success();
    ecomgen(&root).arg("load").assert().success();
    root
}

#[test]
fn report_query_flag_selects_reports() {
    let root = loaded_store("query_select");

    ecomgen(&root)
        .args(["report", "--query", "monthly_sales", "--query", "product_sales"])
        .assert()
        .success()
        .stdout(predicate::str::contains(">>> product_sales"))
        .stdout(predicate::str::contains(">>> monthly_sales"))
        .stdout(predicate::str::contains(">>> top_customers").not())
        .stdout(predicate::str::contains("Exported 2 reports"));

    let output = root.join("output");
    assert!(output.join("monthly_sales.csv").is_file());
    assert!(output.join("product_sales.csv").is_file());
    assert!(!output.join("top_customers.csv").exists());

    ecomgen(&root)
        .args(["report", "--query", "weekly_sales"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("fatal: report stage failed"))
        .stderr(predicate::str::contains("weekly_sales"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn report_keep_going_skips_failures_but_exits_non_zero() {
    let root = loaded_store("keep_going");
    let conn = rusqlite::Connection::open(root.join("db").join("ecom.db")).expect("open store");
    conn.execute_batch("DROP TABLE customers;").expect("drop customers");
    drop(conn);

    ecomgen(&root)
        .arg("report")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("fatal: report stage failed"))
        .stderr(predicate::str::contains("customers"));
    assert!(!root.join("output").join("monthly_sales.csv").exists());

    ecomgen(&root)
        .args(["report", "--keep-going"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(">>> monthly_sales"))
        .stderr(predicate::str::contains(
            "fatal: report stage failed: 2 of 5 queries failed (top_customers, city_revenue)",
        ));

    let output = root.join("output");
    for name in ["product_sales", "orders_payments", "monthly_sales"] {
        assert!(output.join(format!("{name}.csv")).is_file(), "{name} exported");
    }
    assert!(!output.join("top_customers.csv").exists());
    assert!(!output.join("city_revenue.csv").exists());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn generate_into_unwritable_location_fails() {
    let root = temp_root("unwritable");
    fs::write(root.join("blocker"), "plain file\n").expect("create blocking file");

    ecomgen(&root)
        .args(["generate", "--data-dir", "blocker/x"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("fatal: generate stage failed"))
        .stderr(predicate::str::contains("blocker"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn load_without_inputs_fails_with_stage_message() {
    let root = temp_root("no_inputs");

    ecomgen(&root)
        .arg("load")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("fatal: load stage failed"))
        .stderr(predicate::str::contains("customers"));
    assert!(!root.join("db").exists());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn report_without_store_fails() {
    let root = temp_root("no_store");

    ecomgen(&root)
        .arg("report")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("fatal: report stage failed"));
    assert!(!root.join("db").exists());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn config_file_and_flags_are_layered() {
    let root = temp_root("config");
    fs::write(
        root.join("ecomgen.toml"),
        "data_dir = \"csv\"\n\n[generation]\ncustomers = 20\nproducts = 10\norders = 30\n",
    )
    .expect("write config");

    ecomgen(&root)
        .args(["generate", "--config", "ecomgen.toml", "--orders", "15", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seed 7"));

    let orders = fs::read_to_string(root.join("csv").join("orders.csv")).expect("read orders");
    assert_eq!(orders.lines().count(), 16);
    let customers =
        fs::read_to_string(root.join("csv").join("customers.csv")).expect("read customers");
    assert_eq!(customers.lines().count(), 21);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn invalid_config_is_a_stage_failure() {
    let root = temp_root("bad_config");

    ecomgen(&root)
        .args(["generate", "--max-quantity", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "fatal: generate stage failed: configuration error",
        ));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn json_log_file_records_run() {
    let root = temp_root("log_file");

    ecomgen(&root)
        .args([
            "generate",
            "--customers",
            "5",
            "--products",
            "5",
            "--orders",
            "5",
            "--log-file",
            "logs/run.ndjson",
        ])
        .assert()
        .success();

    let log = fs::read_to_string(root.join("logs").join("run.ndjson")).expect("read log");
    let first = log.lines().next().expect("first log line");
    let event: serde_json::Value = serde_json::from_str(first).expect("json log line");
    assert!(event.get("timestamp").is_some());
    assert!(log.contains("run_started"));
    assert!(log.contains("run_finished"));

    let _ = fs::remove_dir_all(&root);
}
