//! End-to-end tests for the `sovbond` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Runs `sovbond` against a config file inside `dir`.
fn sovbond(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sovbond").unwrap();
    cmd.env("SOVBOND_CONFIG", dir.path().join("config.json"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_price_nominal_minimal() {
    let dir = TempDir::new().unwrap();
    sovbond(&dir)
        .args([
            "price",
            "--settle",
            "2022-11-22",
            "--maturity",
            "2034-05-15",
            "--coupon",
            "0.0425",
            "--yield",
            "0.04355",
            "--format",
            "minimal",
        ])
        .assert()
        .success()
        .stdout("99.1405640616\n");
}

#[test]
fn test_price_bill_rounded() {
    let dir = TempDir::new().unwrap();
    sovbond(&dir)
        .args([
            "price",
            "--settle",
            "2023-09-26",
            "--maturity",
            "2024-07-31",
            "--yield",
            "0.05",
            "--bill",
            "--decimals",
            "3",
            "-f",
            "minimal",
        ])
        .assert()
        .success()
        .stdout("95.939\n");
}

#[test]
fn test_price_indexed_json() {
    let dir = TempDir::new().unwrap();
    let output = sovbond(&dir)
        .args([
            "price",
            "--settle",
            "2022-08-31",
            "--maturity",
            "2035-09-20",
            "--coupon",
            "0.025",
            "--yield",
            "0.0219",
            "--frequency",
            "4",
            "--index-ratio",
            "116.69/100",
            "--average-inflation",
            "0.0163",
            "--decimals",
            "6",
            "--format",
            "json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["instrument"], "Inflation-Indexed Bond");
    assert!((json["dirty_price"].as_f64().unwrap() - 120.932155).abs() < 1e-9);
    assert!((json["accrued_interest"].as_f64().unwrap() - 0.570766).abs() < 1e-9);
    assert!((json["clean_price"].as_f64().unwrap() - 120.361389).abs() < 1e-9);
}

#[test]
fn test_price_ex_interest_flag() {
    let dir = TempDir::new().unwrap();
    sovbond(&dir)
        .args([
            "price",
            "--settle",
            "2022-09-18",
            "--maturity",
            "2035-09-20",
            "--coupon",
            "0.025",
            "--yield",
            "0.0219",
            "--frequency",
            "4",
            "--current-index",
            "116.69",
            "--base-index",
            "100",
            "--average-inflation",
            "0.0163",
            "--ex-interest-days",
            "10",
            "--decimals",
            "4",
            "--format",
            "table",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("120.7160"))
        .stdout(predicate::str::contains("-0.0159"));
}

#[test]
fn test_maturity_before_settlement_fails() {
    let dir = TempDir::new().unwrap();
    sovbond(&dir)
        .args([
            "price",
            "--settle",
            "2024-07-31",
            "--maturity",
            "2023-09-26",
            "--yield",
            "0.05",
            "--bill",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date range"));
}

#[test]
fn test_unsupported_frequency_fails() {
    let dir = TempDir::new().unwrap();
    sovbond(&dir)
        .args([
            "price",
            "--settle",
            "2022-11-22",
            "--maturity",
            "2034-05-15",
            "--coupon",
            "0.0425",
            "--yield",
            "0.04355",
            "--frequency",
            "3",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported coupon frequency"));
}

#[test]
fn test_invalid_date_fails() {
    let dir = TempDir::new().unwrap();
    sovbond(&dir)
        .args([
            "price",
            "--settle",
            "22/11/2022",
            "--maturity",
            "2034-05-15",
            "--yield",
            "0.04",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn test_yield_from_dirty_price() {
    let dir = TempDir::new().unwrap();
    sovbond(&dir)
        .args([
            "yield",
            "--settle",
            "2022-11-22",
            "--maturity",
            "2034-05-15",
            "--coupon",
            "0.0425",
            "--dirty-price",
            "99.14056406163556",
            "-f",
            "minimal",
        ])
        .assert()
        .success()
        .stdout("0.0435500000\n");
}

#[test]
fn test_multi_year_bill_yield() {
    let dir = TempDir::new().unwrap();
    sovbond(&dir)
        .args([
            "yield",
            "--settle",
            "2023-09-26",
            "--maturity",
            "2026-09-26",
            "--bill",
            "--dirty-price",
            "86.94616484",
            "-f",
            "minimal",
        ])
        .assert()
        .success()
        .stdout("0.0500000000\n");
}

#[test]
fn test_price_rounding_preset() {
    let dir = TempDir::new().unwrap();
    sovbond(&dir)
        .args([
            "price",
            "--settle",
            "2022-11-22",
            "--maturity",
            "2034-05-15",
            "--coupon",
            "0.0425",
            "--yield",
            "0.04355",
            "--rounding",
            "4",
            "-f",
            "minimal",
        ])
        .assert()
        .success()
        .stdout("99.1406\n");
}

#[test]
fn test_price_rounding_rejects_other_precisions() {
    let dir = TempDir::new().unwrap();
    sovbond(&dir)
        .args([
            "price",
            "--settle",
            "2022-11-22",
            "--maturity",
            "2034-05-15",
            "--yield",
            "0.04355",
            "--rounding",
            "5",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 3 or 4 decimal places"));
}

#[test]
fn test_bill_rejects_average_inflation() {
    let dir = TempDir::new().unwrap();
    sovbond(&dir)
        .args([
            "price",
            "--settle",
            "2023-09-26",
            "--maturity",
            "2024-07-31",
            "--yield",
            "0.05",
            "--bill",
            "--average-inflation",
            "0.02",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--average-inflation"));
}

#[test]
fn test_yield_requires_a_price() {
    let dir = TempDir::new().unwrap();
    sovbond(&dir)
        .args(["yield", "--settle", "2022-11-22", "--maturity", "2034-05-15"])
        .assert()
        .failure();
}

#[test]
fn test_config_set_get_and_reset() {
    let dir = TempDir::new().unwrap();

    sovbond(&dir)
        .args(["config", "set", "decimal_precision", "3"])
        .assert()
        .success();

    sovbond(&dir)
        .args(["config", "get", "precision", "-f", "minimal"])
        .assert()
        .success()
        .stdout("3\n");

    // Configured precision applies to price output.
    sovbond(&dir)
        .args([
            "price",
            "--settle",
            "2023-09-26",
            "--maturity",
            "2024-07-31",
            "--yield",
            "0.05",
            "--bill",
            "-f",
            "minimal",
        ])
        .assert()
        .success()
        .stdout("95.939\n");

    sovbond(&dir)
        .args(["config", "reset", "--all"])
        .assert()
        .success();

    sovbond(&dir)
        .args(["config", "get", "decimal_precision", "-f", "minimal"])
        .assert()
        .success()
        .stdout("10\n");
}

#[test]
fn test_config_default_format_applies() {
    let dir = TempDir::new().unwrap();

    sovbond(&dir)
        .args(["config", "set", "default_format", "minimal"])
        .assert()
        .success();

    sovbond(&dir)
        .args([
            "price",
            "--settle",
            "2051-04-15",
            "--maturity",
            "2051-05-15",
            "--coupon",
            "0.0275",
            "--yield",
            "0.05348",
            "--decimals",
            "4",
        ])
        .assert()
        .success()
        .stdout("100.9313\n");
}

#[test]
fn test_config_rejects_invalid_value() {
    let dir = TempDir::new().unwrap();
    sovbond(&dir)
        .args(["config", "set", "default_frequency", "12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("default_frequency"));
}

#[test]
fn test_config_path_uses_override() {
    let dir = TempDir::new().unwrap();
    sovbond(&dir)
        .args(["config", "path", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"));
}
