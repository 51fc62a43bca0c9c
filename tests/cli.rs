use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BIN_NAME: &str = "bunker";

fn bunker(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("BUNKER_DATA_DIR", dir);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn seeded_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    bunker(dir.path()).arg("init").assert().success();

    let data = dir.path().join("data");
    fs::write(
        data.join("configuration.csv"),
        "priority,name,notes,category,card,monthly,due_day,kind,target\n\
         2,Rent,,Housing,Visa,,12,Fijo,800\n\
         1,Loan,,Debt,Debit,,,Fijo,300\n\
         3,Groceries,,Food,Visa,,,Variable,200\n\
         4,Netflix,,Streaming,Visa,,8,Suscripcion,15\n",
    )
    .unwrap();
    fs::write(
        data.join("current_balances.csv"),
        "card,category,amount\nVisa,Housing,600\nDebit,Debt,300\nVisa,Food,50\n",
    )
    .unwrap();
    dir
}

#[test]
fn cli_init_creates_tables() {
    let dir = TempDir::new().unwrap();
    bunker(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Initialization complete!"));

    let data = dir.path().join("data");
    for name in ["configuration", "current_balances", "transactions", "credit_cards"] {
        assert!(data.join(format!("{}.csv", name)).exists(), "{} missing", name);
    }
    assert!(dir.path().join("config.json").exists());

    bunker(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(contains("All tables already exist."));
}

#[test]
fn cli_expense_updates_balance_and_log() {
    let dir = seeded_dir();

    bunker(dir.path())
        .args(["expense", "Food", "20", "--card", "Visa", "-d", "market"])
        .assert()
        .success()
        .stdout(contains("OK"));

    let data = dir.path().join("data");
    let balances = fs::read_to_string(data.join("current_balances.csv")).unwrap();
    assert!(balances.contains("Visa,Food,30"));
    assert!(balances.contains("Visa,Housing,600"));

    let log = fs::read_to_string(data.join("transactions.csv")).unwrap();
    assert_eq!(log.lines().count(), 2);
    assert!(log.lines().nth(1).unwrap().ends_with(",Food,20,Visa,market"));

    bunker(dir.path())
        .args(["history", "--limit", "5"])
        .assert()
        .success()
        .stdout(contains("APPEND transactions").and(contains("UPDATE current_balances")));
}

#[test]
fn cli_expense_without_balance_row_fails() {
    let dir = seeded_dir();

    bunker(dir.path())
        .args(["expense", "Gas", "20", "--card", "Visa"])
        .assert()
        .code(1)
        .stdout(contains("Not found: Balance Visa / Gas"));

    let log = fs::read_to_string(dir.path().join("data").join("transactions.csv")).unwrap();
    assert_eq!(log.lines().count(), 1);
}

#[test]
fn cli_set_balance() {
    let dir = seeded_dir();

    bunker(dir.path())
        .args(["set-balance", "Debit", "Debt", "-12.5"])
        .assert()
        .success()
        .stdout(contains("OK"));
    let balances =
        fs::read_to_string(dir.path().join("data").join("current_balances.csv")).unwrap();
    assert!(balances.contains("Debit,Debt,-12.5"));

    let before = balances.clone();
    bunker(dir.path())
        .args(["set-balance", "Debit", "Food", "10"])
        .assert()
        .code(1)
        .stdout(contains("Not found"));
    let after = fs::read_to_string(dir.path().join("data").join("current_balances.csv")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn cli_rejects_non_positive_amounts() {
    let dir = seeded_dir();

    bunker(dir.path())
        .args(["income", "Salary", "0", "--card", "Visa"])
        .assert()
        .code(1)
        .stdout(contains("Error: Validation error"));
}

#[test]
fn cli_dashboard_json() {
    let dir = seeded_dir();

    let output = bunker(dir.path())
        .args(["dashboard", "--format", "json", "--date", "2025-03-10"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let dashboard = &value["dashboard"];
    assert_eq!(dashboard["summary"]["to_set_aside"], 20000);
    assert_eq!(dashboard["summary"]["subscriptions_total"], 1500);
    assert_eq!(dashboard["summary"]["subscription_transfer_done"], false);
    assert_eq!(dashboard["fixed_groups"][0]["card"], "Debit");
    assert_eq!(dashboard["fixed_groups"][1]["card"], "Visa");
    assert_eq!(dashboard["alerts"][0]["message"], "Pay Rent in 2 days");
    assert_eq!(dashboard["alerts"][1]["message"], "Netflix OVERDUE");
}

#[test]
fn cli_transfer_done_sets_flag() {
    let dir = seeded_dir();

    bunker(dir.path())
        .args(["transfer-done", "15"])
        .assert()
        .success();

    bunker(dir.path())
        .arg("dashboard")
        .assert()
        .success()
        .stdout(contains("transferred this period"));
}

#[test]
fn cli_dashboard_table() {
    let dir = seeded_dir();

    bunker(dir.path())
        .args(["dashboard", "--date", "2025-03-20"])
        .assert()
        .success()
        .stdout(
            contains("To set aside: $200.00")
                .and(contains("Period: 2nd half"))
                .and(contains("Groceries")),
        );
}

#[test]
fn cli_dashboard_before_init_fails() {
    let dir = TempDir::new().unwrap();

    bunker(dir.path())
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(contains("Table not found"));
}
