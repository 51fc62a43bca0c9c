//! Caller boundary
//!
//! Every write operation returns an [`Outcome`] instead of a `Result`, so a
//! caller driving the budget from a form or a script gets a tagged status
//! it can print or match on. Reads return [`ApiError`] on failure.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::Settings;
use crate::error::{BunkerError, BunkerResult};
use crate::models::{DashboardView, Money};
use crate::services::{
    BalanceUpdate, DashboardService, ExpenseInput, PaymentInput, RecorderService,
};
use crate::store::TabularStore;

/// Category of a failed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// The tabular store could not be read or written
    Store,
    /// The input was rejected before anything was written
    Validation,
    /// The audit log could not be read
    Audit,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Store => write!(f, "store"),
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Audit => write!(f, "audit"),
        }
    }
}

/// Result of a write operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Ok,
    NotFound { detail: String },
    Failed { kind: ErrorKind, detail: String },
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ok => write!(f, "OK"),
            Outcome::NotFound { detail } => write!(f, "Not found: {}", detail),
            Outcome::Failed { detail, .. } => write!(f, "Error: {}", detail),
        }
    }
}

impl<T> From<BunkerResult<T>> for Outcome {
    fn from(result: BunkerResult<T>) -> Self {
        match result {
            Ok(_) => Outcome::Ok,
            Err(BunkerError::NotFound {
                entity_type,
                identifier,
            }) => {
                debug!(entity_type, identifier = %identifier, "operation target not found");
                Outcome::NotFound {
                    detail: format!("{} {}", entity_type, identifier),
                }
            }
            Err(err) => {
                let api_err = ApiError::from(err);
                if api_err.kind != ErrorKind::Validation {
                    warn!(kind = %api_err.kind, error = %api_err.detail, "operation failed");
                }
                Outcome::Failed {
                    kind: api_err.kind,
                    detail: api_err.detail,
                }
            }
        }
    }
}

/// Failure of a read operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub detail: String,
}

impl From<BunkerError> for ApiError {
    fn from(err: BunkerError) -> Self {
        let kind = match err {
            BunkerError::Validation(_) => ErrorKind::Validation,
            _ => ErrorKind::Store,
        };
        Self {
            kind,
            detail: err.to_string(),
        }
    }
}

/// Build the full dashboard as of `today`
pub fn get_dashboard_data(
    store: &dyn TabularStore,
    settings: &Settings,
    today: NaiveDate,
) -> Result<DashboardView, ApiError> {
    DashboardService::new(store, settings)
        .build(today)
        .map_err(|err| {
            warn!(error = %err, "failed to build dashboard");
            ApiError::from(err)
        })
}

fn recorder<'a>(
    store: &'a dyn TabularStore,
    settings: &'a Settings,
    audit: Option<&'a AuditLogger>,
) -> RecorderService<'a> {
    let service = RecorderService::new(store, settings);
    match audit {
        Some(logger) => service.with_audit(logger),
        None => service,
    }
}

pub fn record_expense(
    store: &dyn TabularStore,
    settings: &Settings,
    audit: Option<&AuditLogger>,
    input: ExpenseInput,
) -> Outcome {
    recorder(store, settings, audit).record_expense(input).into()
}

pub fn record_free_expense(
    store: &dyn TabularStore,
    settings: &Settings,
    audit: Option<&AuditLogger>,
    input: ExpenseInput,
) -> Outcome {
    recorder(store, settings, audit)
        .record_free_expense(input)
        .into()
}

pub fn record_income(
    store: &dyn TabularStore,
    settings: &Settings,
    audit: Option<&AuditLogger>,
    input: ExpenseInput,
) -> Outcome {
    recorder(store, settings, audit).record_income(input).into()
}

pub fn record_payment(
    store: &dyn TabularStore,
    settings: &Settings,
    audit: Option<&AuditLogger>,
    input: PaymentInput,
) -> Outcome {
    recorder(store, settings, audit).record_payment(input).into()
}

pub fn record_subscription_transfer(
    store: &dyn TabularStore,
    settings: &Settings,
    audit: Option<&AuditLogger>,
    input: PaymentInput,
) -> Outcome {
    recorder(store, settings, audit)
        .record_subscription_transfer(input)
        .into()
}

pub fn set_balance_direct(
    store: &dyn TabularStore,
    settings: &Settings,
    audit: Option<&AuditLogger>,
    update: BalanceUpdate,
) -> Outcome {
    recorder(store, settings, audit)
        .set_balance_direct(update)
        .into()
}

pub fn record_recurring_transfer_done(
    store: &dyn TabularStore,
    settings: &Settings,
    audit: Option<&AuditLogger>,
    amount: Money,
) -> Outcome {
    recorder(store, settings, audit)
        .record_recurring_transfer_done(amount)
        .into()
}

/// Most recent audit entries, oldest first
pub fn recent_history(audit: &AuditLogger, limit: usize) -> Result<Vec<AuditEntry>, ApiError> {
    audit.read_recent(limit).map_err(|err| ApiError {
        kind: ErrorKind::Audit,
        detail: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Cell, MemoryStore, Row, Table};

    struct BrokenStore;

    impl TabularStore for BrokenStore {
        fn read_table(&self, _table: Table) -> BunkerResult<Vec<Row>> {
            Err(BunkerError::Storage("connection reset".into()))
        }

        fn update_cell(&self, _: Table, _: usize, _: usize, _: Cell) -> BunkerResult<()> {
            Err(BunkerError::Storage("connection reset".into()))
        }

        fn append_row(&self, _: Table, _: Row) -> BunkerResult<()> {
            Err(BunkerError::Storage("connection reset".into()))
        }
    }

    fn expense(card: &str, amount: i64) -> ExpenseInput {
        ExpenseInput {
            category: "Comida".into(),
            amount: Money::from_units(amount),
            card: card.into(),
            description: String::new(),
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::new().with_table(
            Table::Balances,
            vec![vec!["Visa".into(), "Comida".into(), Cell::Number(100.0)]],
        )
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Ok.to_string(), "OK");
        assert_eq!(
            Outcome::NotFound { detail: "Balance Visa / Gas".into() }.to_string(),
            "Not found: Balance Visa / Gas"
        );
        assert_eq!(
            Outcome::Failed { kind: ErrorKind::Store, detail: "boom".into() }.to_string(),
            "Error: boom"
        );
    }

    #[test]
    fn test_record_expense_outcomes() {
        let store = store();
        let settings = Settings::default();

        assert_eq!(record_expense(&store, &settings, None, expense("Visa", 10)), Outcome::Ok);

        let missing = record_expense(&store, &settings, None, expense("Amex", 10));
        assert_eq!(
            missing,
            Outcome::NotFound { detail: "Balance Amex / Comida".into() }
        );

        match record_expense(&store, &settings, None, expense("Visa", -1)) {
            Outcome::Failed { kind, .. } => assert_eq!(kind, ErrorKind::Validation),
            other => panic!("Expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_store_failures_become_outcomes() {
        let settings = Settings::default();
        let outcome = record_free_expense(&BrokenStore, &settings, None, expense("Visa", 5));
        assert_eq!(
            outcome,
            Outcome::Failed {
                kind: ErrorKind::Store,
                detail: "Storage error: connection reset".into()
            }
        );
        assert!(outcome.to_string().starts_with("Error: "));

        let err = get_dashboard_data(&BrokenStore, &settings, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Store);
    }

    #[test]
    fn test_transfer_done_flips_dashboard_flag() {
        let store = store();
        let settings = Settings::default();
        let today = chrono::Local::now().date_naive();

        let before = get_dashboard_data(&store, &settings, today).unwrap();
        assert!(!before.summary.subscription_transfer_done);

        let outcome = record_recurring_transfer_done(&store, &settings, None, Money::from_units(25));
        assert!(outcome.is_ok());

        let after = get_dashboard_data(&store, &settings, today).unwrap();
        assert!(after.summary.subscription_transfer_done);
    }

    #[test]
    fn test_set_balance_not_found() {
        let store = store();
        let settings = Settings::default();
        let outcome = set_balance_direct(
            &store,
            &settings,
            None,
            BalanceUpdate {
                card: "Visa".into(),
                category: "Gas".into(),
                new_amount: Money::from_units(5),
            },
        );
        assert!(matches!(outcome, Outcome::NotFound { .. }));
    }

    #[test]
    fn test_recent_history() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("audit.log");
        let logger = AuditLogger::new(path.clone());
        let store = store();
        let settings = Settings::default();

        record_expense(&store, &settings, Some(&logger), expense("Visa", 10));
        let entries = recent_history(&logger, 1).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].table, Table::Balances);

        std::fs::write(&path, "not json\n").unwrap();
        assert_eq!(recent_history(&logger, 5).unwrap_err().kind, ErrorKind::Audit);
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(Outcome::NotFound { detail: "x".into() }).unwrap();
        assert_eq!(json["status"], "not_found");
        assert_eq!(json["detail"], "x");
    }
}
