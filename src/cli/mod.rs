//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the api layer.

pub mod dashboard;
pub mod history;
pub mod record;

pub use dashboard::{handle_dashboard_command, DashboardArgs, DashboardFormat};
pub use history::{handle_history_command, HistoryArgs};
pub use record::{
    handle_record_command, BalanceArgs, ExpenseArgs, PaymentArgs, RecordCommand,
    TransferDoneArgs,
};

use chrono::NaiveDate;

use crate::models::Money;

/// clap value parser for amounts ("12.50", "$1,200", "-3")
pub fn parse_money(s: &str) -> Result<Money, String> {
    Money::parse(s).map_err(|e| e.to_string())
}

/// clap value parser for dates (YYYY-MM-DD)
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}
