//! Service layer for Bunker
//!
//! The service layer sits on top of the tabular store: the read path builds
//! the dashboard, the write path records transactions and balance edits.

pub mod aggregator;
pub mod alerts;
pub mod balance_index;
pub mod dashboard;
pub mod grouping;
pub mod recorder;

pub use balance_index::BalanceIndex;
pub use dashboard::DashboardService;
pub use recorder::{BalanceUpdate, ExpenseInput, PaymentInput, RecorderService};
