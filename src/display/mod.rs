//! Display formatting for terminal output
//!
//! Renders the dashboard and the audit history as plain text.

pub mod dashboard;
pub mod history;

pub use dashboard::format_dashboard;
pub use history::format_history;
