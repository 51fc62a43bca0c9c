//! Audit log for Bunker
//!
//! Every successful mutation of the budget tables is recorded as one line of
//! JSON (JSONL) in an append-only log, with the row before and after the
//! change where that applies.
//!
//! # Example
//!
//! ```rust,ignore
//! use bunker::audit::{AuditEntry, AuditLogger};
//! use bunker::store::Table;
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::append(Table::Transactions, "Comida 20.00 Visa", &txn))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
