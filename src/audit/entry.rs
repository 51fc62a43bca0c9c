//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Table;

/// Types of table mutations that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// A row was appended
    Append,
    /// A cell was overwritten
    Update,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Append => write!(f, "APPEND"),
            Operation::Update => write!(f, "UPDATE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Table that was written
    pub table: Table,

    /// Human-readable description of the change
    pub summary: String,

    /// JSON representation of the row before an update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// JSON representation of the row after the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Entry for an appended row
    pub fn append<T: Serialize>(table: Table, summary: impl Into<String>, row: &T) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Append,
            table,
            summary: summary.into(),
            before: None,
            after: serde_json::to_value(row).ok(),
        }
    }

    /// Entry for an updated row
    pub fn update<T: Serialize>(
        table: Table,
        summary: impl Into<String>,
        before: &T,
        after: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            table,
            summary: summary.into(),
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        format!(
            "[{}] {} {}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.table,
            self.summary
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_append_entry() {
        let entry = AuditEntry::append(Table::Transactions, "Comida 20.00", &json!({"label": "Comida"}));
        assert_eq!(entry.operation, Operation::Append);
        assert!(entry.before.is_none());
        assert_eq!(entry.after, Some(json!({"label": "Comida"})));
    }

    #[test]
    fn test_update_entry() {
        let entry = AuditEntry::update(
            Table::Balances,
            "Visa / Comida: 100.00 -> 80.00",
            &json!({"amount": 10000}),
            &json!({"amount": 8000}),
        );
        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.before, Some(json!({"amount": 10000})));
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::append(Table::Balances, "x", &json!({}));
        let line = serde_json::to_string(&entry).unwrap();
        assert!(line.contains("\"table\":\"current_balances\""));
        assert!(!line.contains("before"));

        let back: AuditEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(back.table, Table::Balances);
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::append(Table::Transactions, "Comida 20.00 Visa", &json!({}));
        let formatted = entry.format_human_readable();
        assert!(formatted.contains("APPEND transactions: Comida 20.00 Visa"));
    }
}
