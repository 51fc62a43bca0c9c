//! Tabular store layer for Bunker
//!
//! The budget lives in four named tables of typed cells. Everything above
//! this module talks to a [`TabularStore`]: full-table reads, single-cell
//! updates by (row, column) and row appends. Two backends are provided, an
//! in-memory one and a directory of CSV files.

pub mod cell;
pub mod csv_file;
pub mod memory;
pub mod schema;

pub use cell::{Cell, Row};
pub use csv_file::CsvStore;
pub use memory::MemoryStore;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BunkerResult;

/// The named tables the budget is kept in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    /// One row per budget line item
    Configuration,
    /// Current amount per (card, category)
    #[serde(rename = "current_balances")]
    Balances,
    /// Append-only transaction log
    Transactions,
    /// Optional card due days
    CreditCards,
}

impl Table {
    /// All tables, in the order they are initialized
    pub fn all() -> [Table; 4] {
        [
            Table::Configuration,
            Table::Balances,
            Table::Transactions,
            Table::CreditCards,
        ]
    }

    /// Storage name of the table
    pub fn name(&self) -> &'static str {
        match self {
            Table::Configuration => "configuration",
            Table::Balances => "current_balances",
            Table::Transactions => "transactions",
            Table::CreditCards => "credit_cards",
        }
    }

    /// Header row written when the table is created
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Table::Configuration => schema::configuration::HEADERS,
            Table::Balances => schema::balances::HEADERS,
            Table::Transactions => schema::transactions::HEADERS,
            Table::CreditCards => schema::credit_cards::HEADERS,
        }
    }

    /// Whether a missing table reads as empty instead of failing
    pub fn is_optional(&self) -> bool {
        matches!(self, Table::CreditCards)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Capability the core consumes to read and mutate the budget tables
///
/// Row indices are 0-based and count data rows only (the header is not a
/// row). Implementations serialize each call; nothing here makes a
/// read-then-write sequence atomic.
pub trait TabularStore {
    /// Read every data row of a table
    fn read_table(&self, table: Table) -> BunkerResult<Vec<Row>>;

    /// Overwrite a single cell
    fn update_cell(&self, table: Table, row: usize, column: usize, value: Cell)
        -> BunkerResult<()>;

    /// Append a row at the end of a table
    fn append_row(&self, table: Table, row: Row) -> BunkerResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names() {
        assert_eq!(Table::Configuration.to_string(), "configuration");
        assert_eq!(Table::Balances.name(), "current_balances");
        assert_eq!(Table::Transactions.headers().len(), 5);
    }

    #[test]
    fn test_only_credit_cards_are_optional() {
        let optional: Vec<_> = Table::all().into_iter().filter(|t| t.is_optional()).collect();
        assert_eq!(optional, vec![Table::CreditCards]);
    }
}
