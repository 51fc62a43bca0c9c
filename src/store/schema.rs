//! Column layouts of the budget tables.
//!
//! Positions are 0-based. Columns marked unused exist in the tables people
//! keep by hand and are skipped on read; writers fill them with empty cells.

/// Column mappings for the `configuration` table.
pub mod configuration {
    pub const PRIORITY: usize = 0;
    pub const NAME: usize = 1;
    /// free-form notes, unused
    pub const NOTES: usize = 2;
    pub const CATEGORY: usize = 3;
    pub const CARD: usize = 4;
    /// monthly amount, unused
    pub const MONTHLY: usize = 5;
    pub const DUE_DAY: usize = 6;
    pub const KIND: usize = 7;
    pub const TARGET: usize = 8;

    pub const HEADERS: &[&str] = &[
        "priority", "name", "notes", "category", "card", "monthly", "due_day", "kind", "target",
    ];
}

/// Column mappings for the `current_balances` table.
pub mod balances {
    pub const CARD: usize = 0;
    pub const CATEGORY: usize = 1;
    pub const AMOUNT: usize = 2;

    pub const HEADERS: &[&str] = &["card", "category", "amount"];
}

/// Column mappings for the `transactions` table.
pub mod transactions {
    pub const TIMESTAMP: usize = 0;
    pub const LABEL: usize = 1;
    pub const AMOUNT: usize = 2;
    pub const CARD: usize = 3;
    pub const NOTE: usize = 4;

    pub const HEADERS: &[&str] = &["timestamp", "label", "amount", "card", "note"];

    /// Format timestamps are written in
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
}

/// Column mappings for the optional `credit_cards` table.
pub mod credit_cards {
    pub const NAME: usize = 0;
    /// cut-off day, unused
    pub const CUTOFF_DAY: usize = 1;
    pub const DUE_DAY: usize = 2;

    pub const HEADERS: &[&str] = &["name", "cutoff_day", "due_day"];
}
