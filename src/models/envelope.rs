//! Envelope configuration and the derived envelope view
//!
//! An envelope is a budget line tied to a card: a target amount and the
//! balance currently set aside for it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Money;
use crate::store::schema::configuration as col;
use crate::store::{Cell, Row};

/// How an envelope takes part in the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeKind {
    /// Mandatory recurring obligation; counts toward the amount to set aside
    Fixed,
    /// Paid through the half-month transfer; not shown as an envelope
    Subscription,
    /// Discretionary spending
    Flexible,
}

impl EnvelopeKind {
    /// Parse a kind cell. Unknown labels are flexible spending.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "fixed" | "fijo" => Self::Fixed,
            "subscription" | "suscripcion" | "suscripción" => Self::Subscription,
            _ => Self::Flexible,
        }
    }
}

impl fmt::Display for EnvelopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "Fixed"),
            Self::Subscription => write!(f, "Subscription"),
            Self::Flexible => write!(f, "Flexible"),
        }
    }
}

/// One configured budget line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeConfig {
    /// Lower runs first; unreadable priorities sort last
    pub priority: i64,
    pub name: String,
    pub category: String,
    pub card: String,
    pub kind: EnvelopeKind,
    /// Day of month the obligation is due
    pub due_day: Option<u32>,
    pub target: Money,
}

impl EnvelopeConfig {
    /// Decode a configuration row. Rows without a name are not envelopes.
    pub fn from_row(row: &Row) -> Option<Self> {
        let name = Cell::at(row, col::NAME).as_text();
        if name.is_empty() {
            return None;
        }

        Some(Self {
            priority: priority(Cell::at(row, col::PRIORITY)),
            name,
            category: Cell::at(row, col::CATEGORY).as_text(),
            card: Cell::at(row, col::CARD).as_text(),
            kind: EnvelopeKind::parse(&Cell::at(row, col::KIND).as_text()),
            due_day: Cell::at(row, col::DUE_DAY).as_day(),
            target: Cell::at(row, col::TARGET).as_money(),
        })
    }

}

/// Blank priorities sort first as 0; unreadable ones sort last
fn priority(cell: &Cell) -> i64 {
    if cell.as_text().is_empty() {
        return 0;
    }
    cell.as_i64().unwrap_or(i64::MAX)
}

/// Progress classification of an envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Success,
    Warning,
    Danger,
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
        }
    }
}

/// A configured envelope joined with its current balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(flatten)]
    pub config: EnvelopeConfig,
    /// Balance currently in the envelope
    pub actual: Money,
    /// `max(0, target - actual)`
    pub shortfall: Money,
    /// 0-100
    pub progress_pct: u8,
    pub status: StatusColor,
}

impl Envelope {
    pub fn priority(&self) -> i64 {
        self.config.priority
    }

    pub fn card(&self) -> &str {
        &self.config.card
    }

    pub fn is_fixed(&self) -> bool {
        self.config.kind == EnvelopeKind::Fixed
    }
}

/// Envelopes sharing a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeGroup {
    pub card: String,
    /// Lowest priority among the items
    pub min_priority: i64,
    pub items: Vec<Envelope>,
}

impl EnvelopeGroup {
    /// Sum of shortfalls across the group
    pub fn total_shortfall(&self) -> Money {
        self.items.iter().map(|e| e.shortfall).sum()
    }
}
