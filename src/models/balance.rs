//! Current balance of a (card, category) envelope

use serde::{Deserialize, Serialize};

use super::Money;
use crate::store::schema::balances as col;
use crate::store::{Cell, Row};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub card: String,
    pub category: String,
    pub amount: Money,
}

impl Balance {
    pub fn new(card: impl Into<String>, category: impl Into<String>, amount: Money) -> Self {
        Self {
            card: card.into(),
            category: category.into(),
            amount,
        }
    }

    /// Decode a balance row. Rows missing a card or category are skipped.
    pub fn from_row(row: &Row) -> Option<Self> {
        let card = Cell::at(row, col::CARD).as_text();
        let category = Cell::at(row, col::CATEGORY).as_text();
        if card.is_empty() || category.is_empty() {
            return None;
        }
        Some(Self {
            card,
            category,
            amount: Cell::at(row, col::AMOUNT).as_money(),
        })
    }

    /// Whether this row belongs to the given (card, category), ignoring surrounding whitespace
    pub fn matches(&self, card: &str, category: &str) -> bool {
        self.card == card.trim() && self.category == category.trim()
    }
}
