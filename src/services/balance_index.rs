//! Balance index
//!
//! Maps (card, category) to the current amount, built once per request
//! from the balances table.

use std::collections::HashMap;

use crate::models::{Balance, Money};
use crate::store::Row;

/// In-memory lookup of balances by (card, category)
#[derive(Debug, Clone, Default)]
pub struct BalanceIndex {
    amounts: HashMap<(String, String), Money>,
    /// Keys in first-seen order
    order: Vec<(String, String)>,
}

impl BalanceIndex {
    /// Build the index from balance rows
    ///
    /// Keys are trimmed, rows without a card or category are skipped and a
    /// later duplicate overwrites the earlier amount.
    pub fn from_rows(rows: &[Row]) -> Self {
        let mut index = Self::default();
        for balance in rows.iter().filter_map(Balance::from_row) {
            index.insert(balance);
        }
        index
    }

    fn insert(&mut self, balance: Balance) {
        let key = (balance.card, balance.category);
        if !self.amounts.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.amounts.insert(key, balance.amount);
    }

    /// Amount for (card, category); zero when the pair is unknown
    pub fn get(&self, card: &str, category: &str) -> Money {
        self.amounts
            .get(&(card.trim().to_string(), category.trim().to_string()))
            .copied()
            .unwrap_or_default()
    }

    /// Distinct (card, category) pairs in the order they first appear
    pub fn pairs(&self) -> &[(String, String)] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Cell;

    fn row(card: &str, category: &str, amount: Cell) -> Row {
        vec![card.into(), category.into(), amount]
    }

    #[test]
    fn test_lookup_trims_keys() {
        let index = BalanceIndex::from_rows(&[row(" Visa ", "Comida ", Cell::Number(55.5))]);
        assert_eq!(index.get("Visa", "Comida").cents(), 5550);
        assert_eq!(index.get("  Visa", " Comida"), Money::from_cents(5550));
    }

    #[test]
    fn test_unknown_pair_is_zero() {
        let index = BalanceIndex::from_rows(&[row("Visa", "Comida", Cell::Number(10.0))]);
        assert_eq!(index.get("Visa", "Gas"), Money::zero());
        assert_eq!(index.get("Amex", "Comida"), Money::zero());
        assert_eq!(index.pairs(), &[("Visa".to_string(), "Comida".to_string())]);
    }

    #[test]
    fn test_non_numeric_amounts_are_zero() {
        let index = BalanceIndex::from_rows(&[
            row("Visa", "Comida", Cell::text("pending")),
            row("Visa", "Gas", Cell::Empty),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("Visa", "Comida"), Money::zero());
        assert_eq!(index.get("Visa", "Gas"), Money::zero());
    }

    #[test]
    fn test_rows_missing_key_are_skipped() {
        let index = BalanceIndex::from_rows(&[
            row("", "Comida", Cell::Number(10.0)),
            row("Visa", "  ", Cell::Number(10.0)),
        ]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_later_duplicate_wins() {
        let index = BalanceIndex::from_rows(&[
            row("Visa", "Comida", Cell::Number(10.0)),
            row("Amex", "Gas", Cell::Number(5.0)),
            row("Visa ", "Comida", Cell::Number(99.0)),
        ]);
        assert_eq!(index.get("Visa", "Comida").cents(), 9900);
        assert_eq!(
            index.pairs(),
            &[
                ("Visa".to_string(), "Comida".to_string()),
                ("Amex".to_string(), "Gas".to_string())
            ]
        );
    }
}
