//! Dashboard service
//!
//! Reads the tables fresh on every call and assembles the full dashboard:
//! grouped envelopes, alerts, totals and the option lists for input forms.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::Settings;
use crate::error::BunkerResult;
use crate::models::{
    CreditCard, DashboardView, EnvelopeConfig, HalfMonth, OptionLists, Summary, Transaction,
};
use crate::store::{Table, TabularStore};

use super::aggregator::aggregate;
use super::alerts::{card_dues, due_date_alerts, transfer_done_this_period};
use super::balance_index::BalanceIndex;
use super::grouping::group_envelopes;

/// Service assembling the dashboard view
pub struct DashboardService<'a> {
    store: &'a dyn TabularStore,
    settings: &'a Settings,
}

impl<'a> DashboardService<'a> {
    /// Create a new dashboard service
    pub fn new(store: &'a dyn TabularStore, settings: &'a Settings) -> Self {
        Self { store, settings }
    }

    /// Configured envelope lines in table order
    pub fn envelope_configs(&self) -> BunkerResult<Vec<EnvelopeConfig>> {
        let rows = self.store.read_table(Table::Configuration)?;
        Ok(rows.iter().filter_map(EnvelopeConfig::from_row).collect())
    }

    /// Build the dashboard as of `today`
    pub fn build(&self, today: NaiveDate) -> BunkerResult<DashboardView> {
        let configs = self.envelope_configs()?;
        let index = BalanceIndex::from_rows(&self.store.read_table(Table::Balances)?);
        let transactions: Vec<Transaction> = self
            .store
            .read_table(Table::Transactions)?
            .iter()
            .filter_map(Transaction::from_row)
            .collect();
        let cards: Vec<CreditCard> = self
            .store
            .read_table(Table::CreditCards)?
            .iter()
            .filter_map(CreditCard::from_row)
            .collect();

        debug!(
            envelopes = configs.len(),
            balances = index.len(),
            transactions = transactions.len(),
            cards = cards.len(),
            "building dashboard"
        );

        let alerts = due_date_alerts(&configs, today, self.settings);
        let options = option_lists(&configs, &index);
        let aggregation = aggregate(configs, &index);
        let grouped = group_envelopes(aggregation.envelopes);

        Ok(DashboardView {
            fixed_groups: grouped.fixed,
            flexible_groups: grouped.flexible,
            alerts,
            card_dues: card_dues(&cards, today, self.settings),
            summary: Summary {
                to_set_aside: aggregation.to_set_aside,
                half_month: HalfMonth::of(today),
                subscriptions_total: aggregation.subscriptions_total,
                subscription_transfer_done: transfer_done_this_period(
                    &transactions,
                    today,
                    &self.settings.transfer_marker,
                ),
            },
            options,
        })
    }
}

fn option_lists(configs: &[EnvelopeConfig], index: &BalanceIndex) -> OptionLists {
    let distinct = |values: Vec<&String>| -> Vec<String> {
        values
            .into_iter()
            .filter(|v| !v.is_empty())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    };

    OptionLists {
        envelope_names: distinct(configs.iter().map(|c| &c.name).collect()),
        categories: distinct(configs.iter().map(|c| &c.category).collect()),
        cards: distinct(configs.iter().map(|c| &c.card).collect()),
        pairs: index.pairs().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertSeverity, EnvelopeKind, Money, StatusColor};
    use crate::store::{Cell, MemoryStore, Row};

    fn config_row(priority: f64, name: &str, category: &str, card: &str, due: Option<f64>, kind: &str, target: f64) -> Row {
        vec![
            Cell::Number(priority),
            name.into(),
            Cell::Empty,
            category.into(),
            card.into(),
            Cell::Empty,
            due.map(Cell::Number).unwrap_or_default(),
            kind.into(),
            Cell::Number(target),
        ]
    }

    fn balance_row(card: &str, category: &str, amount: f64) -> Row {
        vec![card.into(), category.into(), Cell::Number(amount)]
    }

    fn fixture() -> MemoryStore {
        MemoryStore::new()
            .with_table(
                Table::Configuration,
                vec![
                    config_row(3.0, "Rent", "Housing", "Visa", Some(12.0), "Fijo", 800.0),
                    config_row(1.0, "Loan", "Debt", "Debit", None, "Fijo", 300.0),
                    config_row(2.0, "Groceries", "Food", "Visa", None, "Variable", 200.0),
                    config_row(4.0, "Netflix", "Streaming", "Visa", Some(8.0), "Suscripcion", 15.0),
                    config_row(5.0, "", "Ghost", "Visa", None, "Fijo", 999.0),
                    config_row(6.0, "Fun", "Food", "Amex", None, "Variable", 0.0),
                ],
            )
            .with_table(
                Table::Balances,
                vec![
                    balance_row("Visa", "Housing", 600.0),
                    balance_row("Debit", "Debt", 300.0),
                    balance_row("Visa", "Food", 50.0),
                    balance_row("Amex", "Food", 20.0),
                ],
            )
            .with_table(
                Table::Transactions,
                vec![vec![
                    "2025-03-03 10:00:00".into(),
                    "SUBSCRIPTION TRANSFER".into(),
                    Cell::Number(15.0),
                    "Subscriptions".into(),
                    Cell::Empty,
                ]],
            )
            .with_table(
                Table::CreditCards,
                vec![vec!["Visa".into(), Cell::Empty, Cell::Number(14.0)]],
            )
    }

    fn build(store: &MemoryStore, today: NaiveDate) -> DashboardView {
        let settings = Settings::default();
        DashboardService::new(store, &settings).build(today).unwrap()
    }

    #[test]
    fn test_dashboard_groups_and_totals() {
        let store = fixture();
        let view = build(&store, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());

        let fixed: Vec<_> = view
            .fixed_groups
            .iter()
            .map(|g| (g.card.as_str(), g.items.iter().map(|e| e.config.name.as_str()).collect::<Vec<_>>()))
            .collect();
        assert_eq!(fixed, vec![("Debit", vec!["Loan"]), ("Visa", vec!["Rent"])]);

        let flexible: Vec<_> = view.flexible_groups.iter().map(|g| g.card.as_str()).collect();
        assert_eq!(flexible, vec!["Visa", "Amex"]);

        let fun = &view.flexible_groups[1].items[0];
        assert_eq!(fun.progress_pct, 100);
        assert_eq!(fun.status, StatusColor::Success);

        // Rent shortfall 200, Loan fully funded
        assert_eq!(view.summary.to_set_aside, Money::from_units(200));
        assert_eq!(view.summary.subscriptions_total, Money::from_units(15));
        assert!(view.summary.subscription_transfer_done);
        assert_eq!(view.summary.half_month, HalfMonth::First);
    }

    #[test]
    fn test_dashboard_alerts_include_subscriptions() {
        let store = fixture();
        let view = build(&store, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());

        let messages: Vec<_> = view.alerts.iter().map(|a| (a.message.as_str(), a.severity)).collect();
        assert_eq!(
            messages,
            vec![
                ("Pay Rent in 2 days", AlertSeverity::Warning),
                ("Netflix OVERDUE", AlertSeverity::Danger),
            ]
        );
        assert_eq!(view.card_dues.len(), 1);
        assert_eq!(view.card_dues[0].days_left, 4);
        assert_eq!(view.card_dues[0].tier, StatusColor::Warning);
    }

    #[test]
    fn test_dashboard_second_half_resets_transfer_flag() {
        let store = fixture();
        let view = build(&store, NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        assert_eq!(view.summary.half_month, HalfMonth::Second);
        assert!(!view.summary.subscription_transfer_done);
    }

    #[test]
    fn test_option_lists() {
        let store = fixture();
        let view = build(&store, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());

        assert_eq!(view.options.envelope_names, vec!["Fun", "Groceries", "Loan", "Netflix", "Rent"]);
        assert_eq!(view.options.categories, vec!["Debt", "Food", "Housing", "Streaming"]);
        assert_eq!(view.options.cards, vec!["Amex", "Debit", "Visa"]);
        assert_eq!(view.options.pairs.len(), 4);
        assert_eq!(view.options.pairs[0], ("Visa".to_string(), "Housing".to_string()));
    }

    #[test]
    fn test_envelope_configs_skip_nameless_rows() {
        let store = fixture();
        let settings = Settings::default();
        let configs = DashboardService::new(&store, &settings).envelope_configs().unwrap();
        assert_eq!(configs.len(), 5);
        assert!(configs.iter().any(|c| c.kind == EnvelopeKind::Subscription));
    }

    #[test]
    fn test_missing_table_is_an_error() {
        let store = fixture();
        store.remove_table(Table::Balances).unwrap();
        let settings = Settings::default();
        assert!(DashboardService::new(&store, &settings)
            .build(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
            .is_err());
    }
}
