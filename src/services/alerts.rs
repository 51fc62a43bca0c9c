//! Alert engine
//!
//! Three independent rules:
//!
//! - due-day alerts for configured envelopes, computed on the day of month
//!   alone (a due day early in the month never reads as "next month")
//! - the half-month subscription transfer flag, found by scanning the log
//! - card payment countdowns, which do roll over into the next month
//!
//! The first and last rules disagree about month boundaries. That mirrors
//! how the budget is used and is kept as is.

use chrono::{Datelike, Months, NaiveDate};

use crate::config::Settings;
use crate::models::{Alert, CardDue, CreditCard, EnvelopeConfig, StatusColor, Transaction};

/// Due-soon and overdue alerts for configuration lines with a due day
pub fn due_date_alerts(configs: &[EnvelopeConfig], today: NaiveDate, settings: &Settings) -> Vec<Alert> {
    let current_day = i64::from(today.day());

    configs
        .iter()
        .filter_map(|config| {
            let due_day = i64::from(config.due_day?);
            let days = due_day - current_day;

            if (0..=settings.due_soon_days).contains(&days) {
                Some(Alert::due_soon(&config.name, days))
            } else if days < 0 && days.abs() < settings.overdue_days {
                Some(Alert::overdue(&config.name))
            } else {
                None
            }
        })
        .collect()
}

/// Whether the subscription transfer was already logged this half-month
///
/// Scans from the most recently appended transaction backwards and stops
/// at the first match.
pub fn transfer_done_this_period(transactions: &[Transaction], today: NaiveDate, marker: &str) -> bool {
    transactions
        .iter()
        .rev()
        .any(|txn| txn.label == marker && txn.in_period_of(today))
}

/// Next occurrence of `due_day`: this month unless today is already past it
///
/// Day numbers beyond the end of a month land on its last day.
pub fn next_due_date(today: NaiveDate, due_day: u32) -> Option<NaiveDate> {
    let month_start = today.with_day(1)?;
    let month_start = if today.day() > due_day {
        month_start.checked_add_months(Months::new(1))?
    } else {
        month_start
    };

    let last_day = month_start
        .checked_add_months(Months::new(1))?
        .pred_opt()?
        .day();
    month_start.with_day(due_day.min(last_day))
}

/// Tier for a card payment `days_left` days away
pub fn card_tier(days_left: i64, settings: &Settings) -> StatusColor {
    if days_left <= settings.card_danger_days {
        StatusColor::Danger
    } else if days_left <= settings.card_warning_days {
        StatusColor::Warning
    } else {
        StatusColor::Success
    }
}

/// Payment countdown for every card with a due day, soonest first
pub fn card_dues(cards: &[CreditCard], today: NaiveDate, settings: &Settings) -> Vec<CardDue> {
    let mut dues: Vec<CardDue> = cards
        .iter()
        .filter_map(|card| {
            let due_date = next_due_date(today, card.due_day?)?;
            let days_left = (due_date - today).num_days();
            Some(CardDue {
                card: card.name.clone(),
                due_date,
                days_left,
                tier: card_tier(days_left, settings),
            })
        })
        .collect();

    dues.sort_by_key(|d| d.days_left);
    dues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertSeverity, EnvelopeKind, Money};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn due(name: &str, due_day: Option<u32>) -> EnvelopeConfig {
        EnvelopeConfig {
            priority: 1,
            name: name.into(),
            category: name.into(),
            card: "Visa".into(),
            kind: EnvelopeKind::Fixed,
            due_day,
            target: Money::zero(),
        }
    }

    fn alerts_for(due_day: u32, today: u32) -> Vec<Alert> {
        due_date_alerts(&[due("Rent", Some(due_day))], day(today), &Settings::default())
    }

    #[test]
    fn test_due_soon() {
        let alerts = alerts_for(12, 10);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::Warning);
        assert_eq!(alerts[0].message, "Pay Rent in 2 days");
    }

    #[test]
    fn test_due_soon_window_edges() {
        assert_eq!(alerts_for(10, 10)[0].message, "Pay Rent in 0 days");
        assert_eq!(alerts_for(13, 10)[0].message, "Pay Rent in 3 days");
        assert!(alerts_for(14, 10).is_empty());
    }

    #[test]
    fn test_overdue_cutoffs() {
        let three_late = alerts_for(17, 20);
        assert_eq!(three_late.len(), 1);
        assert_eq!(three_late[0].severity, AlertSeverity::Danger);
        assert_eq!(three_late[0].message, "Rent OVERDUE");

        assert_eq!(alerts_for(16, 20).len(), 1);
        assert!(alerts_for(15, 20).is_empty());
    }

    #[test]
    fn test_no_month_rollover() {
        // Due on the 2nd, today the 28th: 26 days past, no alert even though
        // the next due date is only a few days away
        assert!(alerts_for(2, 28).is_empty());
    }

    #[test]
    fn test_rows_without_due_day_are_ignored() {
        let alerts = due_date_alerts(&[due("Food", None)], day(10), &Settings::default());
        assert!(alerts.is_empty());
    }

    fn txn(d: u32, label: &str) -> Transaction {
        Transaction::new(
            day(d).and_hms_opt(12, 0, 0).unwrap(),
            label,
            Money::from_units(25),
            "Subscriptions",
            "",
        )
    }

    #[test]
    fn test_transfer_flag_same_half() {
        let log = vec![txn(2, "Comida"), txn(4, "SUBSCRIPTION TRANSFER")];
        assert!(transfer_done_this_period(&log, day(10), "SUBSCRIPTION TRANSFER"));
    }

    #[test]
    fn test_transfer_flag_other_half() {
        let log = vec![txn(4, "SUBSCRIPTION TRANSFER")];
        assert!(!transfer_done_this_period(&log, day(20), "SUBSCRIPTION TRANSFER"));
    }

    #[test]
    fn test_transfer_flag_requires_exact_label() {
        let log = vec![txn(4, "subscription transfer"), txn(5, "SUBSCRIPTION TRANSFER ")];
        assert!(!transfer_done_this_period(&log, day(10), "SUBSCRIPTION TRANSFER"));
    }

    #[test]
    fn test_transfer_flag_other_month() {
        let mut last_month = txn(4, "SUBSCRIPTION TRANSFER");
        last_month.timestamp = NaiveDate::from_ymd_opt(2025, 2, 4)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert!(!transfer_done_this_period(&[last_month], day(10), "SUBSCRIPTION TRANSFER"));
    }

    #[test]
    fn test_next_due_date() {
        assert_eq!(next_due_date(day(10), 20), Some(day(20)));
        assert_eq!(next_due_date(day(10), 10), Some(day(10)));
        assert_eq!(
            next_due_date(day(25), 5),
            NaiveDate::from_ymd_opt(2025, 4, 5)
        );
        // April has 30 days
        assert_eq!(
            next_due_date(NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(), 31),
            NaiveDate::from_ymd_opt(2025, 4, 30)
        );
        // December rolls into the next year
        assert_eq!(
            next_due_date(NaiveDate::from_ymd_opt(2025, 12, 28).unwrap(), 3),
            NaiveDate::from_ymd_opt(2026, 1, 3)
        );
    }

    #[test]
    fn test_card_dues_tiers_and_order() {
        let cards = vec![
            CreditCard { name: "Amex".into(), due_day: Some(25) },
            CreditCard { name: "Visa".into(), due_day: Some(12) },
            CreditCard { name: "Debit".into(), due_day: None },
            CreditCard { name: "Store".into(), due_day: Some(16) },
        ];
        let dues = card_dues(&cards, day(10), &Settings::default());

        let summary: Vec<_> = dues.iter().map(|d| (d.card.as_str(), d.days_left, d.tier)).collect();
        assert_eq!(
            summary,
            vec![
                ("Visa", 2, StatusColor::Danger),
                ("Store", 6, StatusColor::Warning),
                ("Amex", 15, StatusColor::Success),
            ]
        );
    }

    #[test]
    fn test_card_due_rolls_over() {
        let cards = vec![CreditCard { name: "Visa".into(), due_day: Some(5) }];
        let dues = card_dues(&cards, day(28), &Settings::default());
        assert_eq!(dues[0].due_date, NaiveDate::from_ymd_opt(2025, 4, 5).unwrap());
        assert_eq!(dues[0].days_left, 8);
        assert_eq!(dues[0].tier, StatusColor::Success);
    }
}
