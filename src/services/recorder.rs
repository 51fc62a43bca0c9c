//! Transaction recorder
//!
//! Appends rows to the transaction log and, for the operations that spend
//! out of an envelope, adjusts the matching balance cell in place.
//!
//! Balance rows are matched on the exact (trimmed card, trimmed category)
//! pair. When the table holds duplicates the last one is written, the same
//! row the balance index reports.
//!
//! Each operation reads the balances table, then writes. Nothing makes that
//! sequence atomic: a caller adding concurrent writers needs a per-key lock
//! or a versioned write in front of this service.

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::Settings;
use crate::error::{BunkerError, BunkerResult};
use crate::models::{Balance, Money, Transaction};
use crate::store::schema::balances::AMOUNT;
use crate::store::{Table, TabularStore};

/// Input for spending, free spending and income operations
#[derive(Debug, Clone)]
pub struct ExpenseInput {
    pub category: String,
    pub amount: Money,
    pub card: String,
    pub description: String,
}

/// Input for payments and subscription transfers
#[derive(Debug, Clone)]
pub struct PaymentInput {
    /// Label written to the log
    pub name: String,
    pub amount: Money,
    pub card: String,
    /// Balance category the payment comes out of
    pub category: String,
}

/// Input for overwriting a balance
#[derive(Debug, Clone)]
pub struct BalanceUpdate {
    pub card: String,
    pub category: String,
    pub new_amount: Money,
}

/// Service recording transactions and balance changes
pub struct RecorderService<'a> {
    store: &'a dyn TabularStore,
    settings: &'a Settings,
    audit: Option<&'a AuditLogger>,
    clock: Option<NaiveDateTime>,
}

impl<'a> RecorderService<'a> {
    /// Create a new recorder service
    pub fn new(store: &'a dyn TabularStore, settings: &'a Settings) -> Self {
        Self {
            store,
            settings,
            audit: None,
            clock: None,
        }
    }

    /// Record successful writes in an audit log
    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Stamp every written row with a fixed time instead of the local clock
    pub fn at(mut self, timestamp: NaiveDateTime) -> Self {
        self.clock = Some(timestamp);
        self
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.unwrap_or_else(|| Local::now().naive_local())
    }

    /// Spend from an envelope: log the expense and take it off the balance
    ///
    /// Fails with NotFound, writing nothing, when no balance row matches.
    /// Not idempotent: recording the same expense twice takes it off twice.
    pub fn record_expense(&self, input: ExpenseInput) -> BunkerResult<Transaction> {
        require_text("category", &input.category)?;
        require_text("card", &input.card)?;
        require_positive(input.amount)?;

        let (row, balance) = self
            .find_balance(&input.card, &input.category)?
            .ok_or_else(|| BunkerError::balance_not_found(&input.card, &input.category))?;

        let txn = Transaction::new(
            self.now(),
            input.category.trim(),
            input.amount,
            input.card.trim(),
            input.description.trim(),
        );
        self.append(&txn)?;
        self.write_balance(row, &balance, balance.amount - input.amount)?;

        Ok(txn)
    }

    /// Log spending that doesn't come out of an envelope
    pub fn record_free_expense(&self, input: ExpenseInput) -> BunkerResult<Transaction> {
        require_text("category", &input.category)?;
        require_text("card", &input.card)?;
        require_positive(input.amount)?;

        let txn = Transaction::new(
            self.now(),
            input.category.trim(),
            input.amount,
            input.card.trim(),
            input.description.trim(),
        );
        self.append(&txn)?;
        Ok(txn)
    }

    /// Log income; the label carries the income prefix, balances are untouched
    pub fn record_income(&self, input: ExpenseInput) -> BunkerResult<Transaction> {
        require_text("category", &input.category)?;
        require_text("card", &input.card)?;
        require_positive(input.amount)?;

        let txn = Transaction::new(
            self.now(),
            format!("{}{}", self.settings.income_prefix, input.category.trim()),
            input.amount,
            input.card.trim(),
            input.description.trim(),
        );
        self.append(&txn)?;
        Ok(txn)
    }

    /// Log a payment and take it off the matching balance when there is one
    pub fn record_payment(&self, input: PaymentInput) -> BunkerResult<Transaction> {
        let txn = self.append_payment(&input)?;

        match self.find_balance(&input.card, &input.category)? {
            Some((row, balance)) => {
                self.write_balance(row, &balance, balance.amount - input.amount)?;
            }
            None => debug!(
                card = %input.card,
                category = %input.category,
                "payment has no matching balance row"
            ),
        }

        Ok(txn)
    }

    /// Log a transfer to the subscriptions card; balances are never touched
    pub fn record_subscription_transfer(&self, input: PaymentInput) -> BunkerResult<Transaction> {
        self.append_payment(&input)
    }

    /// Overwrite the amount of an existing balance row
    ///
    /// Fails with NotFound, writing nothing, when no row matches. With
    /// `log_adjustments` enabled the difference is also logged.
    pub fn set_balance_direct(&self, update: BalanceUpdate) -> BunkerResult<Balance> {
        require_text("card", &update.card)?;
        require_text("category", &update.category)?;

        let (row, balance) = self
            .find_balance(&update.card, &update.category)?
            .ok_or_else(|| BunkerError::balance_not_found(&update.card, &update.category))?;

        let updated = self.write_balance(row, &balance, update.new_amount)?;

        if self.settings.log_adjustments {
            let txn = Transaction::new(
                self.now(),
                self.settings.adjustment_label.as_str(),
                update.new_amount - balance.amount,
                balance.card.as_str(),
                balance.category.as_str(),
            );
            self.append(&txn)?;
        }

        Ok(updated)
    }

    /// Log the half-month subscription transfer
    ///
    /// The dashboard reads this row back to mark the transfer as done.
    pub fn record_recurring_transfer_done(&self, amount: Money) -> BunkerResult<Transaction> {
        if amount.is_negative() {
            return Err(BunkerError::Validation(
                "Transfer amount cannot be negative".into(),
            ));
        }

        let txn = Transaction::new(
            self.now(),
            self.settings.transfer_marker.as_str(),
            amount,
            self.settings.transfer_card.as_str(),
            self.settings.transfer_note.as_str(),
        );
        self.append(&txn)?;
        Ok(txn)
    }

    fn append_payment(&self, input: &PaymentInput) -> BunkerResult<Transaction> {
        require_text("name", &input.name)?;
        require_text("card", &input.card)?;
        require_positive(input.amount)?;

        let txn = Transaction::new(
            self.now(),
            input.name.trim(),
            input.amount,
            input.card.trim(),
            input.category.trim(),
        );
        self.append(&txn)?;
        Ok(txn)
    }

    /// Last balance row matching (card, category), with its row index
    fn find_balance(&self, card: &str, category: &str) -> BunkerResult<Option<(usize, Balance)>> {
        let rows = self.store.read_table(Table::Balances)?;
        Ok(rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| Balance::from_row(row).map(|b| (i, b)))
            .filter(|(_, b)| b.matches(card, category))
            .last())
    }

    fn append(&self, txn: &Transaction) -> BunkerResult<()> {
        self.store.append_row(Table::Transactions, txn.to_row())?;
        info!(label = %txn.label, amount = %txn.amount, card = %txn.card, "recorded transaction");

        self.audit(AuditEntry::append(
            Table::Transactions,
            format!("{} {} {}", txn.label, txn.amount, txn.card),
            txn,
        ));
        Ok(())
    }

    fn write_balance(&self, row: usize, before: &Balance, amount: Money) -> BunkerResult<Balance> {
        self.store
            .update_cell(Table::Balances, row, AMOUNT, amount.into())?;

        let after = Balance::new(before.card.as_str(), before.category.as_str(), amount);
        info!(
            card = %after.card,
            category = %after.category,
            from = %before.amount,
            to = %after.amount,
            "updated balance"
        );

        self.audit(AuditEntry::update(
            Table::Balances,
            format!(
                "{} / {}: {} -> {}",
                after.card, after.category, before.amount, after.amount
            ),
            before,
            &after,
        ));
        Ok(after)
    }

    /// The store write already happened; a failed audit write is only reported
    fn audit(&self, entry: AuditEntry) {
        if let Some(logger) = self.audit {
            if let Err(e) = logger.log(&entry) {
                warn!(error = %e, "failed to write audit entry");
            }
        }
    }
}

fn require_text(field: &str, value: &str) -> BunkerResult<()> {
    if value.trim().is_empty() {
        return Err(BunkerError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn require_positive(amount: Money) -> BunkerResult<()> {
    if !amount.is_positive() {
        return Err(BunkerError::Validation(format!(
            "Amount must be positive, got {}",
            amount
        )));
    }
    Ok(())
}
