//! Recording commands
//!
//! Each command maps onto one api write operation and prints its outcome.

use clap::Args;

use crate::api::{self, Outcome};
use crate::audit::AuditLogger;
use crate::config::Settings;
use crate::models::Money;
use crate::services::{BalanceUpdate, ExpenseInput, PaymentInput};
use crate::store::TabularStore;

use super::parse_money;

/// Arguments shared by expense, free-expense and income
#[derive(Args, Debug)]
pub struct ExpenseArgs {
    /// Category
    pub category: String,
    /// Amount (e.g., "12.50")
    #[arg(value_parser = parse_money)]
    pub amount: Money,
    /// Card the money moves on
    #[arg(short = 'C', long)]
    pub card: String,
    /// Free-text description
    #[arg(short, long, default_value = "")]
    pub description: String,
}

impl From<ExpenseArgs> for ExpenseInput {
    fn from(args: ExpenseArgs) -> Self {
        Self {
            category: args.category,
            amount: args.amount,
            card: args.card,
            description: args.description,
        }
    }
}

/// Arguments shared by payment and subscription-transfer
#[derive(Args, Debug)]
pub struct PaymentArgs {
    /// What was paid
    pub name: String,
    /// Amount (e.g., "12.50")
    #[arg(value_parser = parse_money)]
    pub amount: Money,
    /// Card the payment is made with
    #[arg(short = 'C', long)]
    pub card: String,
    /// Balance category the payment comes out of
    #[arg(short, long)]
    pub category: String,
}

impl From<PaymentArgs> for PaymentInput {
    fn from(args: PaymentArgs) -> Self {
        Self {
            name: args.name,
            amount: args.amount,
            card: args.card,
            category: args.category,
        }
    }
}

#[derive(Args, Debug)]
pub struct BalanceArgs {
    /// Card of the balance row
    pub card: String,
    /// Category of the balance row
    pub category: String,
    /// New amount, may be negative
    #[arg(value_parser = parse_money, allow_hyphen_values = true)]
    pub amount: Money,
}

#[derive(Args, Debug)]
pub struct TransferDoneArgs {
    /// Amount transferred (e.g., "25.00")
    #[arg(value_parser = parse_money)]
    pub amount: Money,
}

/// A write operation picked on the command line
#[derive(Debug)]
pub enum RecordCommand {
    Expense(ExpenseArgs),
    FreeExpense(ExpenseArgs),
    Income(ExpenseArgs),
    Payment(PaymentArgs),
    SubscriptionTransfer(PaymentArgs),
    SetBalance(BalanceArgs),
    TransferDone(TransferDoneArgs),
}

/// Run a write operation and print its outcome
pub fn handle_record_command(
    store: &dyn TabularStore,
    settings: &Settings,
    audit: &AuditLogger,
    cmd: RecordCommand,
) -> Outcome {
    let audit = Some(audit);
    let outcome = match cmd {
        RecordCommand::Expense(args) => api::record_expense(store, settings, audit, args.into()),
        RecordCommand::FreeExpense(args) => {
            api::record_free_expense(store, settings, audit, args.into())
        }
        RecordCommand::Income(args) => api::record_income(store, settings, audit, args.into()),
        RecordCommand::Payment(args) => api::record_payment(store, settings, audit, args.into()),
        RecordCommand::SubscriptionTransfer(args) => {
            api::record_subscription_transfer(store, settings, audit, args.into())
        }
        RecordCommand::SetBalance(args) => api::set_balance_direct(
            store,
            settings,
            audit,
            BalanceUpdate {
                card: args.card,
                category: args.category,
                new_amount: args.amount,
            },
        ),
        RecordCommand::TransferDone(args) => {
            api::record_recurring_transfer_done(store, settings, audit, args.amount)
        }
    };

    println!("{}", outcome);
    outcome
}
