//! The dashboard view handed to callers

use serde::{Deserialize, Serialize};

use super::{Alert, CardDue, EnvelopeGroup, HalfMonth, Money};

/// Totals shown above the envelope lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Shortfall still missing across fixed obligations
    pub to_set_aside: Money,
    pub half_month: HalfMonth,
    /// Target total of subscription rows, paid by one transfer per half-month
    pub subscriptions_total: Money,
    /// Whether that transfer is already in the log for the current half-month
    pub subscription_transfer_done: bool,
}

/// Values callers offer in their input forms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionLists {
    /// Distinct envelope names, sorted
    pub envelope_names: Vec<String>,
    /// Distinct configured categories, sorted
    pub categories: Vec<String>,
    /// Distinct configured cards, sorted
    pub cards: Vec<String>,
    /// (card, category) pairs that have a balance row, in table order
    pub pairs: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    pub fixed_groups: Vec<EnvelopeGroup>,
    pub flexible_groups: Vec<EnvelopeGroup>,
    pub alerts: Vec<Alert>,
    pub card_dues: Vec<CardDue>,
    pub summary: Summary,
    pub options: OptionLists,
}
