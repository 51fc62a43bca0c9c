//! Envelope aggregator
//!
//! Joins configuration rows with the balance index into envelopes carrying
//! shortfall and progress, and accumulates the dashboard totals.

use crate::models::{Envelope, EnvelopeConfig, EnvelopeKind, Money, StatusColor};

use super::balance_index::BalanceIndex;

/// Envelopes plus the totals computed alongside them
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Every non-subscription envelope, in configuration order
    pub envelopes: Vec<Envelope>,
    /// Sum of shortfalls across fixed envelopes
    pub to_set_aside: Money,
    /// Sum of subscription targets
    pub subscriptions_total: Money,
}

/// Progress percentage (0-100) and status of an envelope
pub fn progress(actual: Money, target: Money) -> (u8, StatusColor) {
    if actual.is_positive() && target.is_zero() {
        return (100, StatusColor::Success);
    }
    if !target.is_positive() {
        return (0, StatusColor::Danger);
    }

    let status = if actual >= target {
        StatusColor::Success
    } else if actual.is_positive() {
        StatusColor::Warning
    } else {
        StatusColor::Danger
    };

    let pct = actual.cents() as f64 / target.cents() as f64 * 100.0;
    (pct.clamp(0.0, 100.0).round() as u8, status)
}

/// Build the envelope for one configuration line
pub fn envelope_for(config: EnvelopeConfig, index: &BalanceIndex) -> Envelope {
    let actual = index.get(&config.card, &config.category);
    let shortfall = config.target.saturating_gap(actual);
    let (progress_pct, status) = progress(actual, config.target);

    Envelope {
        config,
        actual,
        shortfall,
        progress_pct,
        status,
    }
}

/// Aggregate all configuration lines against the balance index
///
/// Subscription lines are not displayed as envelopes; only their targets
/// are summed.
pub fn aggregate(configs: Vec<EnvelopeConfig>, index: &BalanceIndex) -> Aggregation {
    let mut aggregation = Aggregation::default();

    for config in configs {
        if config.kind == EnvelopeKind::Subscription {
            aggregation.subscriptions_total += config.target;
            continue;
        }

        let envelope = envelope_for(config, index);
        if envelope.is_fixed() {
            aggregation.to_set_aside += envelope.shortfall;
        }
        aggregation.envelopes.push(envelope);
    }

    aggregation
}
