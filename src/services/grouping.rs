//! Grouping and ordering of envelopes
//!
//! The whole envelope list is sorted by priority first (stable, so ties keep
//! table order), then split into fixed obligations and flexible spending.
//! Each half is grouped by card in first-seen order and the groups are
//! ordered by the lowest priority they contain.

use std::collections::HashMap;

use crate::models::{Envelope, EnvelopeGroup};

/// Envelopes split and grouped for display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouped {
    pub fixed: Vec<EnvelopeGroup>,
    pub flexible: Vec<EnvelopeGroup>,
}

/// Sort, partition and group a list of envelopes
pub fn group_envelopes(mut envelopes: Vec<Envelope>) -> Grouped {
    envelopes.sort_by_key(Envelope::priority);

    let (fixed, flexible): (Vec<_>, Vec<_>) = envelopes.into_iter().partition(Envelope::is_fixed);

    Grouped {
        fixed: group_by_card(fixed),
        flexible: group_by_card(flexible),
    }
}

/// Group envelopes by card, then order groups by their lowest priority
pub fn group_by_card(envelopes: Vec<Envelope>) -> Vec<EnvelopeGroup> {
    let mut groups: Vec<EnvelopeGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for envelope in envelopes {
        let position = *positions
            .entry(envelope.card().to_string())
            .or_insert_with(|| {
                groups.push(EnvelopeGroup {
                    card: envelope.card().to_string(),
                    min_priority: envelope.priority(),
                    items: Vec::new(),
                });
                groups.len() - 1
            });

        let group = &mut groups[position];
        group.min_priority = group.min_priority.min(envelope.priority());
        group.items.push(envelope);
    }

    groups.sort_by_key(|g| g.min_priority);
    groups
}
