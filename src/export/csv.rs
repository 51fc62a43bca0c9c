//! CSV Export functionality
//!
//! Flattens the dashboard into one line per envelope, fixed groups first.

use std::io::Write;

use crate::error::{BunkerError, BunkerResult};
use crate::models::{DashboardView, EnvelopeGroup};

const HEADER: [&str; 10] = [
    "Section", "Card", "Priority", "Envelope", "Category", "Kind", "Target", "Actual",
    "Missing", "Progress",
];

/// Export every displayed envelope to CSV
pub fn export_envelopes_csv<W: Write>(dashboard: &DashboardView, writer: W) -> BunkerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    write_section(&mut csv_writer, "Fixed", &dashboard.fixed_groups)?;
    write_section(&mut csv_writer, "Flexible", &dashboard.flexible_groups)?;

    csv_writer
        .flush()
        .map_err(|e| BunkerError::Export(e.to_string()))?;
    Ok(())
}

fn write_section<W: Write>(
    csv_writer: &mut csv::Writer<W>,
    section: &str,
    groups: &[EnvelopeGroup],
) -> BunkerResult<()> {
    for group in groups {
        for envelope in &group.items {
            csv_writer.write_record([
                section.to_string(),
                group.card.clone(),
                envelope.priority().to_string(),
                envelope.config.name.clone(),
                envelope.config.category.clone(),
                envelope.config.kind.to_string(),
                envelope.config.target.to_decimal_string(),
                envelope.actual.to_decimal_string(),
                envelope.shortfall.to_decimal_string(),
                envelope.progress_pct.to_string(),
            ])?;
        }
    }
    Ok(())
}
