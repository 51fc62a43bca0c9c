//! YAML Export functionality

use chrono::NaiveDate;
use std::io::Write;

use crate::error::{BunkerError, BunkerResult};
use crate::export::json::DashboardExport;
use crate::models::DashboardView;

/// Export the dashboard to YAML
pub fn export_dashboard_yaml<W: Write>(
    dashboard: &DashboardView,
    as_of: NaiveDate,
    writer: &mut W,
) -> BunkerResult<()> {
    let export = DashboardExport::new(dashboard.clone(), as_of);

    let header = format!(
        "# Bunker dashboard\n# Generated: {}\n# As of: {}\n\n",
        export.exported_at, export.as_of
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| BunkerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BunkerError::Export(e.to_string()))?;

    Ok(())
}
