//! JSON Export functionality
//!
//! Exports the dashboard to JSON with schema versioning.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{BunkerError, BunkerResult};
use crate::models::DashboardView;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Dashboard export document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Date the dashboard was computed for
    pub as_of: NaiveDate,

    pub dashboard: DashboardView,
}

impl DashboardExport {
    pub fn new(dashboard: DashboardView, as_of: NaiveDate) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            as_of,
            dashboard,
        }
    }
}

/// Export the dashboard to JSON
pub fn export_dashboard_json<W: Write>(
    dashboard: &DashboardView,
    as_of: NaiveDate,
    writer: &mut W,
    pretty: bool,
) -> BunkerResult<()> {
    let export = DashboardExport::new(dashboard.clone(), as_of);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| BunkerError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| BunkerError::Export(e.to_string()))?;
    Ok(())
}
