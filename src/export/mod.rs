//! Export module for Bunker
//!
//! Writes the dashboard in machine-readable formats:
//! - JSON: the full dashboard with export metadata
//! - YAML: the same document, human-readable
//! - CSV: one line per envelope (spreadsheet-compatible)

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_envelopes_csv;
pub use json::{export_dashboard_json, DashboardExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_dashboard_yaml;
