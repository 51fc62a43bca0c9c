//! User settings for Bunker
//!
//! Holds the labels the recorder writes into the transaction log and the
//! day windows the alert engine uses.

use serde::{Deserialize, Serialize};

use super::paths::BunkerPaths;
use crate::error::BunkerError;

/// User settings for Bunker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for the settings file
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Transaction label marking the half-month subscription transfer
    #[serde(default = "default_transfer_marker")]
    pub transfer_marker: String,

    /// Card that receives the subscription transfer
    #[serde(default = "default_transfer_card")]
    pub transfer_card: String,

    /// Note written on the subscription transfer row
    #[serde(default = "default_transfer_note")]
    pub transfer_note: String,

    /// Prefix prepended to income labels
    #[serde(default = "default_income_prefix")]
    pub income_prefix: String,

    /// Label of the row written when a balance is set directly
    #[serde(default = "default_adjustment_label")]
    pub adjustment_label: String,

    /// Whether direct balance edits also append an adjustment row
    #[serde(default)]
    pub log_adjustments: bool,

    /// Days ahead of a due day that raise a "due soon" alert
    #[serde(default = "default_due_soon_days")]
    pub due_soon_days: i64,

    /// Days past a due day (exclusive) that still raise an overdue alert
    #[serde(default = "default_overdue_days")]
    pub overdue_days: i64,

    /// Card payments this close are flagged as danger
    #[serde(default = "default_card_danger_days")]
    pub card_danger_days: i64,

    /// Card payments this close are flagged as warning
    #[serde(default = "default_card_warning_days")]
    pub card_warning_days: i64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_transfer_marker() -> String {
    "SUBSCRIPTION TRANSFER".to_string()
}

fn default_transfer_card() -> String {
    "Subscriptions".to_string()
}

fn default_transfer_note() -> String {
    "Half-month subscription transfer".to_string()
}

fn default_income_prefix() -> String {
    "INCOME: ".to_string()
}

fn default_adjustment_label() -> String {
    "ADJUSTMENT".to_string()
}

fn default_due_soon_days() -> i64 {
    3
}

fn default_overdue_days() -> i64 {
    5
}

fn default_card_danger_days() -> i64 {
    3
}

fn default_card_warning_days() -> i64 {
    7
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            transfer_marker: default_transfer_marker(),
            transfer_card: default_transfer_card(),
            transfer_note: default_transfer_note(),
            income_prefix: default_income_prefix(),
            adjustment_label: default_adjustment_label(),
            log_adjustments: false,
            due_soon_days: default_due_soon_days(),
            overdue_days: default_overdue_days(),
            card_danger_days: default_card_danger_days(),
            card_warning_days: default_card_warning_days(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &BunkerPaths) -> Result<Self, BunkerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BunkerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BunkerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BunkerPaths) -> Result<(), BunkerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BunkerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BunkerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
