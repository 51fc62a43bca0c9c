//! Alerts raised from due days

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::StatusColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Warning,
    Danger,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
        }
    }
}

/// A payment reminder for a configured envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub message: String,
    pub severity: AlertSeverity,
}

impl Alert {
    pub fn due_soon(name: &str, days: i64) -> Self {
        Self {
            message: format!("Pay {} in {} days", name, days),
            severity: AlertSeverity::Warning,
        }
    }

    pub fn overdue(name: &str) -> Self {
        Self {
            message: format!("{} OVERDUE", name),
            severity: AlertSeverity::Danger,
        }
    }
}

/// Next payment date of a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDue {
    pub card: String,
    pub due_date: NaiveDate,
    pub days_left: i64,
    pub tier: StatusColor,
}
