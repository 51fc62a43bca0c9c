//! Typed table cells and their coercions
//!
//! Cells come from hand-edited tables, so every coercion has a defined
//! fallback instead of an error: unreadable amounts are zero, unreadable
//! days and timestamps are `None`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::schema::transactions::TIMESTAMP_FORMAT;
use crate::models::Money;

/// A single table row
pub type Row = Vec<Cell>;

static EMPTY: Cell = Cell::Empty;

/// A typed table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Create a text cell
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Read a cell from its raw textual form (as found in a CSV field)
    ///
    /// Blank text is `Empty`. A number is `Number` only when it is written
    /// exactly as [`Cell::to_raw`] would write it back, so "0045", "12.50"
    /// or "1e3" stay `Text` and keep their spelling as keys.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() && format_number(n) == trimmed => Self::Number(n),
            _ => Self::Text(raw.to_string()),
        }
    }

    /// Raw textual form, the inverse of [`Cell::from_raw`]
    pub fn to_raw(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Number(n) => format_number(*n),
            Self::Text(s) => s.clone(),
        }
    }

    /// Trimmed text value; numbers are rendered without a trailing `.0`
    pub fn as_text(&self) -> String {
        self.to_raw().trim().to_string()
    }

    /// Amount held by the cell, zero when blank or not numeric
    pub fn as_money(&self) -> Money {
        match self {
            Self::Empty => Money::zero(),
            Self::Number(n) => Money::from_f64(*n),
            Self::Text(s) => Money::parse(s).unwrap_or_else(|_| {
                s.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(Money::from_f64)
                    .unwrap_or_default()
            }),
        }
    }

    /// Integer value, truncated toward zero
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Empty => None,
            Self::Number(n) => Some(n.trunc() as i64),
            Self::Text(s) => leading_integer(s),
        }
    }

    /// Day of month (1-31) held by the cell
    pub fn as_day(&self) -> Option<u32> {
        self.as_i64()
            .filter(|d| (1..=31).contains(d))
            .map(|d| d as u32)
    }

    /// Timestamp held by the cell; bare dates are read as midnight
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        let text = match self {
            Self::Text(s) => s.trim(),
            _ => return None,
        };

        for format in [TIMESTAMP_FORMAT, "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
                return Some(dt);
            }
        }

        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    /// Borrow column `index` of a row, treating missing columns as empty
    pub fn at(row: &Row, index: usize) -> &Cell {
        row.get(index).unwrap_or(&EMPTY)
    }
}

impl From<Money> for Cell {
    fn from(amount: Money) -> Self {
        Self::Number(amount.as_f64())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(value: NaiveDateTime) -> Self {
        Self::Text(value.format(TIMESTAMP_FORMAT).to_string())
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Integer prefix of a string ("12", "12th", "-3"), like a lenient spreadsheet parse
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| n * sign)
}
