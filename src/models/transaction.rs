//! Transaction log entries and the half-month period they fall in

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Money;
use crate::store::schema::transactions as col;
use crate::store::{Cell, Row};

/// One of the two bookkeeping periods of a month, split after day 15
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HalfMonth {
    /// Days 1 to 15
    First,
    /// Day 16 to the end of the month
    Second,
}

impl HalfMonth {
    pub fn of(date: NaiveDate) -> Self {
        if date.day() <= 15 {
            Self::First
        } else {
            Self::Second
        }
    }
}

impl fmt::Display for HalfMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "1st half"),
            Self::Second => write!(f, "2nd half"),
        }
    }
}

/// A row of the append-only transaction log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub timestamp: NaiveDateTime,
    pub label: String,
    pub amount: Money,
    pub card: String,
    pub note: String,
}

impl Transaction {
    pub fn new(
        timestamp: NaiveDateTime,
        label: impl Into<String>,
        amount: Money,
        card: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            label: label.into(),
            amount,
            card: card.into(),
            note: note.into(),
        }
    }

    /// Decode a log row. Rows whose timestamp can't be read are skipped.
    pub fn from_row(row: &Row) -> Option<Self> {
        let timestamp = Cell::at(row, col::TIMESTAMP).as_datetime()?;
        Some(Self {
            timestamp,
            label: Cell::at(row, col::LABEL).as_text(),
            amount: Cell::at(row, col::AMOUNT).as_money(),
            card: Cell::at(row, col::CARD).as_text(),
            note: Cell::at(row, col::NOTE).as_text(),
        })
    }

    pub fn to_row(&self) -> Row {
        vec![
            self.timestamp.into(),
            self.label.as_str().into(),
            self.amount.into(),
            self.card.as_str().into(),
            self.note.as_str().into(),
        ]
    }

    /// Whether the transaction falls in the same month and half-month as `date`
    pub fn in_period_of(&self, date: NaiveDate) -> bool {
        let day = self.timestamp.date();
        day.year() == date.year()
            && day.month() == date.month()
            && HalfMonth::of(day) == HalfMonth::of(date)
    }
}
