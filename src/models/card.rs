//! Payment cards with a monthly due day

use serde::{Deserialize, Serialize};

use crate::store::schema::credit_cards as col;
use crate::store::{Cell, Row};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCard {
    pub name: String,
    pub due_day: Option<u32>,
}

impl CreditCard {
    pub fn from_row(row: &Row) -> Option<Self> {
        let name = Cell::at(row, col::NAME).as_text();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name,
            due_day: Cell::at(row, col::DUE_DAY).as_day(),
        })
    }
}
