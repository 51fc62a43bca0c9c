//! Core data models for Bunker
//!
//! Rows of the budget tables decoded into typed values, plus the derived
//! envelope and dashboard views.

pub mod alert;
pub mod balance;
pub mod card;
pub mod dashboard;
pub mod envelope;
pub mod money;
pub mod transaction;

pub use alert::{Alert, AlertSeverity, CardDue};
pub use balance::Balance;
pub use card::CreditCard;
pub use dashboard::{DashboardView, OptionLists, Summary};
pub use envelope::{Envelope, EnvelopeConfig, EnvelopeGroup, EnvelopeKind, StatusColor};
pub use money::Money;
pub use transaction::{HalfMonth, Transaction};
