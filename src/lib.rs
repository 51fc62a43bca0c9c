//! Bunker - envelope budgeting over plain tables
//!
//! This library keeps a half-monthly envelope budget in four tables
//! (configuration, current balances, a transaction log and credit cards)
//! and provides the dashboard and recording operations on top of them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (envelopes, balances, transactions, alerts)
//! - `store`: Tabular store trait with CSV and in-memory backends
//! - `services`: Dashboard assembly and transaction recording
//! - `api`: Caller boundary returning tagged outcomes
//! - `audit`: Audit logging system
//! - `display`, `export`, `cli`: Terminal output, exports and commands
//!
//! # Example
//!
//! ```rust,ignore
//! use bunker::config::{BunkerPaths, Settings};
//! use bunker::store::CsvStore;
//!
//! let paths = BunkerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = CsvStore::new(paths)?;
//! let view = bunker::api::get_dashboard_data(&store, &settings, today)?;
//! ```

pub mod api;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod store;

pub use error::BunkerError;
