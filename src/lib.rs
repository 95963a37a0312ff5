//! zbb - zero-based monthly budgeting in the terminal
//!
//! Every đồng of monthly income gets a job: income is allocated across
//! savings (20%), needs (50%) and wants (30%) categories, and transactions are
//! logged against those budgets month by month.
//!
//! # Architecture
//!
//! - `config`: path resolution and user settings
//! - `error`: the crate error type
//! - `models`: money, months, categories, budgets and transactions
//! - `storage`: key-value persistence behind the `Repository` port
//! - `services`: aggregation, filtering and the budget session
//! - `export`: SpreadsheetML workbook export
//! - `audit`: append-only log of every mutation
//! - `display`, `cli`: terminal rendering and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use zbb_cli::clock::SystemClock;
//! use zbb_cli::config::{ZbbPaths, Settings};
//! use zbb_cli::services::BudgetSession;
//! use zbb_cli::storage::JsonFileRepository;
//!
//! let paths = ZbbPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let repo = JsonFileRepository::open(&paths)?;
//! let session = BudgetSession::open(repo, settings.catalog(), SystemClock);
//! println!("{}", session.summary().allocation_balance);
//! ```

pub mod audit;
pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ZbbError, ZbbResult};
