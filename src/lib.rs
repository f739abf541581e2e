//! Budget Buddy - simple monthly budgets from the terminal
//!
//! This library provides the core functionality for Budget Buddy. A budget is
//! a named set of income sources and expenses; each income source computes a
//! monthly figure from its own category's fields, and the budget reports what
//! remains after expenses.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `quantity`: Human-friendly numbers, integers, money and percentages
//! - `models`: Income sources, expenses and the budget aggregate
//! - `storage`: JSON file storage layer
//! - `validation`: Answer validators used while capturing a budget
//! - `setup`: Interactive budget survey
//! - `display`: Report tables
//! - `config`: Configuration and path management
//! - `cli`: Command handlers
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_buddy::config::{paths::BudgetPaths, settings::Settings};
//! use budget_buddy::models::Budget;
//!
//! let paths = BudgetPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let budget = Budget::load(&paths, "home")?;
//! println!("{}", budget.sum(&settings.pay_rules()));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod quantity;
pub mod setup;
pub mod storage;
pub mod validation;

pub use error::{BudgetError, BudgetResult};
