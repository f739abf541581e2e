//! Display formatting for terminal output
//!
//! Renders budgets as tables for the `report` command.

pub mod report;

pub use report::{format_expense_table, format_income_table, format_summary_table, render_budget};
