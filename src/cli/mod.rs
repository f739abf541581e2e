//! CLI command handlers
//!
//! Bridges clap argument parsing with budget creation and reporting.

pub mod create;
pub mod report;

pub use create::{handle_create_command, CreateArgs};
pub use report::{handle_report_command, ReportArgs};
