//! Configuration module for Budget Buddy
//!
//! This module provides configuration management including:
//! - XDG-compliant config path resolution and budget file locations
//! - User settings persistence (pay rules and minimum wage)

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::Settings;
