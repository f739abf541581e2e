//! Path management for Budget Buddy
//!
//! ## Path Resolution Order
//!
//! Config directory (holds `config.json`):
//! 1. `BUDGET_BUDDY_HOME` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/budget-buddy` or `~/.config/budget-buddy`
//! 3. Windows: `%APPDATA%\budget-buddy`
//!
//! Budget directory (holds `<name>.budget` files):
//! 1. `BUDGET_BUDDY_DIR` environment variable (if set)
//! 2. The current directory

use std::path::PathBuf;

use crate::error::BudgetError;

/// File suffix of a saved budget
pub const BUDGET_EXTENSION: &str = "budget";

/// Manages all paths used by Budget Buddy
#[derive(Debug, Clone)]
pub struct BudgetPaths {
    config_dir: PathBuf,
    budget_dir: PathBuf,
}

impl BudgetPaths {
    /// Create a new BudgetPaths instance from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, BudgetError> {
        let config_dir = match std::env::var("BUDGET_BUDDY_HOME") {
            Ok(custom) => PathBuf::from(custom),
            Err(_) => resolve_default_config_dir()?,
        };
        let budget_dir = std::env::var("BUDGET_BUDDY_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Ok(Self {
            config_dir,
            budget_dir,
        })
    }

    /// Create BudgetPaths with explicit directories (useful for testing)
    pub fn with_dirs(config_dir: PathBuf, budget_dir: PathBuf) -> Self {
        Self {
            config_dir,
            budget_dir,
        }
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    pub fn budget_dir(&self) -> &PathBuf {
        &self.budget_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }

    /// Get the path of the budget named `name` (`<budget dir>/<name>.budget`)
    pub fn budget_file(&self, name: &str) -> PathBuf {
        self.budget_dir.join(format!("{}.{}", name, BUDGET_EXTENSION))
    }

    /// Ensure the config directory exists
    pub fn ensure_directories(&self) -> Result<(), BudgetError> {
        std::fs::create_dir_all(&self.config_dir)
            .map_err(|e| BudgetError::Io(format!("Failed to create config directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default config directory path based on platform
#[cfg(not(windows))]
fn resolve_default_config_dir() -> Result<PathBuf, BudgetError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| BudgetError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("budget-buddy"))
}

/// Resolve the default config directory path based on platform
#[cfg(windows)]
fn resolve_default_config_dir() -> Result<PathBuf, BudgetError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| BudgetError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("budget-buddy"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_dirs(
            temp_dir.path().join("config"),
            temp_dir.path().join("budgets"),
        );

        assert_eq!(paths.config_dir(), &temp_dir.path().join("config"));
        assert_eq!(
            paths.settings_file(),
            temp_dir.path().join("config").join("config.json")
        );
    }

    #[test]
    fn test_budget_file_suffix() {
        let paths = BudgetPaths::with_dirs(PathBuf::from("cfg"), PathBuf::from("."));
        assert_eq!(paths.budget_file("home"), PathBuf::from(".").join("home.budget"));
        assert_eq!(
            paths.budget_file("2024 plan"),
            PathBuf::from(".").join("2024 plan.budget")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_dirs(
            temp_dir.path().join("nested").join("config"),
            temp_dir.path().to_path_buf(),
        );

        paths.ensure_directories().unwrap();
        assert!(paths.config_dir().exists());
    }
}
