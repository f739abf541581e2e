//! User settings for Budget Buddy
//!
//! Holds the pay rules used when computing income and the minimum wage used
//! when validating captured wages.

use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::models::income::PayRules;

/// User settings for Budget Buddy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Weekly hours after which wages earn overtime
    #[serde(default = "default_overtime_threshold")]
    pub overtime_threshold: f64,

    /// Fraction of gross pay treated as take-home
    #[serde(default = "default_net_pay_fraction")]
    pub net_pay_fraction: f64,

    /// Lowest hourly rate accepted for wages
    #[serde(default = "default_minimum_wage")]
    pub minimum_wage: f64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_overtime_threshold() -> f64 {
    PayRules::default().overtime_threshold
}

fn default_net_pay_fraction() -> f64 {
    PayRules::default().net_pay_fraction
}

fn default_minimum_wage() -> f64 {
    7.25
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            overtime_threshold: default_overtime_threshold(),
            net_pay_fraction: default_net_pay_fraction(),
            minimum_wage: default_minimum_wage(),
        }
    }
}

impl Settings {
    /// The pay rules income computations run under
    pub fn pay_rules(&self) -> PayRules {
        PayRules {
            overtime_threshold: self.overtime_threshold,
            net_pay_fraction: self.net_pay_fraction,
        }
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BudgetError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            tracing::debug!(path = %settings_path.display(), "loaded settings");
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_paths(temp_dir: &TempDir) -> BudgetPaths {
        BudgetPaths::with_dirs(temp_dir.path().join("config"), temp_dir.path().to_path_buf())
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.overtime_threshold, 40.0);
        assert_eq!(settings.net_pay_fraction, 0.75);
        assert_eq!(settings.minimum_wage, 7.25);
        assert_eq!(settings.pay_rules(), PayRules::default());
    }

    #[test]
    fn test_load_missing_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_or_create(&temp_paths(&temp_dir)).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = temp_paths(&temp_dir);

        let settings = Settings {
            overtime_threshold: 44.0,
            minimum_wage: 15.0,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.overtime_threshold, 44.0);
        assert_eq!(loaded.minimum_wage, 15.0);
        assert_eq!(loaded.net_pay_fraction, 0.75);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = temp_paths(&temp_dir);
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"net_pay_fraction": 0.8}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.net_pay_fraction, 0.8);
        assert_eq!(loaded.overtime_threshold, 40.0);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = temp_paths(&temp_dir);
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), "not json").unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(BudgetError::Config(_))
        ));
    }
}
