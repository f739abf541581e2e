//! Custom error types for Budget Buddy
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::income::IncomeDecodeError;
use crate::validation::ValidationError;

/// The main error type for Budget Buddy operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// A budget file could not be opened, created or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// A budget file was read but its contents could not be decoded
    #[error("Format error: {0}")]
    Format(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Decode(#[from] IncomeDecodeError),

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// The user ended input before finishing
    #[error("Aborted: {0}")]
    Aborted(String),
}

impl BudgetError {
    /// Create a "duplicate" error for income sources
    pub fn duplicate_income(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Income",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for expenses
    pub fn duplicate_expense(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Check if this is a format error
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }

    /// Check if the user aborted input
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for Budget Buddy operations
pub type BudgetResult<T> = Result<T, BudgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BudgetError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_duplicate_error() {
        let err = BudgetError::duplicate_income("Diner");
        assert_eq!(err.to_string(), "Income already exists: Diner");
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: BudgetError = ValidationError::Required.into();
        assert_eq!(err.to_string(), "Value is required.");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let budget_err: BudgetError = io_err.into();
        assert!(matches!(budget_err, BudgetError::Io(_)));
    }
}
