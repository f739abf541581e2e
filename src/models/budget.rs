//! The budget aggregate
//!
//! A named budget owns one income list and one expense list. It is created
//! empty, filled in interactively, saved, and later loaded back read-only for
//! reporting. Each save fully overwrites the previous file.

use serde::{Deserialize, Serialize};

use super::expense::ExpenseList;
use super::income::{IncomeList, PayRules};
use crate::config::paths::BudgetPaths;
use crate::error::BudgetResult;
use crate::quantity::Money;
use crate::storage::{read_json_required, write_json_atomic};

/// A named monthly budget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Identifies the budget file; not part of the stored record
    #[serde(skip)]
    name: String,
    #[serde(default)]
    pub income: IncomeList,
    #[serde(default)]
    pub expenses: ExpenseList,
}

impl Budget {
    /// Create an empty budget bound to `name`
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            income: IncomeList::new(),
            expenses: ExpenseList::new(),
        }
    }

    /// Load the budget named `name` from the budget directory
    ///
    /// # Errors
    ///
    /// [`BudgetError::Storage`](crate::error::BudgetError::Storage) when the file is
    /// missing or unreadable, [`BudgetError::Format`](crate::error::BudgetError::Format)
    /// when it does not decode, including any unrecognized income record.
    pub fn load(paths: &BudgetPaths, name: &str) -> BudgetResult<Self> {
        let path = paths.budget_file(name);
        let mut budget: Budget = read_json_required(&path)?;
        budget.name = name.to_string();

        tracing::info!(
            path = %path.display(),
            income = budget.income.len(),
            expenses = budget.expenses.len(),
            "loaded budget"
        );
        Ok(budget)
    }

    /// Save to the budget directory, overwriting any previous file
    pub fn save(&self, paths: &BudgetPaths) -> BudgetResult<()> {
        let path = paths.budget_file(&self.name);
        write_json_atomic(&path, self)?;

        tracing::info!(path = %path.display(), "saved budget");
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Income remaining after expenses
    pub fn sum(&self, rules: &PayRules) -> Money {
        self.income.sum(rules) - self.expenses.sum()
    }
}
