//! Monthly expenses
//!
//! A flat mapping from expense name to amount. Stored as a JSON object of
//! plain decimal numbers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::quantity::Money;

/// Named monthly expenses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseList {
    entries: BTreeMap<String, Money>,
}

impl ExpenseList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a named expense, returning the replaced amount
    pub fn insert(&mut self, name: impl Into<String>, amount: Money) -> Option<Money> {
        self.entries.insert(name.into(), amount)
    }

    pub fn get(&self, name: &str) -> Option<Money> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Money> {
        self.entries.remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> {
        self.entries.iter().map(|(name, amount)| (name.as_str(), *amount))
    }

    pub fn sorted_names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Total of all expenses; zero when empty
    pub fn sum(&self) -> Money {
        self.entries.values().copied().sum()
    }
}
