//! Interactive budget creation
//!
//! Walks the user through entering income sources and expenses.

pub mod survey;

pub use survey::BudgetSurvey;
