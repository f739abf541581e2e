//! Core data models for Budget Buddy
//!
//! Income sources, expenses, and the budget aggregate that ties them together.

pub mod budget;
pub mod expense;
pub mod income;

pub use budget::Budget;
pub use expense::ExpenseList;
pub use income::{
    Commissions, FieldBag, FieldSpec, Income, IncomeDecodeError, IncomeKind, IncomeList,
    LowerBound, PayRules, Sales, Salary, Supplemental, Wages,
};
