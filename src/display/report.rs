//! Budget report tables
//!
//! Renders a loaded budget as three tables: each income source's monthly
//! income, each expense, and a summary of what remains.

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Panel, Style};

use crate::models::{Budget, ExpenseList, IncomeList, PayRules};
use crate::quantity::Money;

/// Render the full report for a budget
pub fn render_budget(budget: &Budget, rules: &PayRules) -> String {
    [
        format_income_table(&budget.income, rules),
        format_expense_table(&budget.expenses),
        format_summary_table(budget, rules),
    ]
    .join("\n\n")
}

/// Monthly income of each source, in name order, with a total footer
pub fn format_income_table(list: &IncomeList, rules: &PayRules) -> String {
    amounts_table(
        "Income",
        list.monthly_incomes(rules)
            .map(|(name, amount)| (name.to_string(), amount)),
        list.sum(rules),
    )
}

/// Each expense, in name order, with a total footer
pub fn format_expense_table(list: &ExpenseList) -> String {
    amounts_table(
        "Expenses",
        list.iter().map(|(name, amount)| (name.to_string(), amount)),
        list.sum(),
    )
}

/// Total income, total expenses and the remainder
pub fn format_summary_table(budget: &Budget, rules: &PayRules) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Income", "Expenses", "Remaining"]);
    builder.push_record([
        budget.income.sum(rules).to_string(),
        budget.expenses.sum().to_string(),
        budget.sum(rules).to_string(),
    ]);

    let mut table = builder.build();
    table.with(Style::modern());
    table.with(Alignment::right());
    table.with(Panel::header("Summary"));
    table.to_string()
}

fn amounts_table(
    title: &str,
    rows: impl Iterator<Item = (String, Money)>,
    total: Money,
) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Name".to_string(), "Amount".to_string()]);
    for (name, amount) in rows {
        builder.push_record([name, amount.to_string()]);
    }
    builder.push_record(["Total".to_string(), total.to_string()]);

    let mut table = builder.build();
    table.with(Style::modern());
    table.modify(Columns::single(1), Alignment::right());
    table.with(Panel::header(title));
    table.to_string()
}
