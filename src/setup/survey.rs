//! Interactive budget survey
//!
//! Asks for every source of income, then every expense, re-prompting until
//! each answer validates. Reads answers line by line from any `BufRead` and
//! writes prompts to any `Write`, so the survey runs the same against a
//! terminal or an in-memory script.

use std::io::{BufRead, Write};

use serde_json::Value;

use crate::error::{BudgetError, BudgetResult};
use crate::models::income::{FieldBag, FieldSpec, IncomeDecodeError, IncomeKind};
use crate::models::{Budget, ExpenseList, Income, IncomeList};
use crate::quantity::{Integer, Money, Number, Percentage, Quantity, QuantityKind, Source};
use crate::validation::{self, BoundedValidator, ValidationError};

/// Prompts the user for a complete budget
pub struct BudgetSurvey<R, W> {
    input: R,
    output: W,
    minimum_wage: f64,
}

impl<R: BufRead, W: Write> BudgetSurvey<R, W> {
    /// Create a survey; `minimum_wage` is the lowest hourly rate accepted for wages
    pub fn new(input: R, output: W, minimum_wage: f64) -> Self {
        Self {
            input,
            output,
            minimum_wage,
        }
    }

    /// Fill in the budget's income and expenses
    ///
    /// # Errors
    ///
    /// [`BudgetError::Aborted`] when input ends before the survey is finished.
    pub fn run(&mut self, budget: &mut Budget) -> BudgetResult<()> {
        self.ask_income_list(&mut budget.income)?;
        self.ask_expense_list(&mut budget.expenses)?;

        tracing::debug!(
            income = budget.income.len(),
            expenses = budget.expenses.len(),
            "survey complete"
        );
        Ok(())
    }

    fn ask_income_list(&mut self, list: &mut IncomeList) -> BudgetResult<()> {
        writeln!(self.output, "Income")?;
        loop {
            let title = Integer::from(list.len() + 1).ordinal();
            writeln!(self.output, "{} Source Of Income", title)?;

            let (name, income) = self.ask_income(list)?;
            list.insert(name, income);

            let done = self.ask_confirm("Are you finished entering all of your sources of income?")?;
            writeln!(self.output)?;
            if done {
                return Ok(());
            }
        }
    }

    fn ask_income(&mut self, list: &IncomeList) -> BudgetResult<(String, Income)> {
        let name = self.ask_validated("Name of Income", |answer| {
            validation::required(answer)?;
            if list.contains(answer) {
                return Err(BudgetError::duplicate_income(answer));
            }
            Ok(answer.to_string())
        })?;

        let kind = self.ask_kind()?;

        let mut fields = FieldBag::new();
        for spec in kind.fields() {
            let value = if spec.repeated {
                self.ask_repeated(spec)?
            } else {
                self.ask_field(spec, spec.prompt)?
            };
            fields.insert(spec.name.to_string(), value);
        }

        let income = kind
            .match_fields(&fields)
            .ok_or_else(|| IncomeDecodeError::Unrecognized { name: name.clone() })?;
        Ok((name, income))
    }

    fn ask_kind(&mut self) -> BudgetResult<IncomeKind> {
        writeln!(self.output, "Type Of Income:")?;
        for (index, kind) in IncomeKind::ALL.iter().enumerate() {
            writeln!(self.output, "  {}. {}", index + 1, kind)?;
        }

        let choice = BoundedValidator::<Integer>::new(
            Some(Source::Int(1)),
            Some(Source::from(IncomeKind::ALL.len() as i64)),
        );
        self.ask_validated("Select type", |answer| {
            // Accept the kind's name as well as its number
            if let Some(kind) = IncomeKind::ALL
                .iter()
                .find(|kind| kind.name().eq_ignore_ascii_case(answer))
            {
                return Ok(*kind);
            }
            let index = choice.validate(answer)?.value() as usize;
            Ok(IncomeKind::ALL[index - 1])
        })
    }

    fn ask_repeated(&mut self, spec: &FieldSpec) -> BudgetResult<Value> {
        writeln!(self.output, "Please enter each item that made commissions:")?;
        let mut values = Vec::new();
        loop {
            let prompt = format!("    {} #{}", spec.prompt, values.len() + 1);
            values.push(self.ask_field(spec, &prompt)?);
            if self.ask_confirm("    Are you finished entering all items?")? {
                return Ok(Value::Array(values));
            }
        }
    }

    /// Ask for one field, returning its stored form
    fn ask_field(&mut self, spec: &FieldSpec, prompt: &str) -> BudgetResult<Value> {
        let lower = Source::Float(spec.lower_bound.resolve(self.minimum_wage));
        let prompt = format!("{} {}", prompt, hint(spec.kind));
        match spec.kind {
            QuantityKind::Number => self.ask_quantity::<Number>(&prompt, lower),
            QuantityKind::Integer => self.ask_quantity::<Integer>(&prompt, lower),
            QuantityKind::Money => self.ask_quantity::<Money>(&prompt, lower),
            QuantityKind::Percentage => self.ask_quantity::<Percentage>(&prompt, lower),
        }
    }

    fn ask_quantity<Q: Quantity>(&mut self, prompt: &str, lower: Source<'_>) -> BudgetResult<Value> {
        let validator = BoundedValidator::<Q>::try_new(Some(lower), None)
            .map_err(|e| BudgetError::Config(format!("Invalid {} bound: {}", Q::KIND, e)))?;
        let quantity = self.ask_validated(prompt, |answer| {
            validation::required(answer)?;
            Ok(validator.validate(answer)?)
        })?;
        Ok(quantity.to_stored())
    }

    fn ask_expense_list(&mut self, list: &mut ExpenseList) -> BudgetResult<()> {
        writeln!(self.output, "Expenses")?;
        loop {
            let title = Integer::from(list.len() + 1).ordinal();
            writeln!(self.output, "{} Expense", title)?;

            let name = self.ask_validated("Name of Expense", |answer| {
                validation::required(answer)?;
                if list.contains(answer) {
                    return Err(BudgetError::duplicate_expense(answer));
                }
                Ok(answer.to_string())
            })?;

            let cost = BoundedValidator::<Money>::at_least(Source::Float(0.01));
            let amount = self.ask_validated("Cost of Expense ($)", |answer| {
                validation::required(answer)?;
                Ok(cost.validate(answer)?)
            })?;
            list.insert(name, amount);

            let done = self.ask_confirm("Are you finished entering all of your expenses?")?;
            writeln!(self.output)?;
            if done {
                return Ok(());
            }
        }
    }

    /// Yes/no question defaulting to no
    fn ask_confirm(&mut self, message: &str) -> BudgetResult<bool> {
        self.ask_validated(&format!("{} (y/N)", message), |answer| {
            match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" => Ok(true),
                "" | "n" | "no" => Ok(false),
                _ => Err(BudgetError::Validation(ValidationError::OutOfRange(
                    "Please answer yes or no.".into(),
                ))),
            }
        })
    }

    /// Prompt until `check` accepts the answer
    ///
    /// Rejections are shown to the user and asked again; only input failures
    /// propagate.
    fn ask_validated<T, F>(&mut self, prompt: &str, check: F) -> BudgetResult<T>
    where
        F: Fn(&str) -> BudgetResult<T>,
    {
        loop {
            let answer = self.read_answer(prompt)?;
            match check(&answer) {
                Ok(value) => return Ok(value),
                Err(err) => writeln!(self.output, "! {}", err)?,
            }
        }
    }

    fn read_answer(&mut self, prompt: &str) -> BudgetResult<String> {
        write!(self.output, "? {}: ", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(BudgetError::Aborted("input ended before the survey finished".into()));
        }
        Ok(line.trim().to_string())
    }
}

/// Unit hint shown after a field prompt
fn hint(kind: QuantityKind) -> &'static str {
    match kind {
        QuantityKind::Number => "(#)",
        QuantityKind::Integer => "(@)",
        QuantityKind::Money => "($)",
        QuantityKind::Percentage => "(%)",
    }
}
