//! `budget create`
//!
//! Interactively builds a new budget and saves it to the budget directory.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Args;

use crate::config::{paths::BudgetPaths, settings::Settings};
use crate::error::BudgetResult;
use crate::models::Budget;
use crate::setup::BudgetSurvey;

/// Arguments for creating a budget
#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Name of the budget (saved as <name>.budget)
    pub name: String,

    /// The legal minimum rate of pay for wages
    #[arg(long)]
    pub minimum_wage: Option<f64>,

    /// Weekly hours after which wages earn overtime
    #[arg(long)]
    pub overtime_threshold: Option<f64>,
}

impl CreateArgs {
    /// Settings with this invocation's flags applied
    pub fn apply(&self, settings: &Settings) -> Settings {
        let mut settings = settings.clone();
        if let Some(minimum_wage) = self.minimum_wage {
            settings.minimum_wage = minimum_wage;
        }
        if let Some(threshold) = self.overtime_threshold {
            settings.overtime_threshold = threshold;
        }
        settings
    }
}

/// Run the create command against stdin and stdout
pub fn handle_create_command(
    paths: &BudgetPaths,
    settings: &Settings,
    args: CreateArgs,
) -> BudgetResult<ExitCode> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    create_budget(paths, settings, args, stdin.lock(), stdout.lock())
}

/// Survey the user for a budget and save it
///
/// Running out of input aborts creation without saving and is not a failure.
pub fn create_budget<R: BufRead, W: Write>(
    paths: &BudgetPaths,
    settings: &Settings,
    args: CreateArgs,
    input: R,
    mut output: W,
) -> BudgetResult<ExitCode> {
    let settings = args.apply(settings);
    let mut budget = Budget::create(args.name);

    let result = BudgetSurvey::new(input, &mut output, settings.minimum_wage).run(&mut budget);
    match result {
        Ok(()) => {}
        Err(err) if err.is_aborted() => {
            tracing::info!(budget = budget.name(), "budget creation aborted");
            writeln!(output)?;
            writeln!(output, "Aborted budget creation")?;
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => return Err(err),
    }

    budget.save(paths)?;

    writeln!(
        output,
        "Saved budget \"{}\" to {}",
        budget.name(),
        paths.budget_file(budget.name()).display()
    )?;
    writeln!(
        output,
        "Remaining each month: {}",
        budget.sum(&settings.pay_rules())
    )?;
    Ok(ExitCode::SUCCESS)
}
