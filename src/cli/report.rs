//! `budget report`
//!
//! Loads a saved budget and prints its income, expense and summary tables.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Args;

use crate::config::paths::{BudgetPaths, BUDGET_EXTENSION};
use crate::config::settings::Settings;
use crate::display::render_budget;
use crate::error::BudgetResult;
use crate::models::Budget;

/// Arguments for reporting on a budget
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Name of the budget to report on
    pub name: String,

    /// Fraction of gross pay used as take-home pay for wages and salary
    #[arg(long)]
    pub net_pay_fraction: Option<f64>,

    /// Weekly hours after which wages earn overtime
    #[arg(long)]
    pub overtime_threshold: Option<f64>,
}

impl ReportArgs {
    /// Settings with this invocation's flags applied
    pub fn apply(&self, settings: &Settings) -> Settings {
        let mut settings = settings.clone();
        if let Some(fraction) = self.net_pay_fraction {
            settings.net_pay_fraction = fraction;
        }
        if let Some(threshold) = self.overtime_threshold {
            settings.overtime_threshold = threshold;
        }
        settings
    }
}

/// Run the report command, printing to stdout and stderr
pub fn handle_report_command(
    paths: &BudgetPaths,
    settings: &Settings,
    args: ReportArgs,
) -> BudgetResult<ExitCode> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    report_budget(paths, settings, &args, stdout.lock(), stderr.lock())
}

/// Render a saved budget to `output`
///
/// A budget that cannot be loaded is reported on `errors` with a failing exit code.
pub fn report_budget<W: Write, E: Write>(
    paths: &BudgetPaths,
    settings: &Settings,
    args: &ReportArgs,
    mut output: W,
    mut errors: E,
) -> BudgetResult<ExitCode> {
    let budget = match Budget::load(paths, &args.name) {
        Ok(budget) => budget,
        Err(err) => {
            tracing::warn!(budget = %args.name, error = %err, "could not load budget");
            writeln!(
                errors,
                "Could not load budget \"{}.{}\"",
                args.name, BUDGET_EXTENSION
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let rules = args.apply(settings).pay_rules();
    writeln!(output, "{}", render_budget(&budget, &rules))?;
    Ok(ExitCode::SUCCESS)
}
