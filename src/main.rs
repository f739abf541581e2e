use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use budget_buddy::cli::{handle_create_command, handle_report_command, CreateArgs, ReportArgs};
use budget_buddy::config::{paths::BudgetPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Create and report on simple monthly budgets",
    long_about = "Budget Buddy interactively collects your sources of income and \
                  your expenses, saves them as a budget file, and reports how much \
                  is left over each month."
)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively create a budget from scratch
    Create(CreateArgs),

    /// Report on a saved budget
    Report(ReportArgs),

    /// Show current configuration and paths
    Config {
        /// Write the current settings to the config file
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so reports and prompts stay clean
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Create(args)) => Ok(handle_create_command(&paths, &settings, args)?),
        Some(Commands::Report(args)) => Ok(handle_report_command(&paths, &settings, args)?),
        Some(Commands::Config { save }) => {
            println!("Budget Buddy Configuration");
            println!("==========================");
            println!("Config directory: {}", paths.config_dir().display());
            println!("Budget directory: {}", paths.budget_dir().display());
            println!();
            println!("Settings:");
            println!("  Overtime threshold: {} hours", settings.overtime_threshold);
            println!("  Net pay fraction:   {}", settings.net_pay_fraction);
            println!("  Minimum wage:       {}", settings.minimum_wage);

            if save {
                settings.save(&paths)?;
                println!();
                println!("Saved settings to {}", paths.settings_file().display());
            }
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("Budget Buddy - simple monthly budgets");
            println!();
            println!("Run 'budget --help' for usage information.");
            println!("Run 'budget create <name>' to create your first budget.");
            Ok(ExitCode::SUCCESS)
        }
    }
}
