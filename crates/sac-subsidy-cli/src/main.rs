mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::process;

use commands::schedule::ScheduleArgs;
use commands::simulate::SimulateArgs;
use commands::subsidy::SubsidyArgs;

/// SAC loan schedules with capped interest subsidies
#[derive(Parser)]
#[command(
    name = "sacsim",
    version,
    about = "SAC loan schedules with capped interest subsidies",
    long_about = "A CLI for constant-amortization (SAC) loan schedules with decimal \
                  precision. Prorates the first period by actual days, derives a \
                  rate-capped and value-capped interest subsidy, and spreads it \
                  evenly over the installments."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a SAC amortization schedule
    Schedule(ScheduleArgs),
    /// Derive the capped subsidy and the reduced installments
    Subsidy(SubsidyArgs),
    /// Full simulation: nominal schedule, totals, tax, subsidy and final schedule
    Simulate(SimulateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = SimpleLogger::new()
        .with_level(log_level(cli.verbose))
        .init()
    {
        eprintln!("{}: failed to initialise logging: {}", "warning".yellow(), e);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Subsidy(args) => commands::subsidy::run_subsidy(args),
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::Version => {
            println!("sacsim {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result.and_then(|value| output::format_output(&cli.output, &value)) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
