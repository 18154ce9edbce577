mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::generate::GenerateArgs;
use commands::payments::UpcomingArgs;
use commands::portfolio::{QueueArgs, TopShortagesArgs};
use commands::scenario::{ReconcileArgs, ScenarioArgs};
use config::Settings;

/// Escrow shortage analytics for mortgage servicing portfolios
#[derive(Parser)]
#[command(
    name = "escrow",
    version,
    about = "Escrow shortage analytics for mortgage servicing portfolios",
    long_about = "Loads a borrower escrow extract and reports portfolio KPIs, \
                  risk tiers, county and channel distributions, upcoming tax and \
                  insurance disbursements, the largest shortages, and what-if \
                  scenarios on tax, insurance and contribution changes."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// YAML settings file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Escrow dataset (JSON array); stdin is read when piped and this is absent
    #[arg(long, global = true)]
    data: Option<String>,

    /// Raise the default log level to debug
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Portfolio KPIs (customers, balances, shortage totals)
    Metrics,
    /// Borrower counts and amounts per risk tier
    Segments,
    /// Borrowers per county
    Counties,
    /// Borrowers per last interaction channel
    Interactions,
    /// Tax and insurance disbursements due inside the window
    Upcoming(UpcomingArgs),
    /// Largest forecast shortages
    TopShortages(TopShortagesArgs),
    /// Page through the shortage queue, optionally for one tier
    Queue(QueueArgs),
    /// Project shortages under tax, insurance and contribution changes
    Scenario(ScenarioArgs),
    /// Check stored forecasts against the cushion formula
    Reconcile(ReconcileArgs),
    /// Overview snapshot combining every analysis
    Dashboard,
    /// Write a synthetic escrow dataset
    Generate(GenerateArgs),
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

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };
    let data = cli.data.as_deref();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Metrics => commands::portfolio::run_metrics(data, &settings),
        Commands::Segments => commands::portfolio::run_segments(data, &settings),
        Commands::Counties => commands::portfolio::run_counties(data, &settings),
        Commands::Interactions => commands::portfolio::run_interactions(data, &settings),
        Commands::Upcoming(args) => commands::payments::run_upcoming(args, data, &settings),
        Commands::TopShortages(args) => {
            commands::portfolio::run_top_shortages(args, data, &settings)
        }
        Commands::Queue(args) => commands::portfolio::run_queue(args, data, &settings),
        Commands::Scenario(args) => commands::scenario::run_scenario(args, data, &settings),
        Commands::Reconcile(args) => commands::scenario::run_reconcile(args, data, &settings),
        Commands::Dashboard => commands::portfolio::run_dashboard(data, &settings),
        Commands::Generate(args) => commands::generate::run_generate(args),
        Commands::Version => {
            println!("escrow {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
