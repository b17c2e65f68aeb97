mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::behavior::BehaviorArgs;
use commands::formulas::{EmiArgs, InflateArgs, SipArgs, SipTargetArgs, YearsToTargetArgs};
use commands::scenario::{ClassifyArgs, ScenarioArgs};
use commands::tax::{AdvanceTaxArgs, TaxArgs};

/// Personal-finance scenario analysis for Indian households
#[derive(Parser)]
#[command(
    name = "fina",
    version,
    about = "Personal-finance scenario analysis for Indian households",
    long_about = "A CLI for personal-finance planning with decimal precision. Compares the \
                  old and new Indian tax regimes, classifies free-text money questions into \
                  scenarios (salary hike, house purchase, family planning, job switch, \
                  education, loan prepayment) and runs SIP, EMI and goal projections."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// YAML or JSON file overriding the default assumptions
    #[arg(long, global = true)]
    assumptions: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare tax regimes, price deduction headroom and list deadlines
    Tax(TaxArgs),
    /// Advance-tax installment schedule
    AdvanceTax(AdvanceTaxArgs),
    /// Classify a question and run the matching scenario analysis
    Scenario(ScenarioArgs),
    /// Classify a question without running any analysis
    Classify(ClassifyArgs),
    /// Classify an investment-coaching question and profile its emotional tone
    Behavior(BehaviorArgs),
    /// Future value of a monthly SIP
    Sip(SipArgs),
    /// Equated monthly installment of a loan
    Emi(EmiArgs),
    /// Monthly SIP needed to reach a target
    SipTarget(SipTargetArgs),
    /// Years of SIP needed to reach a target
    YearsToTarget(YearsToTargetArgs),
    /// Inflate a present-day cost to a future year
    Inflate(InflateArgs),
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

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let assumptions = match input::load_assumptions(cli.assumptions.as_deref()) {
        Ok(a) => {
            tracing::debug!(source = cli.assumptions.as_deref().unwrap_or("defaults"), "assumptions loaded");
            a
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Tax(args) => commands::tax::run_tax(args, &assumptions),
        Commands::AdvanceTax(args) => commands::tax::run_advance_tax(args, &assumptions),
        Commands::Scenario(args) => commands::scenario::run_scenario(args, &assumptions),
        Commands::Classify(args) => commands::scenario::run_classify(args),
        Commands::Behavior(args) => commands::behavior::run_behavior(args),
        Commands::Sip(args) => commands::formulas::run_sip(args, &assumptions),
        Commands::Emi(args) => commands::formulas::run_emi(args, &assumptions),
        Commands::SipTarget(args) => commands::formulas::run_sip_target(args, &assumptions),
        Commands::YearsToTarget(args) => commands::formulas::run_years_to_target(args, &assumptions),
        Commands::Inflate(args) => commands::formulas::run_inflate(args, &assumptions),
        Commands::Version => {
            println!("fina {}", env!("CARGO_PKG_VERSION"));
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
