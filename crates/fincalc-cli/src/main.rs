mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::emi::{EmiArgs, PortfolioArgs};
use commands::sip::SipArgs;

/// Loan amortization and SIP projection calculations
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Loan amortization and SIP projection calculations",
    long_about = "A CLI for the fincalc engine: reducing-balance EMI \
                  calculations with full amortization schedules, multi-loan \
                  affordability assessment, and SIP maturity projections, \
                  all with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the monthly installment and totals for a loan
    Emi(EmiArgs),
    /// Assess several loans together against monthly income
    Portfolio(PortfolioArgs),
    /// Project the maturity value of a monthly SIP
    Sip(SipArgs),
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
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::emi::run_emi(args),
        Commands::Portfolio(args) => commands::emi::run_portfolio(args),
        Commands::Sip(args) => commands::sip::run_sip(args),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
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
