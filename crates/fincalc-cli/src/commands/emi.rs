use clap::Args;
use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::emi::{LoanPortfolioRequest, LoanRequest};
use fincalc_core::engine::{self, CalculationRequest};

use crate::input;

/// Arguments for single-loan EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Tenure in months
    #[arg(long, alias = "months")]
    pub tenure_months: Option<u32>,

    /// Include the full amortization schedule
    #[arg(long)]
    pub schedule: bool,
}

/// Arguments for multi-loan portfolio assessment
#[derive(Args)]
pub struct PortfolioArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut request: LoanRequest = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanRequest {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args
                .annual_rate_percent
                .ok_or("--annual-rate-percent is required (or provide --input)")?,
            tenure_months: args
                .tenure_months
                .ok_or("--tenure-months is required (or provide --input)")?,
            include_schedule: false,
        }
    };
    if args.schedule {
        request.include_schedule = true;
    }

    debug!(
        "emi request: principal={} rate={} months={} schedule={}",
        request.principal,
        request.annual_rate_percent,
        request.tenure_months,
        request.include_schedule,
    );

    let response = engine::calculate(&CalculationRequest::Emi(request))?;
    Ok(serde_json::to_value(response)?)
}

pub fn run_portfolio(args: PortfolioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: LoanPortfolioRequest = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for portfolio assessment".into());
    };

    debug!("portfolio request: {} loans", request.loans.len());

    let response = engine::calculate(&CalculationRequest::EmiPortfolio(request))?;
    Ok(serde_json::to_value(response)?)
}
