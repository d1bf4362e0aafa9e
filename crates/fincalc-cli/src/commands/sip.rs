use clap::Args;
use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::engine::{self, CalculationRequest};
use fincalc_core::sip::SipRequest;

use crate::input;

/// Arguments for SIP maturity projection
#[derive(Args)]
pub struct SipArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly contribution
    #[arg(long, alias = "amount")]
    pub monthly_contribution: Option<Decimal>,

    /// Expected annual return in percent
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Tenure in years
    #[arg(long, alias = "years")]
    pub tenure_years: Option<u32>,

    /// Include the year-by-year projection
    #[arg(long)]
    pub yearly: bool,
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut request: SipRequest = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        SipRequest {
            monthly_contribution: args
                .monthly_contribution
                .ok_or("--monthly-contribution is required (or provide --input)")?,
            annual_rate_percent: args
                .annual_rate_percent
                .ok_or("--annual-rate-percent is required (or provide --input)")?,
            tenure_years: args
                .tenure_years
                .ok_or("--tenure-years is required (or provide --input)")?,
            include_yearly: false,
        }
    };
    if args.yearly {
        request.include_yearly = true;
    }

    debug!(
        "sip request: contribution={} rate={} years={} yearly={}",
        request.monthly_contribution,
        request.annual_rate_percent,
        request.tenure_years,
        request.include_yearly,
    );

    let response = engine::calculate(&CalculationRequest::Sip(request))?;
    Ok(serde_json::to_value(response)?)
}
