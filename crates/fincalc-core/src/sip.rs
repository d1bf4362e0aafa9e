use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::{validate, EngineResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// A systematic-investment-plan projection request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipRequest {
    pub monthly_contribution: Money,
    /// Expected annual return in percent form (12 = 12% p.a.).
    pub annual_rate_percent: Rate,
    pub tenure_years: u32,
    /// Emit a year-by-year projection alongside the summary.
    #[serde(default)]
    pub include_yearly: bool,
}

impl SipRequest {
    /// Build a request from raw form fields, validating as they parse.
    pub fn from_form(
        monthly_contribution: &str,
        annual_rate_percent: &str,
        tenure_years: &str,
        include_yearly: bool,
    ) -> EngineResult<Self> {
        Ok(Self {
            monthly_contribution: validate::parse_amount(
                "monthlyContribution",
                monthly_contribution,
            )?,
            annual_rate_percent: validate::parse_rate("annualRatePercent", annual_rate_percent)?,
            tenure_years: validate::parse_tenure_years("tenureYears", tenure_years)?,
            include_yearly,
        })
    }

    pub fn total_months(&self) -> u32 {
        self.tenure_years * 12
    }
}

/// One year of a SIP projection. `growth` is the value gained during the
/// year beyond that year's contributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipYear {
    pub year: u32,
    pub invested: Money,
    pub value: Money,
    pub growth: Money,
}

/// Full-precision projection summary. Rounding to the 2-dp response
/// contract happens in `format` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipResult {
    pub total_invested: Money,
    pub estimated_returns: Money,
    pub maturity_amount: Money,
    pub absolute_return_percent: Rate,
    pub annualized_return_percent: Rate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yearly: Option<Vec<SipYear>>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project the maturity value of a monthly SIP compounding at the expected
/// annual rate.
pub fn project_sip(input: &SipRequest) -> EngineResult<ComputationOutput<SipResult>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let rate = monthly_rate(input.annual_rate_percent);
    let months = input.total_months();

    let total_invested = input.monthly_contribution * Decimal::from(months);
    let maturity_amount = future_value(input.monthly_contribution, rate, months);
    let estimated_returns = maturity_amount - total_invested;

    let absolute_return_percent = estimated_returns / total_invested * dec!(100);
    let annualized_return_percent =
        annualized_return(maturity_amount, total_invested, input.tenure_years);

    let yearly = input
        .include_yearly
        .then(|| build_yearly(input.monthly_contribution, rate, input.tenure_years));

    let result = SipResult {
        total_invested,
        estimated_returns,
        maturity_amount,
        absolute_return_percent,
        annualized_return_percent,
        yearly,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "monthly_rate": rate.to_string(),
        "contribution_timing": "start_of_month",
    });

    Ok(with_metadata(
        "Future value of an annuity-due (monthly compounding)",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_input(input: &SipRequest) -> EngineResult<()> {
    validate::check_amount("monthlyContribution", input.monthly_contribution)?;
    validate::check_rate("annualRatePercent", input.annual_rate_percent)?;
    validate::check_tenure_years("tenureYears", input.tenure_years)?;
    Ok(())
}

fn monthly_rate(annual_rate_percent: Rate) -> Rate {
    annual_rate_percent / dec!(12) / dec!(100)
}

/// FV = C * ((1 + r)^n - 1) / r * (1 + r): the value of n start-of-month
/// contributions at the end of month n, degrading to C * n at zero rate.
fn future_value(contribution: Money, rate: Rate, months: u32) -> Money {
    if rate.is_zero() {
        return contribution * Decimal::from(months);
    }

    let factor = (Decimal::ONE + rate).powi(months as i64);
    contribution * (factor - Decimal::ONE) / rate * (Decimal::ONE + rate)
}

/// Compound annual growth rate over the whole tenure, in percent.
fn annualized_return(maturity: Money, invested: Money, years: u32) -> Rate {
    if maturity == invested {
        return Decimal::ZERO;
    }
    let exponent = Decimal::ONE / Decimal::from(years);
    ((maturity / invested).powd(exponent) - Decimal::ONE) * dec!(100)
}

/// Year-end snapshots, each valued closed-form so late years carry no
/// accumulated error from earlier ones.
fn build_yearly(contribution: Money, rate: Rate, years: u32) -> Vec<SipYear> {
    let mut rows = Vec::with_capacity(years as usize);
    let mut prev_value = Money::ZERO;

    for year in 1..=years {
        let months = year * 12;
        let invested = contribution * Decimal::from(months);
        let value = future_value(contribution, rate, months);
        let growth = value - prev_value - contribution * dec!(12);

        rows.push(SipYear {
            year,
            invested,
            value,
            growth,
        });
        prev_value = value;
    }

    rows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
