use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::{validate, EngineError, EngineResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// A single-loan calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub principal: Money,
    /// Annual interest rate in percent form (9 = 9% p.a.).
    pub annual_rate_percent: Rate,
    pub tenure_months: u32,
    /// Emit the full amortization schedule alongside the summary.
    #[serde(default)]
    pub include_schedule: bool,
}

impl LoanRequest {
    /// Build a request from raw form fields, validating as they parse.
    pub fn from_form(
        principal: &str,
        annual_rate_percent: &str,
        tenure_months: &str,
        include_schedule: bool,
    ) -> EngineResult<Self> {
        Ok(Self {
            principal: validate::parse_amount("principal", principal)?,
            annual_rate_percent: validate::parse_rate("annualRatePercent", annual_rate_percent)?,
            tenure_months: validate::parse_tenure_months("tenureMonths", tenure_months)?,
            include_schedule,
        })
    }
}

/// One period of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInstallment {
    pub period: u32,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub remaining_balance: Money,
}

/// Full-precision loan summary. Rounding to the 2-dp response contract
/// happens in `format` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanResult {
    pub monthly_installment: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<LoanInstallment>>,
}

/// One loan inside a portfolio assessment request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioLoan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_type: Option<String>,
    pub principal: Money,
    pub annual_rate_percent: Rate,
    pub tenure_months: u32,
}

/// Several loans assessed together, optionally against monthly income.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPortfolioRequest {
    pub loans: Vec<PortfolioLoan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<Money>,
}

/// Risk band for the combined installment burden relative to income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioLoanResult {
    pub loan_type: Option<String>,
    pub monthly_installment: Money,
    pub principal: Money,
    pub annual_rate_percent: Rate,
    pub tenure_months: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanPortfolioResult {
    pub loans: Vec<PortfolioLoanResult>,
    pub total_monthly_installment: Money,
    pub installment_to_income_percent: Option<Rate>,
    pub risk_level: Option<RiskLevel>,
    pub advice: Option<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the fixed monthly installment and totals for a loan, with the
/// full amortization schedule when requested.
pub fn calculate_loan(input: &LoanRequest) -> EngineResult<ComputationOutput<LoanResult>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let rate = monthly_rate(input.annual_rate_percent);
    let installment = installment_amount(input.principal, rate, input.tenure_months);

    let total_payment = installment * Decimal::from(input.tenure_months);
    let total_interest = total_payment - input.principal;

    let schedule = input
        .include_schedule
        .then(|| build_schedule(input.principal, rate, installment, input.tenure_months));

    let result = LoanResult {
        monthly_installment: installment,
        total_interest,
        total_payment,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "monthly_rate": rate.to_string(),
        "compounding": "monthly",
    });

    Ok(with_metadata(
        "Reducing-balance EMI (equal monthly installments)",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

/// Assess a set of loans together: per-loan installments, the combined
/// monthly outgo, and, when income is supplied, the burden ratio with a
/// risk band and advisory text.
pub fn assess_loan_portfolio(
    input: &LoanPortfolioRequest,
) -> EngineResult<ComputationOutput<LoanPortfolioResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.loans.is_empty() {
        return Err(EngineError::InvalidAmount {
            field: "loans".into(),
            reason: "at least one loan is required".into(),
        });
    }
    if let Some(income) = input.monthly_income {
        validate::check_amount("monthlyIncome", income)?;
    }

    let mut loans = Vec::with_capacity(input.loans.len());
    let mut total = Money::ZERO;
    for (i, loan) in input.loans.iter().enumerate() {
        validate::check_amount(&format!("loans[{i}].principal"), loan.principal)?;
        validate::check_rate(&format!("loans[{i}].annualRatePercent"), loan.annual_rate_percent)?;
        validate::check_tenure_months(&format!("loans[{i}].tenureMonths"), loan.tenure_months)?;

        let installment = installment_amount(
            loan.principal,
            monthly_rate(loan.annual_rate_percent),
            loan.tenure_months,
        );
        total += installment;

        loans.push(PortfolioLoanResult {
            loan_type: loan.loan_type.clone(),
            monthly_installment: installment,
            principal: loan.principal,
            annual_rate_percent: loan.annual_rate_percent,
            tenure_months: loan.tenure_months,
        });
    }

    let (ratio, risk_level, advice) = match input.monthly_income {
        Some(income) => {
            let ratio = total / income * dec!(100);
            if ratio > dec!(100) {
                warnings.push("combined installments exceed monthly income".into());
            }
            let (risk, advice) = classify_burden(ratio);
            (Some(ratio), Some(risk), Some(advice.to_string()))
        }
        None => (None, None, None),
    };

    let result = LoanPortfolioResult {
        loans,
        total_monthly_installment: total,
        installment_to_income_percent: ratio,
        risk_level,
        advice,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "burden_bands": "low <= 30%, medium <= 50%, high > 50% of income",
    });

    Ok(with_metadata(
        "Multi-loan EMI aggregation with income-burden banding",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_input(input: &LoanRequest) -> EngineResult<()> {
    validate::check_amount("principal", input.principal)?;
    validate::check_rate("annualRatePercent", input.annual_rate_percent)?;
    validate::check_tenure_months("tenureMonths", input.tenure_months)?;
    Ok(())
}

fn monthly_rate(annual_rate_percent: Rate) -> Rate {
    annual_rate_percent / dec!(12) / dec!(100)
}

/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1), falling back to straight
/// division of the principal when the rate is zero.
fn installment_amount(principal: Money, rate: Rate, months: u32) -> Money {
    if rate.is_zero() {
        return principal / Decimal::from(months);
    }

    let factor = (Decimal::ONE + rate).powi(months as i64);
    principal * rate * factor / (factor - Decimal::ONE)
}

/// Walk the balance period by period at full precision. The final period's
/// principal portion is the remaining balance itself, so the schedule
/// terminates at exactly zero.
fn build_schedule(
    principal: Money,
    rate: Rate,
    installment: Money,
    months: u32,
) -> Vec<LoanInstallment> {
    let mut schedule = Vec::with_capacity(months as usize);
    let mut balance = principal;

    for period in 1..=months {
        let interest_portion = balance * rate;
        let principal_portion = if period == months {
            balance
        } else {
            installment - interest_portion
        };
        balance -= principal_portion;

        schedule.push(LoanInstallment {
            period,
            interest_portion,
            principal_portion,
            remaining_balance: balance,
        });
    }

    schedule
}

/// Burden bands follow the common 30% / 50% debt-service guidance.
fn classify_burden(ratio: Rate) -> (RiskLevel, &'static str) {
    if ratio <= dec!(30) {
        (
            RiskLevel::Low,
            "The combined installment load is comfortable for this income. \
             Avoid adding new high-interest debt.",
        )
    } else if ratio <= dec!(50) {
        (
            RiskLevel::Medium,
            "The installment burden is moderate. Hold off on new borrowing \
             and prepay the costliest loan when possible.",
        )
    } else {
        (
            RiskLevel::High,
            "The installment burden is heavy. Consider restructuring or \
             prepaying loans and cutting discretionary spending before \
             taking on any new debt.",
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
