//! The only place monetary precision is cut. Everything upstream computes
//! at full Decimal precision; the response contracts below carry exactly
//! two decimal places, rounded half-up.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

#[cfg(feature = "emi")]
use crate::emi::{LoanInstallment, LoanPortfolioResult, LoanRequest, LoanResult, RiskLevel};
#[cfg(feature = "sip")]
use crate::sip::SipResult;

/// Decimal places carried by every monetary response field.
pub const MONEY_DP: u32 = 2;

/// Round half-up to the response precision.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Response contracts
// ---------------------------------------------------------------------------

#[cfg(feature = "emi")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentRow {
    pub period: u32,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub remaining_balance: Money,
}

#[cfg(feature = "emi")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiResponse {
    pub emi: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<InstallmentRow>>,
}

#[cfg(feature = "emi")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioLoanRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_type: Option<String>,
    pub emi: Money,
    pub principal: Money,
    pub annual_rate_percent: Rate,
    pub tenure_months: u32,
}

#[cfg(feature = "emi")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    pub loans: Vec<PortfolioLoanRow>,
    pub total_emi: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emi_to_income_ratio: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
}

#[cfg(feature = "sip")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipYearRow {
    pub year: u32,
    pub invested: Money,
    pub value: Money,
    pub growth: Money,
}

#[cfg(feature = "sip")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipResponse {
    pub total_invested: Money,
    pub estimated_returns: Money,
    pub maturity_amount: Money,
    pub absolute_return_percent: Rate,
    pub annualized_return_percent: Rate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yearly: Option<Vec<SipYearRow>>,
}

// ---------------------------------------------------------------------------
// Shaping
// ---------------------------------------------------------------------------

/// Shape a loan result into the response contract.
///
/// The published totals derive from the published (rounded) installment, so
/// `totalPayment = emi * tenureMonths` and `totalPayment = principal +
/// totalInterest` hold exactly at 2 dp rather than within a tolerance.
#[cfg(feature = "emi")]
pub fn loan_response(request: &LoanRequest, result: &LoanResult) -> EmiResponse {
    let emi = round_money(result.monthly_installment);
    let total_payment = emi * Decimal::from(request.tenure_months);
    let total_interest = round_money(total_payment - request.principal);

    let schedule = result
        .schedule
        .as_ref()
        .map(|schedule| schedule_rows(request.principal, emi, schedule));

    EmiResponse {
        emi,
        total_interest,
        total_payment,
        schedule,
    }
}

/// Re-derive the schedule at 2 dp: interest is rounded per period, principal
/// is the installment remainder, and balances telescope. The final row's
/// principal portion is the prior balance, absorbing all rounding residue,
/// so the terminal balance is exactly zero and principal portions sum
/// exactly to the (rounded) principal.
#[cfg(feature = "emi")]
fn schedule_rows(principal: Money, emi: Money, schedule: &[LoanInstallment]) -> Vec<InstallmentRow> {
    let mut rows = Vec::with_capacity(schedule.len());
    let mut balance = round_money(principal);
    let last = schedule.len();

    for (i, period) in schedule.iter().enumerate() {
        let interest_portion = round_money(period.interest_portion);
        let principal_portion = if i + 1 == last {
            balance
        } else {
            emi - interest_portion
        };
        balance -= principal_portion;

        rows.push(InstallmentRow {
            period: period.period,
            interest_portion,
            principal_portion,
            remaining_balance: balance,
        });
    }

    rows
}

/// Shape a portfolio assessment into the response contract.
#[cfg(feature = "emi")]
pub fn portfolio_response(result: &LoanPortfolioResult) -> PortfolioResponse {
    let loans = result
        .loans
        .iter()
        .map(|loan| PortfolioLoanRow {
            loan_type: loan.loan_type.clone(),
            emi: round_money(loan.monthly_installment),
            principal: loan.principal,
            annual_rate_percent: loan.annual_rate_percent,
            tenure_months: loan.tenure_months,
        })
        .collect();

    PortfolioResponse {
        loans,
        total_emi: round_money(result.total_monthly_installment),
        emi_to_income_ratio: result.installment_to_income_percent.map(round_money),
        risk_level: result.risk_level,
        advice: result.advice.clone(),
    }
}

/// Shape a SIP projection into the response contract. `estimatedReturns` is
/// the difference of the published figures, so the identity holds exactly.
#[cfg(feature = "sip")]
pub fn sip_response(result: &SipResult) -> SipResponse {
    let total_invested = round_money(result.total_invested);
    let maturity_amount = round_money(result.maturity_amount);
    let estimated_returns = maturity_amount - total_invested;

    let yearly = result.yearly.as_ref().map(|yearly| {
        yearly
            .iter()
            .map(|row| SipYearRow {
                year: row.year,
                invested: round_money(row.invested),
                value: round_money(row.value),
                growth: round_money(row.growth),
            })
            .collect()
    });

    SipResponse {
        total_invested,
        estimated_returns,
        maturity_amount,
        absolute_return_percent: round_money(result.absolute_return_percent),
        annualized_return_percent: round_money(result.annualized_return_percent),
        yearly,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
