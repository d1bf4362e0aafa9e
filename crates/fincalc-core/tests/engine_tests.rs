use fincalc_core::engine::{self, CalculationRequest};
use fincalc_core::format::{EmiResponse, PortfolioResponse, SipResponse};
use fincalc_core::EngineError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

// ===========================================================================
// Request router contract tests
// ===========================================================================

fn dispatch(request: serde_json::Value) -> Result<serde_json::Value, EngineError> {
    let request: CalculationRequest =
        serde_json::from_value(request).expect("request should deserialize");
    let response = engine::calculate(&request)?;
    Ok(serde_json::to_value(response).expect("response should serialize"))
}

#[test]
fn test_emi_contract_field_names() {
    let value = dispatch(json!({
        "calculation": "emi",
        "principal": 250000,
        "annualRatePercent": 8.5,
        "tenureMonths": 240,
    }))
    .unwrap();

    assert!(value.get("emi").is_some());
    assert!(value.get("totalInterest").is_some());
    assert!(value.get("totalPayment").is_some());
    // Schedule only appears when asked for
    assert!(value.get("schedule").is_none());

    let response: EmiResponse = serde_json::from_value(value).unwrap();
    assert_eq!(
        response.total_payment,
        response.emi * Decimal::from(240u32),
    );
}

#[test]
fn test_emi_schedule_contract() {
    let value = dispatch(json!({
        "calculation": "emi",
        "principal": 120000,
        "annualRatePercent": 10,
        "tenureMonths": 24,
        "includeSchedule": true,
    }))
    .unwrap();

    let schedule = value["schedule"].as_array().unwrap();
    assert_eq!(schedule.len(), 24);

    let first = &schedule[0];
    assert!(first.get("period").is_some());
    assert!(first.get("interestPortion").is_some());
    assert!(first.get("principalPortion").is_some());
    assert!(first.get("remainingBalance").is_some());

    let response: EmiResponse = serde_json::from_value(value).unwrap();
    let mut schedule = response.schedule.unwrap();
    let last = schedule.pop().unwrap();
    assert_eq!(last.remaining_balance, Decimal::ZERO);
}

#[test]
fn test_sip_contract_field_names() {
    let value = dispatch(json!({
        "calculation": "sip",
        "monthlyContribution": 5000,
        "annualRatePercent": 12,
        "tenureYears": 15,
    }))
    .unwrap();

    assert!(value.get("totalInvested").is_some());
    assert!(value.get("estimatedReturns").is_some());
    assert!(value.get("maturityAmount").is_some());
    assert!(value.get("yearly").is_none());

    let response: SipResponse = serde_json::from_value(value).unwrap();
    assert_eq!(response.total_invested, dec!(900000.00));
    assert_eq!(
        response.estimated_returns,
        response.maturity_amount - response.total_invested,
    );
}

#[test]
fn test_portfolio_contract() {
    let value = dispatch(json!({
        "calculation": "emiPortfolio",
        "loans": [
            {"loanType": "home", "principal": 1000000, "annualRatePercent": 9, "tenureMonths": 180},
            {"loanType": "car", "principal": 300000, "annualRatePercent": 11, "tenureMonths": 60},
        ],
        "monthlyIncome": 60000,
    }))
    .unwrap();

    assert!(value.get("totalEmi").is_some());
    assert_eq!(value["riskLevel"], json!("low"));
    assert_eq!(value["loans"].as_array().unwrap().len(), 2);

    let response: PortfolioResponse = serde_json::from_value(value).unwrap();
    assert!(response.emi_to_income_ratio.unwrap() < dec!(30));
    assert!(response.advice.is_some());
}

#[test]
fn test_unknown_calculation_is_rejected() {
    let result = serde_json::from_value::<CalculationRequest>(json!({
        "calculation": "netWorth",
        "assets": 100,
    }));
    assert!(result.is_err());
}

#[test]
fn test_validation_errors_cross_the_router() {
    let err = dispatch(json!({
        "calculation": "emi",
        "principal": -5,
        "annualRatePercent": 9,
        "tenureMonths": 12,
    }))
    .unwrap_err();

    assert!(matches!(err, EngineError::InvalidAmount { .. }));
    assert_eq!(err.field(), "principal");

    let err = dispatch(json!({
        "calculation": "sip",
        "monthlyContribution": 5000,
        "annualRatePercent": 12,
        "tenureYears": 0,
    }))
    .unwrap_err();

    assert!(matches!(err, EngineError::InvalidTenure { .. }));
    assert_eq!(err.field(), "tenureYears");
}
