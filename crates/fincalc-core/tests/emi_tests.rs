use fincalc_core::emi::{self, LoanPortfolioRequest, LoanRequest, PortfolioLoan, RiskLevel};
use fincalc_core::format;
use fincalc_core::types::Money;
use fincalc_core::EngineError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// EMI calculator tests
// ===========================================================================

fn request(principal: Decimal, rate: Decimal, months: u32) -> LoanRequest {
    LoanRequest {
        principal,
        annual_rate_percent: rate,
        tenure_months: months,
        include_schedule: true,
    }
}

fn respond(req: &LoanRequest) -> format::EmiResponse {
    let output = emi::calculate_loan(req).unwrap();
    format::loan_response(req, &output.result)
}

#[test]
fn test_ten_lakh_home_loan() {
    let req = request(dec!(1_000_000), dec!(9), 180);
    let response = respond(&req);

    // Standard amortization formula puts the EMI near 10,142.67
    assert!((response.emi - dec!(10142.67)).abs() < dec!(0.05));

    // Roughly 825k of interest over 15 years
    assert!(response.total_interest > dec!(800_000));
    assert!(response.total_interest < dec!(850_000));
}

#[test]
fn test_published_totals_reconcile_exactly() {
    let cases = [
        (dec!(1_000_000), dec!(9), 180u32),
        (dec!(250_000), dec!(8.5), 240),
        (dec!(50_000), dec!(14), 36),
        (dec!(750_000), dec!(0), 60),
        (dec!(9_999.99), dec!(23.75), 7),
    ];

    for (principal, rate, months) in cases {
        let req = request(principal, rate, months);
        let response = respond(&req);

        assert_eq!(
            response.total_payment,
            response.emi * Decimal::from(months),
            "totalPayment != emi * n for {principal} @ {rate}% over {months}m",
        );
        assert_eq!(
            response.total_interest,
            response.total_payment - principal,
            "totalInterest != totalPayment - principal for {principal} @ {rate}% over {months}m",
        );
    }
}

#[test]
fn test_schedule_invariants() {
    let req = request(dec!(250_000), dec!(8.5), 240);
    let response = respond(&req);
    let schedule = response.schedule.unwrap();

    assert_eq!(schedule.len(), 240);

    // Periods run 1..=n in order
    for (i, row) in schedule.iter().enumerate() {
        assert_eq!(row.period, i as u32 + 1);
    }

    // Balance is monotonically non-increasing and terminates at exactly zero
    let mut previous = dec!(250_000);
    for row in &schedule {
        assert!(row.remaining_balance <= previous);
        previous = row.remaining_balance;
    }
    assert_eq!(schedule.last().unwrap().remaining_balance, Decimal::ZERO);

    // Each period splits the installment; the last absorbs the residue
    for row in &schedule[..schedule.len() - 1] {
        assert_eq!(row.interest_portion + row.principal_portion, response.emi);
    }

    // Principal portions sum back to the principal exactly
    let repaid: Money = schedule.iter().map(|row| row.principal_portion).sum();
    assert_eq!(repaid, dec!(250_000));
}

#[test]
fn test_zero_rate_loan() {
    let req = request(dec!(12_000), Decimal::ZERO, 12);
    let response = respond(&req);

    assert_eq!(response.emi, dec!(1000.00));
    assert_eq!(response.total_interest, dec!(0.00));
    assert_eq!(response.total_payment, dec!(12000.00));

    // No interest anywhere in the schedule
    let schedule = response.schedule.unwrap();
    assert!(schedule.iter().all(|row| row.interest_portion.is_zero()));
}

#[test]
fn test_single_installment_boundary() {
    // One period reduces to principal * (1 + r)
    let req = request(dec!(100_000), dec!(12), 1);
    let response = respond(&req);

    assert_eq!(response.emi, dec!(101000.00));
    let schedule = response.schedule.unwrap();
    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule[0].principal_portion, dec!(100_000));
    assert_eq!(schedule[0].remaining_balance, Decimal::ZERO);
}

#[test]
fn test_long_tenure_stays_stable() {
    // 40 years of compounding through the closed-form power
    let req = request(dec!(5_000_000), dec!(7.25), 480);
    let response = respond(&req);

    assert!(response.emi > Decimal::ZERO);
    assert_eq!(
        response.total_payment,
        response.emi * Decimal::from(480u32),
    );

    let schedule = response.schedule.unwrap();
    assert_eq!(schedule.last().unwrap().remaining_balance, Decimal::ZERO);
}

#[test]
fn test_validation_taxonomy() {
    let err = emi::calculate_loan(&request(dec!(-1), dec!(9), 12)).unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount { .. }));
    assert_eq!(err.field(), "principal");

    let err = emi::calculate_loan(&request(dec!(1000), dec!(100), 12)).unwrap_err();
    assert!(matches!(err, EngineError::InvalidRate { .. }));

    let err = emi::calculate_loan(&request(dec!(1000), dec!(9), 0)).unwrap_err();
    assert!(matches!(err, EngineError::InvalidTenure { .. }));
}

// ===========================================================================
// Portfolio assessment tests
// ===========================================================================

fn two_loan_portfolio(income: Option<Decimal>) -> LoanPortfolioRequest {
    LoanPortfolioRequest {
        loans: vec![
            PortfolioLoan {
                loan_type: Some("home".into()),
                principal: dec!(2_500_000),
                annual_rate_percent: dec!(8.75),
                tenure_months: 240,
            },
            PortfolioLoan {
                loan_type: Some("personal".into()),
                principal: dec!(200_000),
                annual_rate_percent: dec!(15),
                tenure_months: 48,
            },
        ],
        monthly_income: income,
    }
}

#[test]
fn test_portfolio_total_is_sum_of_parts() {
    let req = two_loan_portfolio(None);
    let output = emi::assess_loan_portfolio(&req).unwrap();
    let response = format::portfolio_response(&output.result);

    assert_eq!(response.loans.len(), 2);
    assert_eq!(response.loans[0].loan_type.as_deref(), Some("home"));

    let sum: Money = response.loans.iter().map(|l| l.emi).sum();
    // Per-loan figures are rounded independently of the total
    assert!((response.total_emi - sum).abs() <= dec!(0.01));

    assert!(response.emi_to_income_ratio.is_none());
    assert!(response.risk_level.is_none());
    assert!(response.advice.is_none());
}

#[test]
fn test_portfolio_risk_bands() {
    // ~22.1k home + ~5.6k personal ≈ 27.7k of EMIs
    let comfortable = emi::assess_loan_portfolio(&two_loan_portfolio(Some(dec!(100_000))))
        .unwrap()
        .result;
    assert_eq!(comfortable.risk_level, Some(RiskLevel::Low));

    let stretched = emi::assess_loan_portfolio(&two_loan_portfolio(Some(dec!(60_000))))
        .unwrap()
        .result;
    assert_eq!(stretched.risk_level, Some(RiskLevel::Medium));

    let overloaded = emi::assess_loan_portfolio(&two_loan_portfolio(Some(dec!(40_000))))
        .unwrap()
        .result;
    assert_eq!(overloaded.risk_level, Some(RiskLevel::High));
    assert!(overloaded.advice.unwrap().contains("restructuring"));
}

#[test]
fn test_portfolio_flags_income_shortfall() {
    let output = emi::assess_loan_portfolio(&two_loan_portfolio(Some(dec!(20_000)))).unwrap();
    assert!(output
        .warnings
        .iter()
        .any(|w| w.contains("exceed monthly income")));
}

#[test]
fn test_portfolio_reports_offending_loan() {
    let mut req = two_loan_portfolio(None);
    req.loans[1].tenure_months = 0;

    let err = emi::assess_loan_portfolio(&req).unwrap_err();
    assert_eq!(err.field(), "loans[1].tenureMonths");
}
