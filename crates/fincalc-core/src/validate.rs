use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

use crate::types::{Money, Rate};
use crate::{EngineError, EngineResult};

// Bounds sized jointly so no post-validation computation can overflow
// Decimal's 96-bit mantissa: (1 + 100/1200)^480 ≈ 5e16, and
// 1e9 * (5e16 / (100/1200)) * (1 + 100/1200) ≈ 6.5e26 < 7.9e28.
pub const MAX_AMOUNT: Decimal = dec!(1_000_000_000);
pub const MAX_ANNUAL_RATE_PERCENT: Decimal = dec!(100);
pub const MAX_TENURE_MONTHS: u32 = 480;
pub const MAX_TENURE_YEARS: u32 = 40;

/// Range-check a monetary input: strictly positive, within the supported
/// ceiling.
pub fn check_amount(field: &str, value: Money) -> EngineResult<()> {
    if value <= Decimal::ZERO {
        return Err(EngineError::InvalidAmount {
            field: field.into(),
            reason: "must be greater than zero".into(),
        });
    }
    if value > MAX_AMOUNT {
        return Err(EngineError::InvalidAmount {
            field: field.into(),
            reason: format!("must not exceed {MAX_AMOUNT}"),
        });
    }
    Ok(())
}

/// Range-check an annual rate in percent form. Zero is valid (interest-free
/// loan, zero-growth projection).
pub fn check_rate(field: &str, value: Rate) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidRate {
            field: field.into(),
            reason: "must not be negative".into(),
        });
    }
    if value >= MAX_ANNUAL_RATE_PERCENT {
        return Err(EngineError::InvalidRate {
            field: field.into(),
            reason: format!("must be below {MAX_ANNUAL_RATE_PERCENT}"),
        });
    }
    Ok(())
}

pub fn check_tenure_months(field: &str, value: u32) -> EngineResult<()> {
    if value == 0 {
        return Err(EngineError::InvalidTenure {
            field: field.into(),
            reason: "must be at least one month".into(),
        });
    }
    if value > MAX_TENURE_MONTHS {
        return Err(EngineError::InvalidTenure {
            field: field.into(),
            reason: format!("must not exceed {MAX_TENURE_MONTHS} months"),
        });
    }
    Ok(())
}

pub fn check_tenure_years(field: &str, value: u32) -> EngineResult<()> {
    if value == 0 {
        return Err(EngineError::InvalidTenure {
            field: field.into(),
            reason: "must be at least one year".into(),
        });
    }
    if value > MAX_TENURE_YEARS {
        return Err(EngineError::InvalidTenure {
            field: field.into(),
            reason: format!("must not exceed {MAX_TENURE_YEARS} years"),
        });
    }
    Ok(())
}

/// Parse a raw form field into a monetary value.
pub fn parse_amount(field: &str, raw: &str) -> EngineResult<Money> {
    let value = Decimal::from_str(raw.trim()).map_err(|_| EngineError::InvalidAmount {
        field: field.into(),
        reason: format!("'{raw}' is not a number"),
    })?;
    check_amount(field, value)?;
    Ok(value)
}

/// Parse a raw form field into an annual rate in percent form.
pub fn parse_rate(field: &str, raw: &str) -> EngineResult<Rate> {
    let value = Decimal::from_str(raw.trim()).map_err(|_| EngineError::InvalidRate {
        field: field.into(),
        reason: format!("'{raw}' is not a number"),
    })?;
    check_rate(field, value)?;
    Ok(value)
}

/// Parse a raw form field into a tenure in months. Fractional or negative
/// input is rejected outright.
pub fn parse_tenure_months(field: &str, raw: &str) -> EngineResult<u32> {
    let value = parse_whole_periods(field, raw)?;
    check_tenure_months(field, value)?;
    Ok(value)
}

/// Parse a raw form field into a tenure in years.
pub fn parse_tenure_years(field: &str, raw: &str) -> EngineResult<u32> {
    let value = parse_whole_periods(field, raw)?;
    check_tenure_years(field, value)?;
    Ok(value)
}

fn parse_whole_periods(field: &str, raw: &str) -> EngineResult<u32> {
    raw.trim().parse::<u32>().map_err(|_| EngineError::InvalidTenure {
        field: field.into(),
        reason: format!("'{raw}' is not a positive whole number"),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
