//! Simplified flat-rate tax calculator
//!
//! Applies a 15% flat rate and a $2,000 credit per dependent. Filing status
//! is carried through for display only.

use crate::error::{Result, TaxwiseError};
use serde::Serialize;
use std::fmt;

/// Flat rate applied to gross income
pub const FLAT_RATE: f64 = 0.15;

/// Credit subtracted per dependent
pub const DEPENDENT_CREDIT: f64 = 2000.0;

/// Filing status; not used in the arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FilingStatus {
    /// Single filer
    #[default]
    Single,
    /// Married filing jointly
    Married,
    /// Head of household
    HeadOfHousehold,
}

impl fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "Single"),
            Self::Married => write!(f, "Married Filing Jointly"),
            Self::HeadOfHousehold => write!(f, "Head of Household"),
        }
    }
}

impl From<crate::cli::FilingStatusArg> for FilingStatus {
    fn from(arg: crate::cli::FilingStatusArg) -> Self {
        match arg {
            crate::cli::FilingStatusArg::Single => Self::Single,
            crate::cli::FilingStatusArg::Married => Self::Married,
            crate::cli::FilingStatusArg::HeadOfHousehold => Self::HeadOfHousehold,
        }
    }
}

/// Result of a tax estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxEstimate {
    /// Total tax owed, never negative
    pub tax: f64,
    /// Tax as a percentage of income; 0 when income is 0
    pub effective_rate: f64,
    /// Income left after tax
    pub take_home: f64,
}

impl TaxEstimate {
    /// Values rounded to cents, as shown to the user
    pub fn rounded(&self) -> Self {
        Self {
            tax: round2(self.tax),
            effective_rate: round2(self.effective_rate),
            take_home: round2(self.take_home),
        }
    }
}

impl fmt::Display for TaxEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tax ${:.2}, effective rate {:.2}%, take-home ${:.2}",
            self.tax, self.effective_rate, self.take_home
        )
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Estimate tax for `income` with `dependents` dependents
///
/// `tax = max(0, income * 0.15 - dependents * 2000)`.
///
/// # Errors
///
/// Returns a validation error if `income` is negative or not finite
///
/// # Examples
///
/// ```
/// use taxwise::calculator::compute_tax;
///
/// let estimate = compute_tax(50_000.0, 2).unwrap().rounded();
/// assert_eq!(estimate.tax, 3500.0);
/// assert_eq!(estimate.effective_rate, 7.0);
/// assert_eq!(estimate.take_home, 46_500.0);
/// ```
pub fn compute_tax(income: f64, dependents: u32) -> Result<TaxEstimate> {
    if !income.is_finite() {
        return Err(TaxwiseError::Validation("income must be a finite number".to_string()).into());
    }
    if income < 0.0 {
        return Err(TaxwiseError::Validation("income must not be negative".to_string()).into());
    }

    let tax = (income * FLAT_RATE - f64::from(dependents) * DEPENDENT_CREDIT).max(0.0);
    let effective_rate = if income == 0.0 {
        0.0
    } else {
        tax / income * 100.0
    };

    Ok(TaxEstimate {
        tax,
        effective_rate,
        take_home: income - tax,
    })
}

/// Parse a user-typed income field
///
/// Accepts an optional leading `$` and thousands separators.
///
/// # Errors
///
/// Returns a validation error for an empty or non-numeric field
pub fn parse_income(input: &str) -> Result<f64> {
    let cleaned: String = input
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return Err(TaxwiseError::Validation("income is required".to_string()).into());
    }
    cleaned
        .parse::<f64>()
        .map_err(|_| TaxwiseError::Validation(format!("invalid income: {}", input.trim())).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_error_contains;

    #[test]
    fn test_two_dependents() {
        let estimate = compute_tax(50_000.0, 2).unwrap().rounded();
        assert_eq!(estimate.tax, 3500.0);
        assert_eq!(estimate.effective_rate, 7.0);
        assert_eq!(estimate.take_home, 46_500.0);
    }

    #[test]
    fn test_credit_exceeds_tax_clamps_to_zero() {
        let estimate = compute_tax(10_000.0, 10).unwrap().rounded();
        assert_eq!(estimate.tax, 0.0);
        assert_eq!(estimate.effective_rate, 0.0);
        assert_eq!(estimate.take_home, 10_000.0);
    }

    #[test]
    fn test_zero_income_has_zero_rate() {
        let estimate = compute_tax(0.0, 0).unwrap();
        assert_eq!(estimate.tax, 0.0);
        assert_eq!(estimate.effective_rate, 0.0);
        assert_eq!(estimate.take_home, 0.0);
        assert!(!estimate.effective_rate.is_nan());
    }

    #[test]
    fn test_no_dependents_is_flat_rate() {
        let estimate = compute_tax(80_000.0, 0).unwrap().rounded();
        assert_eq!(estimate.tax, 12_000.0);
        assert_eq!(estimate.effective_rate, 15.0);
    }

    #[test]
    fn test_negative_income_rejected() {
        let err = compute_tax(-1.0, 0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaxwiseError>(),
            Some(TaxwiseError::Validation(_))
        ));
    }

    #[test]
    fn test_non_finite_income_rejected() {
        assert_error_contains(compute_tax(f64::NAN, 0), "income must be a finite number");
        assert_error_contains(compute_tax(f64::INFINITY, 0), "income must be a finite number");
    }

    #[test]
    fn test_display_two_decimals() {
        let estimate = compute_tax(50_000.0, 2).unwrap();
        assert_eq!(
            estimate.to_string(),
            "tax $3500.00, effective rate 7.00%, take-home $46500.00"
        );
    }

    #[test]
    fn test_parse_income() {
        assert_eq!(parse_income("50000").unwrap(), 50_000.0);
        assert_eq!(parse_income(" $52,500.50 ").unwrap(), 52_500.5);
        assert_error_contains(parse_income(""), "income is required");
        assert_error_contains(parse_income("   "), "income is required");
        assert_error_contains(parse_income("lots"), "invalid income: lots");
    }

    #[test]
    fn test_filing_status_display() {
        assert_eq!(FilingStatus::default().to_string(), "Single");
        assert_eq!(FilingStatus::Married.to_string(), "Married Filing Jointly");
        assert_eq!(
            FilingStatus::from(crate::cli::FilingStatusArg::HeadOfHousehold),
            FilingStatus::HeadOfHousehold
        );
    }
}
