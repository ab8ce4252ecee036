//! Input validation helpers.
//!
//! Standardizes validation across the crate using `!is_finite()` to reject
//! NaN, +Inf, and -Inf uniformly.

use crate::error::LnMixError;

/// Tolerance on `|Σ λᵢ − 1|` when validating mixture weights.
pub const WEIGHT_SUM_TOL: f64 = 1e-8;

/// Validate that a value is strictly positive and finite (rejects NaN, Inf, zero, negatives).
pub(crate) fn validate_positive(value: f64, name: &str) -> crate::error::Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(LnMixError::InvalidInput {
            message: format!("{name} must be positive and finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate that a value is non-negative and finite (rejects NaN, Inf, negatives).
pub(crate) fn validate_non_negative(value: f64, name: &str) -> crate::error::Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(LnMixError::InvalidInput {
            message: format!("{name} must be non-negative and finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate that a value is finite (rejects NaN and Inf; allows zero and negatives).
pub(crate) fn validate_finite(value: f64, name: &str) -> crate::error::Result<f64> {
    if !value.is_finite() {
        return Err(LnMixError::InvalidInput {
            message: format!("{name} must be finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate mixture weights: non-empty, each non-negative and finite, summing to one.
pub(crate) fn validate_weights(lambdas: &[f64]) -> crate::error::Result<()> {
    if lambdas.is_empty() {
        return Err(LnMixError::InvalidInput {
            message: "at least one mixture component is required".into(),
        });
    }
    for (i, &w) in lambdas.iter().enumerate() {
        validate_non_negative(w, &format!("lambdas[{i}]"))?;
    }
    let total: f64 = lambdas.iter().sum();
    if (total - 1.0).abs() > WEIGHT_SUM_TOL {
        return Err(LnMixError::InvalidInput {
            message: format!("lambdas must sum to 1 (tolerance {WEIGHT_SUM_TOL}), got {total}"),
        });
    }
    Ok(())
}

/// Validate component volatilities.
///
/// Negative or non-finite values are malformed input. A zero volatility is
/// well-formed but divides by zero in `d1`/`d2`, so it is a domain error
/// naming the component.
pub(crate) fn validate_etas(etas: &[f64]) -> crate::error::Result<()> {
    for (i, &eta) in etas.iter().enumerate() {
        validate_non_negative(eta, &format!("etas[{i}]"))?;
        if eta == 0.0 {
            return Err(LnMixError::DomainError {
                message: format!("etas[{i}] is zero; d1/d2 divide by eta*sqrt(tau)"),
                strike: None,
                component: Some(i),
            });
        }
    }
    Ok(())
}
