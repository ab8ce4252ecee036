//! Black (lognormal) pricing and implied volatility.
//!
//! # Formula
//! ```text
//! C(F, K, T, σ) = F·N(d₁) − K·N(d₂)
//! P(F, K, T, σ) = K·N(−d₂) − F·N(−d₁)
//! d₁ = (ln(F/K) + ½σ²T) / (σ√T),  d₂ = d₁ − σ√T
//! ```
//!
//! Implied volatility uses Jäckel's "Let's Be Rational" through the
//! [`implied_vol`] crate, after checking the price against the no-arbitrage
//! bounds.

use implied_vol::implied_black_volatility;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::conventions::{discount_factor, forward_price};
use crate::error::{self, LnMixError};
use crate::types::{OptionType, Vol};
use crate::validate::{validate_finite, validate_non_negative, validate_positive};

/// Undiscounted Black-76 price of a European option on a forward.
///
/// A zero volatility returns the intrinsic value `max(φ(F − K), 0)`.
///
/// # Errors
/// Returns [`LnMixError::InvalidInput`] if forward, strike or expiry are not
/// positive and finite, or if `vol` is negative or non-finite.
pub fn black_price(
    forward: f64,
    strike: f64,
    vol: f64,
    expiry: f64,
    option_type: OptionType,
) -> error::Result<f64> {
    validate_positive(forward, "forward")?;
    validate_positive(strike, "strike")?;
    validate_positive(expiry, "expiry")?;
    validate_non_negative(vol, "vol")?;

    let phi = option_type.sign();
    let std_dev = vol * expiry.sqrt();
    if std_dev == 0.0 {
        return Ok((phi * (forward - strike)).max(0.0));
    }
    let d1 = ((forward / strike).ln() + 0.5 * std_dev * std_dev) / std_dev;
    let d2 = d1 - std_dev;
    let n = Normal::standard();
    Ok(phi * (forward * n.cdf(phi * d1) - strike * n.cdf(phi * d2)))
}

/// Discounted Black–Scholes price on a spot with continuously compounded rate.
///
/// Equivalent to `e^{−rT} · black_price(S·e^{rT}, K, σ, T)`.
///
/// # Errors
/// Same as [`black_price`], plus [`LnMixError::InvalidInput`] for a
/// non-positive spot or non-finite rate.
pub fn black_scholes_price(
    spot: f64,
    strike: f64,
    rate: f64,
    expiry: f64,
    vol: f64,
    option_type: OptionType,
) -> error::Result<f64> {
    validate_positive(spot, "spot")?;
    validate_finite(rate, "rate")?;
    let undiscounted = black_price(
        forward_price(spot, rate, expiry),
        strike,
        vol,
        expiry,
        option_type,
    )?;
    Ok(discount_factor(rate, expiry) * undiscounted)
}

/// Black (lognormal) implied volatility calculator.
#[derive(Debug)]
pub struct BlackImpliedVol;

impl BlackImpliedVol {
    /// Compute Black implied volatility from an undiscounted option price.
    ///
    /// # Arguments
    /// * `option_price`: Undiscounted price of the vanilla option
    /// * `forward`: Forward price at expiry (must be > 0)
    /// * `strike`: Strike price (must be > 0)
    /// * `expiry`: Time to expiry in years (must be > 0)
    /// * `option_type`: Call or Put
    ///
    /// # Errors
    /// Returns [`LnMixError::InvalidInput`] for non-positive inputs or a price
    /// outside the open no-arbitrage band `(intrinsic, upper bound)`,
    /// [`LnMixError::NumericalError`] if the solver returns no usable volatility.
    pub fn compute(
        option_price: f64,
        forward: f64,
        strike: f64,
        expiry: f64,
        option_type: OptionType,
    ) -> error::Result<Vol> {
        validate_positive(forward, "forward")?;
        validate_positive(strike, "strike")?;
        validate_positive(expiry, "expiry")?;
        validate_finite(option_price, "option_price")?;

        let (intrinsic, upper) = match option_type {
            OptionType::Call => ((forward - strike).max(0.0), forward),
            OptionType::Put => ((strike - forward).max(0.0), strike),
        };
        if option_price <= intrinsic || option_price >= upper {
            return Err(LnMixError::InvalidInput {
                message: format!(
                    "{option_type:?} price {option_price} outside no-arbitrage band \
                     ({intrinsic}, {upper}) for F={forward}, K={strike}"
                ),
            });
        }

        let sigma = implied_black_volatility(
            option_price,
            forward,
            strike,
            expiry,
            option_type == OptionType::Call,
        );
        // The solver signals out-of-band prices with ±f64::MAX.
        if !sigma.is_finite() || sigma <= 0.0 || sigma == f64::MAX {
            #[cfg(feature = "logging")]
            tracing::debug!(
                option_price,
                forward,
                strike,
                expiry,
                sigma,
                "Black implied vol extraction failed"
            );
            return Err(LnMixError::NumericalError {
                message: format!(
                    "implied vol {sigma} invalid for price {option_price}, \
                     F={forward}, K={strike}, T={expiry}"
                ),
            });
        }
        Ok(Vol(sigma))
    }
}
