//! Closed-form kernels for the shifted lognormal mixture.
//!
//! Both kernels work on already-validated parameters. They still check every
//! intermediate that can leave its domain (quantile argument, transformed
//! strike, `d1`/`d2`) and report the offending strike or component instead of
//! letting NaN through.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::conventions::{discount_factor, forward_price, shift_amount, shifted_spot};
use crate::error::{self, LnMixError};
use crate::types::OptionType;

/// ATM-forward Black volatility implied by the mixture.
///
/// ```text
/// p  = (1 − α) · Σᵢ λᵢ · Φ(½ ηᵢ √τ) + ½ α
/// σ₀ = 2/√τ · Φ⁻¹(p)
/// ```
pub(crate) fn atm_forward_vol(
    lambdas: &[f64],
    etas: &[f64],
    tau: f64,
    alpha: f64,
) -> error::Result<f64> {
    if alpha >= 1.0 {
        return Err(LnMixError::domain(format!(
            "alpha must be < 1 so that s0*(1 - alpha) > 0, got {alpha}"
        )));
    }
    let normal = Normal::standard();
    let sqrt_tau = tau.sqrt();

    let mut weighted = 0.0;
    for (&lambda, &eta) in lambdas.iter().zip(etas) {
        weighted += lambda * normal.cdf(0.5 * eta * sqrt_tau);
    }
    let p = (1.0 - alpha) * weighted + 0.5 * alpha;

    // Φ⁻¹ is only finite on the open interval.
    if p <= 0.0 || p >= 1.0 || p.is_nan() {
        return Err(LnMixError::domain(format!(
            "ATM-forward probability {p} is outside (0, 1) for alpha = {alpha}"
        )));
    }
    let sigma = 2.0 / sqrt_tau * normal.inverse_cdf(p);
    if !sigma.is_finite() {
        return Err(LnMixError::domain(format!(
            "ATM-forward vol is not finite (p = {p}, tau = {tau})"
        )));
    }
    Ok(sigma)
}

/// Per-strike NPV evaluator for one mixture and one market state.
///
/// Everything that does not depend on the strike (shifted spot, forward
/// factor, discount factor, shift) is computed once in [`NpvKernel::new`].
#[derive(Debug, Clone)]
pub(crate) struct NpvKernel<'a> {
    lambdas: &'a [f64],
    etas: &'a [f64],
    tau: f64,
    sqrt_tau: f64,
    mu: f64,
    sign: f64,
    /// A₀ = S₀(1 − α).
    a0: f64,
    /// A₀ · e^{μτ}, the forward of the unshifted mixture.
    a0_forward: f64,
    /// α · S₀ · e^{μτ}.
    shift: f64,
    discount: f64,
    normal: Normal,
}

impl<'a> NpvKernel<'a> {
    pub(crate) fn new(
        lambdas: &'a [f64],
        etas: &'a [f64],
        tau: f64,
        alpha: f64,
        s0: f64,
        mu: f64,
        option_type: OptionType,
    ) -> error::Result<Self> {
        let a0 = shifted_spot(s0, alpha);
        if a0 <= 0.0 || a0.is_nan() {
            return Err(LnMixError::domain(format!(
                "shifted spot s0*(1 - alpha) = {a0} must be positive (alpha = {alpha})"
            )));
        }
        Ok(Self {
            lambdas,
            etas,
            tau,
            sqrt_tau: tau.sqrt(),
            mu,
            sign: option_type.sign(),
            a0,
            a0_forward: forward_price(a0, mu, tau),
            shift: shift_amount(s0, mu, tau, alpha),
            discount: discount_factor(mu, tau),
            normal: Normal::standard(),
        })
    }

    /// Strike of the unshifted mixture, or a domain error if it is not positive.
    pub(crate) fn transformed(&self, index: usize, strike: f64) -> error::Result<f64> {
        let k = strike - self.shift;
        if k <= 0.0 || k.is_nan() {
            return Err(LnMixError::DomainError {
                message: format!(
                    "transformed strike {strike} - {} = {k} is not positive; ln(a0/k) undefined",
                    self.shift
                ),
                strike: Some(index),
                component: None,
            });
        }
        Ok(k)
    }

    /// NPV of the option struck at `strike` (position `index` in the input).
    ///
    /// ```text
    /// npv = φ · e^{−μτ} · Σᵢ λᵢ · (A₀ e^{μτ} Φ(φ d1ᵢ) − k Φ(φ d2ᵢ))
    /// ```
    pub(crate) fn price(&self, index: usize, strike: f64) -> error::Result<f64> {
        let k = self.transformed(index, strike)?;
        let log_ratio = (self.a0 / k).ln();

        let mut acc = 0.0;
        for (i, (&lambda, &eta)) in self.lambdas.iter().zip(self.etas).enumerate() {
            let std_dev = eta * self.sqrt_tau;
            let d1 = (log_ratio + (self.mu + 0.5 * eta * eta) * self.tau) / std_dev;
            let d2 = d1 - std_dev;
            if d1.is_nan() || d2.is_nan() {
                return Err(LnMixError::DomainError {
                    message: format!("d1/d2 undefined (eta = {eta}, tau = {})", self.tau),
                    strike: Some(index),
                    component: Some(i),
                });
            }
            acc += lambda
                * (self.a0_forward * self.normal.cdf(self.sign * d1)
                    - k * self.normal.cdf(self.sign * d2));
        }

        let value = self.sign * self.discount * acc;
        if !value.is_finite() {
            return Err(LnMixError::DomainError {
                message: format!("NPV is not finite at strike {strike}"),
                strike: Some(index),
                component: None,
            });
        }
        Ok(value)
    }
}
