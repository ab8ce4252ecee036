//! Shifted lognormal-mixture pricer.
//!
//! The asset price is modelled as
//!
//! ```text
//! S(t) = α · S₀ · e^{μt} + A(t)
//! ```
//!
//! where `A` follows a lognormal-mixture process with initial value
//! `A₀ = S₀(1 − α)`: its marginal at `τ` is a `λ`-weighted mixture of
//! lognormals with per-unit-time volatilities `ηᵢ`, all with forward
//! `A₀ e^{μτ}`. The shift keeps the forward of `S` at `S₀ e^{μτ}` while
//! skewing the smile.
//!
//! Two primitives are provided, both pure:
//!
//! - [`MixtureSpec::sigma_0`]: ATM-forward Black volatility of the mixture
//! - [`MixtureSpec::npv`]: call/put NPVs for a strip of strikes
//!
//! and their flat-argument counterparts [`sigma_0`] and [`npv`].
//!
//! # References
//! - Brigo, D., Mercurio, F. & Rapisarda, F. "Lognormal-mixture dynamics and
//!   calibration to market volatility smiles" (2002), §4

mod pricing;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::conventions::{forward_price, shift_amount};
use crate::error::{self, LnMixError};
use crate::types::{OptionType, Vol};
use crate::validate::{validate_etas, validate_finite, validate_positive, validate_weights};

pub(crate) use pricing::NpvKernel;

/// Parameters of a shifted lognormal mixture at one maturity.
///
/// # Construction
///
/// ```
/// use lnmix::mixture::MixtureSpec;
///
/// let spec = MixtureSpec::new(vec![0.5, 0.5], vec![0.2, 0.4], 0.0, 1.0).unwrap();
/// assert_eq!(spec.n_components(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MixtureSpecRaw", into = "MixtureSpecRaw")]
pub struct MixtureSpec {
    /// Component weights λᵢ ≥ 0, Σλᵢ = 1.
    lambdas: Vec<f64>,
    /// Component volatilities ηᵢ > 0 per unit time.
    etas: Vec<f64>,
    /// Shift α < 1.
    alpha: f64,
    /// Maturity τ > 0 in years.
    tau: f64,
}

#[derive(Serialize, Deserialize)]
struct MixtureSpecRaw {
    lambdas: Vec<f64>,
    etas: Vec<f64>,
    alpha: f64,
    tau: f64,
}

impl TryFrom<MixtureSpecRaw> for MixtureSpec {
    type Error = LnMixError;
    fn try_from(raw: MixtureSpecRaw) -> Result<Self, Self::Error> {
        Self::new(raw.lambdas, raw.etas, raw.alpha, raw.tau)
    }
}

impl From<MixtureSpec> for MixtureSpecRaw {
    fn from(s: MixtureSpec) -> Self {
        Self {
            lambdas: s.lambdas,
            etas: s.etas,
            alpha: s.alpha,
            tau: s.tau,
        }
    }
}

impl MixtureSpec {
    /// Create a mixture from its weights, component volatilities, shift and maturity.
    ///
    /// # Errors
    /// Returns [`LnMixError::InvalidInput`] if the weights are negative, do not
    /// sum to one within [`WEIGHT_SUM_TOL`](crate::WEIGHT_SUM_TOL), differ in
    /// length from `etas`, or if `tau` is not positive. Returns
    /// [`LnMixError::DomainError`] if some `etas[i]` is zero or `alpha >= 1`.
    pub fn new(lambdas: Vec<f64>, etas: Vec<f64>, alpha: f64, tau: f64) -> error::Result<Self> {
        if lambdas.len() != etas.len() {
            return Err(LnMixError::InvalidInput {
                message: format!(
                    "lambdas and etas must have the same length, got {} and {}",
                    lambdas.len(),
                    etas.len()
                ),
            });
        }
        validate_weights(&lambdas)?;
        validate_etas(&etas)?;
        validate_positive(tau, "tau")?;
        validate_finite(alpha, "alpha")?;
        if alpha >= 1.0 {
            return Err(LnMixError::domain(format!(
                "alpha must be < 1 so that s0*(1 - alpha) > 0, got {alpha}"
            )));
        }
        Ok(Self {
            lambdas,
            etas,
            alpha,
            tau,
        })
    }

    /// Component weights λᵢ.
    pub fn lambdas(&self) -> &[f64] {
        &self.lambdas
    }

    /// Component volatilities ηᵢ.
    pub fn etas(&self) -> &[f64] {
        &self.etas
    }

    /// Shift parameter α.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Maturity τ in years.
    pub fn tau(&self) -> f64 {
        self.tau
    }

    /// Number of lognormal components N.
    pub fn n_components(&self) -> usize {
        self.lambdas.len()
    }

    /// Forward S₀ · e^{μτ}. Independent of the mixture parameters.
    pub fn forward(&self, s0: f64, mu: f64) -> f64 {
        forward_price(s0, mu, self.tau)
    }

    /// Deterministic shift α · S₀ · e^{μτ}. With α > 0 the terminal price
    /// never falls below it, so strikes at or below it are out of domain.
    pub fn shift(&self, s0: f64, mu: f64) -> f64 {
        shift_amount(s0, mu, self.tau, self.alpha)
    }

    /// ATM-forward implied volatility σ₀.
    ///
    /// ```text
    /// σ₀ = 2/√τ · Φ⁻¹((1 − α) · Σᵢ λᵢ Φ(½ ηᵢ √τ) + ½ α)
    /// ```
    ///
    /// For a single component with α = 0 this is η₀.
    ///
    /// # Errors
    /// Returns [`LnMixError::DomainError`] if the quantile argument falls
    /// outside (0, 1).
    pub fn sigma_0(&self) -> error::Result<Vol> {
        let sigma = pricing::atm_forward_vol(&self.lambdas, &self.etas, self.tau, self.alpha)?;

        #[cfg(feature = "logging")]
        tracing::debug!(
            n_components = self.n_components(),
            alpha = self.alpha,
            tau = self.tau,
            sigma_0 = sigma,
            "mixture ATM-forward vol"
        );

        Ok(Vol(sigma))
    }

    /// NPVs of European options on every strike in `market`, in input order.
    ///
    /// Each strike is priced as a λ-weighted sum of Black–Scholes prices, one
    /// per component, on the shifted spot `A₀` and transformed strike
    /// `K − α S₀ e^{μτ}`. The call either prices every strike or fails.
    ///
    /// # Errors
    /// Returns [`LnMixError::DomainError`] naming the first strike whose
    /// transformed value is not positive, or the strike/component where
    /// `d1`/`d2` is undefined.
    pub fn npv(&self, market: &MarketInputs) -> error::Result<Vec<f64>> {
        #[cfg(feature = "logging")]
        tracing::debug!(
            n_strikes = market.strikes.len(),
            n_components = self.n_components(),
            alpha = self.alpha,
            tau = self.tau,
            option_type = ?market.option_type,
            "mixture npv started"
        );

        let kernel = self.kernel(market.s0, market.mu, market.option_type)?;

        // Domain check first so the reported strike is always the first bad one.
        for (j, &strike) in market.strikes.iter().enumerate() {
            kernel.transformed(j, strike)?;
        }

        #[cfg(feature = "parallel")]
        let values = market
            .strikes
            .par_iter()
            .enumerate()
            .map(|(j, &strike)| kernel.price(j, strike))
            .collect::<error::Result<Vec<_>>>()?;
        #[cfg(not(feature = "parallel"))]
        let values = market
            .strikes
            .iter()
            .enumerate()
            .map(|(j, &strike)| kernel.price(j, strike))
            .collect::<error::Result<Vec<_>>>()?;

        #[cfg(feature = "logging")]
        tracing::debug!(n_strikes = values.len(), "mixture npv complete");

        Ok(values)
    }

    pub(crate) fn kernel(
        &self,
        s0: f64,
        mu: f64,
        option_type: OptionType,
    ) -> error::Result<NpvKernel<'_>> {
        NpvKernel::new(
            &self.lambdas,
            &self.etas,
            self.tau,
            self.alpha,
            s0,
            mu,
            option_type,
        )
    }
}

/// Market state for pricing a strip of strikes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MarketInputsRaw", into = "MarketInputsRaw")]
pub struct MarketInputs {
    s0: f64,
    mu: f64,
    strikes: Vec<f64>,
    option_type: OptionType,
}

#[derive(Serialize, Deserialize)]
struct MarketInputsRaw {
    s0: f64,
    mu: f64,
    strikes: Vec<f64>,
    option_type: OptionType,
}

impl TryFrom<MarketInputsRaw> for MarketInputs {
    type Error = LnMixError;
    fn try_from(raw: MarketInputsRaw) -> Result<Self, Self::Error> {
        Self::new(raw.s0, raw.mu, raw.strikes, raw.option_type)
    }
}

impl From<MarketInputs> for MarketInputsRaw {
    fn from(m: MarketInputs) -> Self {
        Self {
            s0: m.s0,
            mu: m.mu,
            strikes: m.strikes,
            option_type: m.option_type,
        }
    }
}

impl MarketInputs {
    /// Create market inputs.
    ///
    /// # Errors
    /// Returns [`LnMixError::InvalidInput`] if `s0` or any strike is not
    /// positive and finite, or if `mu` is not finite.
    pub fn new(
        s0: f64,
        mu: f64,
        strikes: Vec<f64>,
        option_type: OptionType,
    ) -> error::Result<Self> {
        validate_positive(s0, "s0")?;
        validate_finite(mu, "mu")?;
        for (j, &k) in strikes.iter().enumerate() {
            validate_positive(k, &format!("strikes[{j}]"))?;
        }
        Ok(Self {
            s0,
            mu,
            strikes,
            option_type,
        })
    }

    /// Initial asset price S₀.
    pub fn s0(&self) -> f64 {
        self.s0
    }

    /// Drift rate μ, also used for discounting.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Strikes, in the order NPVs are returned.
    pub fn strikes(&self) -> &[f64] {
        &self.strikes
    }

    /// Call or put.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Same market with the other option type.
    pub fn with_option_type(&self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..self.clone()
        }
    }
}

/// ATM-forward implied volatility from raw mixture parameters.
///
/// # Examples
/// ```
/// let sigma = lnmix::mixture::sigma_0(&[1.0], &[0.25], 1.0, 0.0).unwrap();
/// assert!((sigma.0 - 0.25).abs() < 1e-12);
/// ```
///
/// # Errors
/// See [`MixtureSpec::new`] and [`MixtureSpec::sigma_0`].
pub fn sigma_0(lambdas: &[f64], etas: &[f64], tau: f64, alpha: f64) -> error::Result<Vol> {
    MixtureSpec::new(lambdas.to_vec(), etas.to_vec(), alpha, tau)?.sigma_0()
}

/// NPVs from raw arguments, with `flag = +1` for calls and `−1` for puts.
///
/// # Examples
/// ```
/// let npvs = lnmix::mixture::npv(
///     &[90.0, 100.0, 110.0], 100.0, 0.01, &[0.6, 0.4], &[0.15, 0.35], 0.5, 0.1, 1,
/// ).unwrap();
/// assert_eq!(npvs.len(), 3);
/// assert!(npvs[0] > npvs[1] && npvs[1] > npvs[2]);
/// ```
///
/// # Errors
/// Returns [`LnMixError::InvalidInput`] if `flag` is not ±1, plus the errors
/// of [`MixtureSpec::new`], [`MarketInputs::new`] and [`MixtureSpec::npv`].
#[allow(clippy::too_many_arguments)]
pub fn npv(
    strikes: &[f64],
    s0: f64,
    mu: f64,
    lambdas: &[f64],
    etas: &[f64],
    tau: f64,
    alpha: f64,
    flag: i32,
) -> error::Result<Vec<f64>> {
    let option_type = OptionType::try_from(flag)?;
    let spec = MixtureSpec::new(lambdas.to_vec(), etas.to_vec(), alpha, tau)?;
    let market = MarketInputs::new(s0, mu, strikes.to_vec(), option_type)?;
    spec.npv(&market)
}
