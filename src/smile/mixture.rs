//! The shifted lognormal mixture viewed as a volatility smile.
//!
//! Implied vols are obtained by pricing the out-of-the-money option under the
//! mixture and inverting the Black formula on the same forward. The density
//! is available in closed form: with `x = K − α S₀ e^{μτ}`,
//!
//! ```text
//! q(K) = Σᵢ λᵢ · LN(x; ln(A₀ e^{μτ}) − ½ηᵢ²τ, ηᵢ√τ)
//! ```
//!
//! and zero for `x ≤ 0`.

use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, LogNormal};

use crate::conventions::{discount_factor, forward_price, shifted_spot, transformed_strike};
use crate::error::{self, LnMixError};
use crate::implied::BlackImpliedVol;
use crate::mixture::MixtureSpec;
use crate::smile::SmileSection;
use crate::types::{OptionType, Vol};
use crate::validate::{validate_finite, validate_positive};

/// Mixture smile at the maturity of its [`MixtureSpec`].
///
/// # Construction
///
/// ```
/// use lnmix::mixture::MixtureSpec;
/// use lnmix::smile::{MixtureSmile, SmileSection};
///
/// let spec = MixtureSpec::new(vec![0.5, 0.5], vec![0.15, 0.45], 0.2, 1.0).unwrap();
/// let smile = MixtureSmile::new(spec, 100.0, 0.0).unwrap();
/// let atm = smile.vol(smile.forward()).unwrap();
/// assert!((atm.0 - smile.atm_vol().unwrap().0).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "MixtureSmileRaw", into = "MixtureSmileRaw")]
pub struct MixtureSmile {
    spec: MixtureSpec,
    spot: f64,
    rate: f64,
}

#[derive(Serialize, Deserialize)]
struct MixtureSmileRaw {
    spec: MixtureSpec,
    spot: f64,
    rate: f64,
}

impl TryFrom<MixtureSmileRaw> for MixtureSmile {
    type Error = LnMixError;
    fn try_from(raw: MixtureSmileRaw) -> Result<Self, Self::Error> {
        Self::new(raw.spec, raw.spot, raw.rate)
    }
}

impl From<MixtureSmile> for MixtureSmileRaw {
    fn from(s: MixtureSmile) -> Self {
        Self {
            spec: s.spec,
            spot: s.spot,
            rate: s.rate,
        }
    }
}

impl MixtureSmile {
    /// Create a smile from a mixture, spot `S₀` and drift `μ`.
    ///
    /// # Errors
    /// Returns [`LnMixError::InvalidInput`] if `spot` is not positive or
    /// `rate` is not finite.
    pub fn new(spec: MixtureSpec, spot: f64, rate: f64) -> error::Result<Self> {
        validate_positive(spot, "spot")?;
        validate_finite(rate, "rate")?;
        Ok(Self { spec, spot, rate })
    }

    /// Underlying mixture parameters.
    pub fn spec(&self) -> &MixtureSpec {
        &self.spec
    }

    /// Spot S₀.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Drift μ.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// ATM-forward vol σ₀ of the mixture (closed form).
    ///
    /// # Errors
    /// See [`MixtureSpec::sigma_0`].
    pub fn atm_vol(&self) -> error::Result<Vol> {
        self.spec.sigma_0()
    }

    /// Discounted mixture price at a single strike.
    ///
    /// # Errors
    /// Returns [`LnMixError::DomainError`] if the strike is at or below the shift.
    pub fn price(&self, strike: f64, option_type: OptionType) -> error::Result<f64> {
        validate_positive(strike, "strike")?;
        self.spec
            .kernel(self.spot, self.rate, option_type)?
            .price(0, strike)
    }

    /// Forward of the unshifted component process, A₀ e^{μτ}.
    fn shifted_forward(&self) -> f64 {
        forward_price(
            shifted_spot(self.spot, self.spec.alpha()),
            self.rate,
            self.spec.tau(),
        )
    }
}

impl SmileSection for MixtureSmile {
    /// Black implied vol of the mixture price.
    ///
    /// Uses the put below the forward and the call at or above it so that the
    /// inverted price is never dominated by intrinsic value.
    fn vol(&self, strike: f64) -> error::Result<Vol> {
        let forward = self.forward();
        let option_type = if strike >= forward {
            OptionType::Call
        } else {
            OptionType::Put
        };
        let npv = self.price(strike, option_type)?;
        let undiscounted = npv / discount_factor(self.rate, self.spec.tau());
        BlackImpliedVol::compute(undiscounted, forward, strike, self.spec.tau(), option_type)
    }

    fn density(&self, strike: f64) -> error::Result<f64> {
        validate_positive(strike, "strike")?;
        let tau = self.spec.tau();
        let x = transformed_strike(strike, self.spot, self.rate, tau, self.spec.alpha());
        if x <= 0.0 {
            return Ok(0.0);
        }
        let log_forward = self.shifted_forward().ln();

        let components = self.spec.lambdas().iter().zip(self.spec.etas());

        let mut q = 0.0;
        for (i, (&lambda, &eta)) in components.enumerate() {
            let component = LogNormal::new(log_forward - 0.5 * eta * eta * tau, eta * tau.sqrt())
                .map_err(|e| LnMixError::DomainError {
                    message: format!("lognormal component density undefined: {e}"),
                    strike: None,
                    component: Some(i),
                })?;
            q += lambda * component.pdf(x);
        }
        Ok(q)
    }

    fn forward(&self) -> f64 {
        self.spec.forward(self.spot, self.rate)
    }

    fn expiry(&self) -> f64 {
        self.spec.tau()
    }
}
