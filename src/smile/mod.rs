//! Volatility smiles generated by the mixture model.
//!
//! A smile represents how implied volatility varies with strike at a fixed
//! expiry. [`MixtureSmile`] exposes a [`MixtureSpec`](crate::mixture::MixtureSpec)
//! through the [`SmileSection`] trait: Black implied vols of the mixture
//! prices and the closed-form risk-neutral density.

pub mod mixture;

pub use mixture::MixtureSmile;

use crate::error;
use crate::types::{Variance, Vol};

/// A single-tenor volatility smile.
///
/// # Thread Safety
/// All implementations must be `Send + Sync` for use in concurrent pricing.
///
/// # Error Handling
/// Methods return `Result` so implementations can report numerical failures
/// (e.g., a strike outside the model's domain) rather than panicking.
pub trait SmileSection: Send + Sync {
    /// Implied Black volatility σ at the given strike.
    fn vol(&self, strike: f64) -> error::Result<Vol>;

    /// Total Black variance σ²T at the given strike.
    ///
    /// Default implementation derives from [`vol`](SmileSection::vol):
    /// `variance(K) = vol(K)² × expiry`.
    fn variance(&self, strike: f64) -> error::Result<Variance> {
        let v = self.vol(strike)?;
        Ok(Variance(v.0 * v.0 * self.expiry()))
    }

    /// Risk-neutral probability density q(K).
    fn density(&self, strike: f64) -> error::Result<f64>;

    /// Forward price F at this tenor.
    fn forward(&self) -> f64;

    /// Time to expiry T in years.
    fn expiry(&self) -> f64;
}
