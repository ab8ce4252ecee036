//! # lnmix
//!
//! European option pricing under the shifted lognormal-mixture model of
//! Brigo, Mercurio and Rapisarda.
//!
//! The terminal price is an affine shift of a λ-weighted mixture of lognormals
//! whose drift keeps the forward at `S₀ e^{μτ}`. Prices are closed-form
//! weighted sums of Black–Scholes terms.
//!
//! ## Architecture
//!
//! - **`mixture`**: [`MixtureSpec`], [`MarketInputs`], ATM-forward vol `sigma_0` and `npv`
//! - **`implied`**: Black pricing and Black implied volatility extraction
//! - **`smile`**: the mixture as a [`SmileSection`] with implied vols and density
//! - **`conventions`**: forward, discounting and shift helpers
//!
//! ## Design
//!
//! - **Pure functions.** Pricing carries no state between calls; a
//!   [`MixtureSpec`] is validated once and then only read.
//! - **No panics.** Every fallible operation returns [`Result`]. Out-of-domain
//!   intermediates are reported as [`LnMixError::DomainError`] with the strike
//!   and component that triggered them, never as silent NaN.
//! - **Thread-safe.** All public types are `Send + Sync`. The `parallel`
//!   feature prices strikes with rayon.
//! - **Serializable.** Parameter types implement Serde `Serialize` /
//!   `Deserialize`, re-validating on deserialization.
//!
//! ## Example
//!
//! ```
//! use lnmix::mixture::{MarketInputs, MixtureSpec};
//! use lnmix::OptionType;
//!
//! let spec = MixtureSpec::new(vec![0.5, 0.5], vec![0.2, 0.4], 0.0, 1.0)?;
//! let market = MarketInputs::new(100.0, 0.0, vec![90.0, 100.0, 110.0], OptionType::Call)?;
//!
//! let sigma_0 = spec.sigma_0()?;
//! let npvs = spec.npv(&market)?;
//! assert!(sigma_0.0 > 0.2 && sigma_0.0 < 0.4);
//! assert_eq!(npvs.len(), 3);
//! # Ok::<(), lnmix::LnMixError>(())
//! ```

pub mod conventions;
pub mod error;
pub mod implied;
pub mod mixture;
pub mod smile;
pub mod types;
mod validate;

#[doc(inline)]
pub use error::{LnMixError, Result};
#[doc(inline)]
pub use mixture::{MarketInputs, MixtureSpec};
#[doc(inline)]
pub use smile::SmileSection;
#[doc(inline)]
pub use types::{OptionType, Variance, Vol};
pub use validate::WEIGHT_SUM_TOL;
