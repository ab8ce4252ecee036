//! Core domain types.
//!
//! **Outputs use newtypes**: [`Vol`] and [`Variance`] wrap return values so
//! callers can't accidentally mix a volatility with a variance.
//!
//! **Inputs use bare `f64`**: strikes, spot and rates are passed as raw floats
//! and validated where the model is built.
//!
//! # Why no `Eq` or `Ord`?
//! These types wrap `f64`, which does not implement `Eq` or `Ord` because `NaN`
//! breaks total ordering. We derive `PartialEq` and `PartialOrd` only.

use serde::{Deserialize, Serialize};

use crate::error::LnMixError;

/// Implied volatility `σ`, measured as annualized standard deviation.
///
/// # Examples
/// ```
/// use lnmix::types::Vol;
/// let vol = Vol(0.20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Vol(pub f64);

/// Total variance `σ²T`.
///
/// # Examples
/// ```
/// use lnmix::types::Variance;
/// let var = Variance(0.04); // 20% vol over one year
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Variance(pub f64);

/// Option type: call or put.
///
/// The pricing formulas use the integer flag convention `+1` for calls and
/// `−1` for puts; [`OptionType::sign`] and `TryFrom<i32>` convert between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Right to buy at strike price.
    Call,
    /// Right to sell at strike price.
    Put,
}

impl OptionType {
    /// `+1.0` for a call, `−1.0` for a put.
    pub fn sign(self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Integer flag: `+1` for a call, `−1` for a put.
    pub fn flag(self) -> i32 {
        match self {
            OptionType::Call => 1,
            OptionType::Put => -1,
        }
    }
}

impl TryFrom<i32> for OptionType {
    type Error = LnMixError;

    /// # Examples
    /// ```
    /// use lnmix::OptionType;
    /// assert_eq!(OptionType::try_from(-1).unwrap(), OptionType::Put);
    /// assert!(OptionType::try_from(0).is_err());
    /// ```
    fn try_from(flag: i32) -> Result<Self, Self::Error> {
        match flag {
            1 => Ok(OptionType::Call),
            -1 => Ok(OptionType::Put),
            other => Err(LnMixError::InvalidInput {
                message: format!("flag must be +1 (call) or -1 (put), got {other}"),
            }),
        }
    }
}
