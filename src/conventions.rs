//! Market conventions for the shifted mixture.
//!
//! Forward, discounting and the affine shift that maps market strikes onto
//! strikes of the unshifted mixture process.

/// Compute forward price from spot: F = S · exp(μ · τ).
pub fn forward_price(spot: f64, rate: f64, expiry: f64) -> f64 {
    spot * (rate * expiry).exp()
}

/// Discount factor exp(−μ · τ).
pub fn discount_factor(rate: f64, expiry: f64) -> f64 {
    (-rate * expiry).exp()
}

/// Deterministic part of the shifted process at expiry: α · S₀ · exp(μ · τ).
pub fn shift_amount(spot: f64, rate: f64, expiry: f64, alpha: f64) -> f64 {
    alpha * forward_price(spot, rate, expiry)
}

/// Initial value of the unshifted mixture process: A₀ = S₀ · (1 − α).
pub fn shifted_spot(spot: f64, alpha: f64) -> f64 {
    spot * (1.0 - alpha)
}

/// Strike seen by the unshifted mixture: K − α · S₀ · exp(μ · τ).
pub fn transformed_strike(strike: f64, spot: f64, rate: f64, expiry: f64, alpha: f64) -> f64 {
    strike - shift_amount(spot, rate, expiry, alpha)
}
