//! Black pricing and implied volatility extraction.
//!
//! - [`black_price`]: undiscounted Black-76 price on a forward
//! - [`black_scholes_price`]: discounted Black–Scholes price on a spot
//! - [`BlackImpliedVol`]: Black implied volatility from an undiscounted price

pub mod black;

pub use black::{black_price, black_scholes_price, BlackImpliedVol};
