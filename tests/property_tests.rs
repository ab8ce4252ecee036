//! Property-based tests using proptest.
//!
//! These tests verify invariant properties of the mixture pricer across
//! random parameter sets rather than fixed examples.

use lnmix::mixture::{MarketInputs, MixtureSpec};
use lnmix::smile::{MixtureSmile, SmileSection};
use lnmix::OptionType;
use proptest::prelude::*;

/// Strike strip used by every property: all above the largest possible shift.
fn strikes() -> Vec<f64> {
    vec![60.0, 80.0, 95.0, 100.0, 105.0, 120.0, 160.0]
}

/// Two-component weights from a single draw.
fn weights(w: f64) -> Vec<f64> {
    vec![w, 1.0 - w]
}

// --- Property Test 1: put-call parity ---

proptest! {
    /// call − put = S₀ − K·e^{−μτ} for every strike, shift and mixture.
    #[test]
    fn put_call_parity(
        w in 0.05_f64..0.95,
        eta1 in 0.05_f64..0.8,
        eta2 in 0.05_f64..0.8,
        alpha in -0.5_f64..0.5,
        mu in -0.02_f64..0.05,
        tau in 0.05_f64..2.0,
    ) {
        let spec = MixtureSpec::new(weights(w), vec![eta1, eta2], alpha, tau).unwrap();
        let s0 = 100.0;
        let calls = spec.npv(&MarketInputs::new(s0, mu, strikes(), OptionType::Call).unwrap()).unwrap();
        let puts = spec.npv(&MarketInputs::new(s0, mu, strikes(), OptionType::Put).unwrap()).unwrap();

        for ((c, p), k) in calls.iter().zip(&puts).zip(strikes()) {
            let parity = s0 - k * (-mu * tau).exp();
            prop_assert!(
                (c - p - parity).abs() <= 1e-8 * parity.abs().max(1.0),
                "parity violated at K={}: call-put={} vs {}",
                k,
                c - p,
                parity
            );
        }
    }
}

// --- Property Test 2: vega is non-negative in every component ---

proptest! {
    /// Raising one component volatility never lowers a call NPV.
    #[test]
    fn call_npv_non_decreasing_in_each_eta(
        w in 0.05_f64..0.95,
        eta1 in 0.05_f64..0.6,
        eta2 in 0.05_f64..0.6,
        bump in 0.001_f64..0.3,
        alpha in -0.5_f64..0.5,
        tau in 0.1_f64..2.0,
        which in 0_usize..2,
    ) {
        let market = MarketInputs::new(100.0, 0.01, strikes(), OptionType::Call).unwrap();
        let base = MixtureSpec::new(weights(w), vec![eta1, eta2], alpha, tau).unwrap();
        let mut etas = vec![eta1, eta2];
        etas[which] += bump;
        let bumped = MixtureSpec::new(weights(w), etas, alpha, tau).unwrap();

        let v0 = base.npv(&market).unwrap();
        let v1 = bumped.npv(&market).unwrap();
        for ((a, b), k) in v0.iter().zip(&v1).zip(strikes()) {
            prop_assert!(b >= &(a - 1e-12), "call NPV fell at K={}: {} -> {}", k, a, b);
        }
    }
}

// --- Property Test 3: homogeneity of degree one ---

proptest! {
    /// Scaling spot and strikes by c scales every NPV by c.
    #[test]
    fn npv_homogeneous_degree_one(
        w in 0.05_f64..0.95,
        eta1 in 0.05_f64..0.8,
        eta2 in 0.05_f64..0.8,
        alpha in -0.5_f64..0.5,
        c in 0.01_f64..100.0,
        put in proptest::bool::ANY,
    ) {
        let ot = if put { OptionType::Put } else { OptionType::Call };
        let spec = MixtureSpec::new(weights(w), vec![eta1, eta2], alpha, 1.0).unwrap();
        let base = spec.npv(&MarketInputs::new(100.0, 0.02, strikes(), ot).unwrap()).unwrap();
        let scaled_k: Vec<f64> = strikes().iter().map(|k| k * c).collect();
        let scaled = spec.npv(&MarketInputs::new(100.0 * c, 0.02, scaled_k, ot).unwrap()).unwrap();

        for (b, s) in base.iter().zip(&scaled) {
            prop_assert!(
                (s - b * c).abs() <= 1e-9 * c * b.abs().max(1.0),
                "homogeneity violated: {} vs {}",
                s,
                b * c
            );
        }
    }
}

// --- Property Test 4: no-arbitrage price bounds ---

proptest! {
    /// Calls lie between max(S₀ − K e^{−μτ}, 0) and max(S₀, A₀), and
    /// decrease in strike. With a negative shift the terminal asset price
    /// can fall below zero, so a call can be worth more than S₀; the upper
    /// bound is then the shifted spot A₀ = S₀(1 − α).
    #[test]
    fn call_npv_within_bounds_and_decreasing(
        w in 0.05_f64..0.95,
        eta1 in 0.05_f64..0.8,
        eta2 in 0.05_f64..0.8,
        alpha in -0.5_f64..0.5,
        mu in 0.0_f64..0.05,
        tau in 0.05_f64..2.0,
    ) {
        let s0 = 100.0;
        let spec = MixtureSpec::new(weights(w), vec![eta1, eta2], alpha, tau).unwrap();
        let calls = spec.npv(&MarketInputs::new(s0, mu, strikes(), OptionType::Call).unwrap()).unwrap();

        let upper = s0 * (1.0 - alpha).max(1.0);
        for (c, k) in calls.iter().zip(strikes()) {
            let lower = (s0 - k * (-mu * tau).exp()).max(0.0);
            prop_assert!(*c >= lower - 1e-9 && *c <= upper + 1e-9, "call {} at K={} out of bounds", c, k);
        }
        for pair in calls.windows(2) {
            prop_assert!(pair[1] <= pair[0] + 1e-12);
        }
    }
}

// --- Property Test 5: sigma_0 bracketed by component vols ---

proptest! {
    /// Without a shift, σ₀ lies between the smallest and largest ηᵢ.
    #[test]
    fn sigma_0_between_component_vols(
        a in 0.05_f64..1.0,
        b in 0.05_f64..1.0,
        c in 0.05_f64..1.0,
        eta1 in 0.05_f64..0.8,
        eta2 in 0.05_f64..0.8,
        eta3 in 0.05_f64..0.8,
        tau in 0.05_f64..3.0,
    ) {
        let total = a + b + c;
        let lambdas = vec![a / total, b / total, c / total];
        let etas = vec![eta1, eta2, eta3];
        let lo = eta1.min(eta2).min(eta3);
        let hi = eta1.max(eta2).max(eta3);

        let s = lnmix::mixture::sigma_0(&lambdas, &etas, tau, 0.0).unwrap().0;
        prop_assert!(s >= lo - 1e-10 && s <= hi + 1e-10, "sigma_0 {} not in [{}, {}]", s, lo, hi);
    }
}

// --- Property Test 6: smile ATM vol is sigma_0 ---

proptest! {
    /// Black-inverting the mixture price at the forward recovers σ₀.
    #[test]
    fn smile_atm_vol_equals_sigma_0(
        w in 0.05_f64..0.95,
        eta1 in 0.05_f64..0.8,
        eta2 in 0.05_f64..0.8,
        alpha in -0.5_f64..0.5,
        mu in -0.02_f64..0.05,
        tau in 0.1_f64..2.0,
    ) {
        let spec = MixtureSpec::new(weights(w), vec![eta1, eta2], alpha, tau).unwrap();
        let sigma_0 = spec.sigma_0().unwrap().0;
        let smile = MixtureSmile::new(spec, 100.0, mu).unwrap();
        let atm = smile.vol(smile.forward()).unwrap().0;
        prop_assert!((atm - sigma_0).abs() < 1e-7, "atm {} vs sigma_0 {}", atm, sigma_0);
    }
}
