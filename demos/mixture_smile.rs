//! Price a strike strip under a shifted lognormal mixture and read off its smile.
//!
//! Shows how to:
//!   - Build a mixture and compute its ATM-forward vol
//!   - Price calls and puts on a strip of strikes
//!   - Check put-call parity
//!   - Convert the prices into a Black implied-vol smile
//!
//! Run with: `cargo run --example mixture_smile`

use lnmix::mixture::{MarketInputs, MixtureSpec};
use lnmix::smile::{MixtureSmile, SmileSection};
use lnmix::OptionType;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let s0 = 100.0;
    let mu = 0.02;
    let tau = 1.0;
    let strikes: Vec<f64> = (0..9).map(|i| 70.0 + 7.5 * i as f64).collect();

    // ---------------------------------------------------------------
    // 1. Mixture and ATM-forward vol
    // ---------------------------------------------------------------

    let spec = MixtureSpec::new(vec![0.3, 0.5, 0.2], vec![0.12, 0.22, 0.45], 0.25, tau)?;
    println!("Shifted lognormal mixture");
    println!("  lambdas: {:?}", spec.lambdas());
    println!("  etas:    {:?}", spec.etas());
    println!("  alpha:   {}", spec.alpha());
    println!("  forward: {:.4}", spec.forward(s0, mu));
    println!("  shift:   {:.4}", spec.shift(s0, mu));
    println!("  sigma_0: {:.4}%", spec.sigma_0()?.0 * 100.0);

    // ---------------------------------------------------------------
    // 2. Call and put NPVs
    // ---------------------------------------------------------------

    let calls = spec.npv(&MarketInputs::new(s0, mu, strikes.clone(), OptionType::Call)?)?;
    let puts = spec.npv(&MarketInputs::new(s0, mu, strikes.clone(), OptionType::Put)?)?;

    // ---------------------------------------------------------------
    // 3. Smile
    // ---------------------------------------------------------------

    let smile = MixtureSmile::new(spec, s0, mu)?;
    println!("\n  {:>8} {:>10} {:>10} {:>12} {:>8}", "strike", "call", "put", "parity err", "vol %");
    for ((&k, c), p) in strikes.iter().zip(&calls).zip(&puts) {
        let parity_err = (c - p) - (s0 - k * (-mu * tau).exp());
        let vol = smile.vol(k)?;
        println!(
            "  {k:>8.2} {c:>10.4} {p:>10.4} {parity_err:>12.2e} {:>8.3}",
            vol.0 * 100.0
        );
    }

    Ok(())
}
