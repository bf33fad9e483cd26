//! Weighted candidate selection: the same weights through every weighted sampler.
//!
//! All of them favour heavy items, but they induce different distributions for \(k>1\).
//! A-Res and A-ExpJ agree in distribution; A-ExpJ gets there with far fewer draws.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skipsample::{AExpJ, CountingSource, EfraimidisSpirakis, WeightedAlgorithm, WeightedSampler};
use strum::IntoEnumIterator;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Shaped like what you get from PPR: many small weights, few big ones.
    // All below 1 so Pareto accepts them as target inclusion probabilities.
    let weights: Vec<f64> = (0..50)
        .map(|i| 0.9 / (1.0 + (i as f64)).powf(1.3))
        .collect();

    let k = 10usize;

    println!("weights[0..10]:");
    for (i, w) in weights.iter().take(10).enumerate() {
        println!("  i={i:2}  w={w:.6}");
    }
    println!();

    for algorithm in WeightedAlgorithm::iter() {
        let mut sampler = algorithm.build(k, ChaCha8Rng::seed_from_u64(7))?;
        sampler.process_all(weights.iter().copied().enumerate())?;
        let mut pick: Vec<usize> = sampler.sample().to_vec();
        pick.sort_unstable();
        println!("{algorithm:>20}: {pick:?}");
    }

    // Draw counts on a long stream.
    println!();
    let n = 100_000usize;
    let stream = || (0..n).map(|i| (i, weights[i % weights.len()]));

    let mut a_res = EfraimidisSpirakis::new(k, CountingSource::new(ChaCha8Rng::seed_from_u64(7)))?;
    a_res.process_all(stream())?;
    println!("{:>20}: {} draws for n={n}", "a-res", a_res.source().draws());

    let mut a_expj = AExpJ::new(k, CountingSource::new(ChaCha8Rng::seed_from_u64(7)))?;
    a_expj.process_all(stream())?;
    println!("{:>20}: {} draws for n={n}", "a-expj", a_expj.source().draws());

    Ok(())
}
