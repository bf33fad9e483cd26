//! Algorithm selection.
//!
//! [`Algorithm`] and [`WeightedAlgorithm`] name the interchangeable samplers so the
//! choice can be made at runtime (from a string, a config file, a CLI flag) and the
//! result used through the [`Sampler`] / [`WeightedSampler`] traits.
//! [`SamplerConfig`] and [`WeightedSamplerConfig`] bundle the choice with a capacity
//! and an optional seed.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use strum::{Display, EnumIter, EnumString};

use crate::error::Result;
use crate::random::RandomSource;
use crate::sampler::{Sampler, WeightedSampler};
use crate::unweighted::{AlgorithmL, AlgorithmR, AlgorithmX, AlgorithmZ};
use crate::weighted::{AExpJ, Chao, EfraimidisSpirakis, Pareto, SequentialPoisson};

/// Unweighted reservoir algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    /// Waterman's Algorithm R, one draw per item.
    R,
    /// Vitter's Algorithm X.
    X,
    /// Vitter's Algorithm Z.
    Z,
    /// Li's Algorithm L.
    #[default]
    L,
}

impl Algorithm {
    /// Build a boxed sampler of this kind.
    pub fn build<'a, T: 'a, R: RandomSource + 'a>(
        self,
        capacity: usize,
        source: R,
    ) -> Result<Box<dyn Sampler<T> + 'a>> {
        Ok(match self {
            Self::R => Box::new(AlgorithmR::new(capacity, source)?),
            Self::X => Box::new(AlgorithmX::new(capacity, source)?),
            Self::Z => Box::new(AlgorithmZ::new(capacity, source)?),
            Self::L => Box::new(AlgorithmL::new(capacity, source)?),
        })
    }

    /// Sample `capacity` items from `items` in one call.
    pub fn sample_iter<T, I, R>(self, items: I, capacity: usize, source: R) -> Result<Vec<T>>
    where
        I: IntoIterator<Item = T>,
        R: RandomSource,
    {
        match self {
            Self::R => feed(AlgorithmR::new(capacity, source)?, items, AlgorithmR::into_sample),
            Self::X => feed(AlgorithmX::new(capacity, source)?, items, AlgorithmX::into_sample),
            Self::Z => feed(AlgorithmZ::new(capacity, source)?, items, AlgorithmZ::into_sample),
            Self::L => feed(AlgorithmL::new(capacity, source)?, items, AlgorithmL::into_sample),
        }
    }
}

fn feed<T, S, I>(mut sampler: S, items: I, finish: fn(S) -> Vec<T>) -> Result<Vec<T>>
where
    S: Sampler<T>,
    I: IntoIterator<Item = T>,
{
    sampler.process_all(items)?;
    Ok(finish(sampler))
}

/// Weighted reservoir algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum WeightedAlgorithm {
    /// Efraimidis–Spirakis A-Res.
    #[default]
    #[strum(to_string = "a-res", serialize = "efraimidis")]
    ARes,
    /// A-Res with exponential jumps.
    #[strum(to_string = "a-expj", serialize = "expj")]
    #[cfg_attr(feature = "serde", serde(rename = "a-expj"))]
    AExpJ,
    /// Chao's method.
    #[strum(to_string = "chao")]
    Chao,
    /// Ohlsson's sequential Poisson sampling.
    #[strum(to_string = "sequential-poisson", serialize = "poisson")]
    SequentialPoisson,
    /// Rosén's Pareto sampling (weights in `(0, 1)`).
    #[strum(to_string = "pareto")]
    Pareto,
}

impl WeightedAlgorithm {
    /// Build a boxed weighted sampler of this kind.
    pub fn build<'a, T: 'a, R: RandomSource + 'a>(
        self,
        capacity: usize,
        source: R,
    ) -> Result<Box<dyn WeightedSampler<T> + 'a>> {
        Ok(match self {
            Self::ARes => Box::new(EfraimidisSpirakis::new(capacity, source)?),
            Self::AExpJ => Box::new(AExpJ::new(capacity, source)?),
            Self::Chao => Box::new(Chao::new(capacity, source)?),
            Self::SequentialPoisson => Box::new(SequentialPoisson::new(capacity, source)?),
            Self::Pareto => Box::new(Pareto::new(capacity, source)?),
        })
    }

    /// Sample `capacity` items from `(item, weight)` pairs in one call.
    pub fn sample_iter<T, I, R>(self, items: I, capacity: usize, source: R) -> Result<Vec<T>>
    where
        I: IntoIterator<Item = (T, f64)>,
        R: RandomSource,
    {
        match self {
            Self::ARes => feed_weighted(
                EfraimidisSpirakis::new(capacity, source)?,
                items,
                EfraimidisSpirakis::into_sample,
            ),
            Self::AExpJ => feed_weighted(AExpJ::new(capacity, source)?, items, AExpJ::into_sample),
            Self::Chao => feed_weighted(Chao::new(capacity, source)?, items, Chao::into_sample),
            Self::SequentialPoisson => feed_weighted(
                SequentialPoisson::new(capacity, source)?,
                items,
                SequentialPoisson::into_sample,
            ),
            Self::Pareto => feed_weighted(Pareto::new(capacity, source)?, items, Pareto::into_sample),
        }
    }
}

fn feed_weighted<T, S, I>(mut sampler: S, items: I, finish: fn(S) -> Vec<T>) -> Result<Vec<T>>
where
    S: WeightedSampler<T>,
    I: IntoIterator<Item = (T, f64)>,
{
    sampler.process_all(items)?;
    Ok(finish(sampler))
}

/// Uniform sample of `capacity` items from `items` using [`Algorithm::L`].
///
/// Convenience for one-shot sampling with the thread-local generator.
pub fn sample_iter<T, I>(items: I, capacity: usize) -> Result<Vec<T>>
where
    I: IntoIterator<Item = T>,
{
    Algorithm::default().sample_iter(items, capacity, rand::rng())
}

/// Weighted sample of `capacity` items from `(item, weight)` pairs using A-Res.
pub fn sample_weighted_iter<T, I>(items: I, capacity: usize) -> Result<Vec<T>>
where
    I: IntoIterator<Item = (T, f64)>,
{
    WeightedAlgorithm::default().sample_iter(items, capacity, rand::rng())
}

fn seeded_or_thread_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(s) => Box::new(StdRng::seed_from_u64(s)),
        None => Box::new(rand::rng()),
    }
}

/// Capacity, algorithm and seed for an unweighted sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplerConfig {
    /// Maximum sample size `k`.
    pub capacity: usize,
    /// Sampling algorithm, [`Algorithm::L`] unless set.
    #[cfg_attr(feature = "serde", serde(default))]
    pub algorithm: Algorithm,
    /// Seed for a `StdRng`; without one the thread-local generator is used.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
}

impl SamplerConfig {
    /// Config for `capacity` items with the default algorithm and no seed.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            algorithm: Algorithm::default(),
            seed: None,
        }
    }

    /// Use `algorithm` instead of the default.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Seed the generator for reproducible samples.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the configured sampler.
    pub fn build<T: 'static>(&self) -> Result<Box<dyn Sampler<T>>> {
        self.algorithm
            .build(self.capacity, seeded_or_thread_rng(self.seed))
    }
}

/// Capacity, algorithm and seed for a weighted sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedSamplerConfig {
    /// Maximum sample size `k`.
    pub capacity: usize,
    /// Sampling algorithm, [`WeightedAlgorithm::ARes`] unless set.
    #[cfg_attr(feature = "serde", serde(default))]
    pub algorithm: WeightedAlgorithm,
    /// Seed for a `StdRng`; without one the thread-local generator is used.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
}

impl WeightedSamplerConfig {
    /// Config for `capacity` items with A-Res and no seed.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            algorithm: WeightedAlgorithm::default(),
            seed: None,
        }
    }

    /// Use `algorithm` instead of the default.
    pub fn with_algorithm(mut self, algorithm: WeightedAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Seed the generator for reproducible samples.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the configured sampler.
    pub fn build<T: 'static>(&self) -> Result<Box<dyn WeightedSampler<T>>> {
        self.algorithm
            .build(self.capacity, seeded_or_thread_rng(self.seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rand_chacha::ChaCha8Rng;
    use strum::IntoEnumIterator;

    #[test]
    fn names_round_trip() {
        for a in Algorithm::iter() {
            assert_eq!(a.to_string().parse::<Algorithm>().unwrap(), a);
        }
        for a in WeightedAlgorithm::iter() {
            assert_eq!(a.to_string().parse::<WeightedAlgorithm>().unwrap(), a);
        }
        assert_eq!("L".parse::<Algorithm>().unwrap(), Algorithm::L);
        assert_eq!(
            "efraimidis".parse::<WeightedAlgorithm>().unwrap(),
            WeightedAlgorithm::ARes
        );
        assert!("y".parse::<Algorithm>().is_err());
    }

    #[test]
    fn every_algorithm_builds_and_fills() {
        for a in Algorithm::iter() {
            let mut s = a.build(3, ChaCha8Rng::seed_from_u64(1)).unwrap();
            s.process_all(0..100).unwrap();
            assert_eq!(s.sample().len(), 3, "{a}");
            assert_eq!(s.count(), 100, "{a}");
        }
        for a in WeightedAlgorithm::iter() {
            let mut s = a.build(3, ChaCha8Rng::seed_from_u64(1)).unwrap();
            s.process_all((0..100).map(|i| (i, 0.5))).unwrap();
            assert_eq!(s.sample().len(), 3, "{a}");
            assert_eq!(s.capacity(), 3, "{a}");
        }
    }

    #[test]
    fn build_rejects_zero_capacity() {
        for a in Algorithm::iter() {
            let err = a.build::<u8, _>(0, ChaCha8Rng::seed_from_u64(1)).err();
            assert!(matches!(err, Some(Error::InvalidCapacity { .. })), "{a}");
        }
    }

    #[test]
    fn seeded_config_is_reproducible() {
        let config = SamplerConfig::new(4).with_algorithm(Algorithm::Z).with_seed(42);
        let run = || {
            let mut s = config.build::<u32>().unwrap();
            s.process_all(0..10_000).unwrap();
            s.sample().to_vec()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn sample_iter_returns_the_reservoir() {
        let out = Algorithm::X
            .sample_iter(0..1_000, 7, ChaCha8Rng::seed_from_u64(3))
            .unwrap();
        assert_eq!(out.len(), 7);
        let out = WeightedAlgorithm::Chao
            .sample_iter((0..1_000).map(|i| (i, 1.0)), 7, ChaCha8Rng::seed_from_u64(3))
            .unwrap();
        assert_eq!(out.len(), 7);
    }

    #[test]
    fn one_shot_helpers() {
        let out = sample_iter(0..50, 5).unwrap();
        assert_eq!(out.len(), 5);
        assert!(out.iter().all(|&i| i < 50));
        let out = sample_weighted_iter(["a", "b"].into_iter().map(|s| (s, 2.0)), 5).unwrap();
        assert_eq!(out.len(), 2);
        assert!(sample_iter(0..3, 0).is_err());
    }

    #[test]
    fn unseeded_config_uses_thread_rng() {
        let mut s = WeightedSamplerConfig::new(2)
            .with_algorithm(WeightedAlgorithm::AExpJ)
            .build::<&str>()
            .unwrap();
        s.process("a", 1.0).unwrap();
        s.process("b", 2.0).unwrap();
        s.process("c", 3.0).unwrap();
        assert_eq!(s.sample().len(), 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_deserializes_with_defaults() {
        let c: SamplerConfig = serde_json::from_str(r#"{"capacity": 8}"#).unwrap();
        assert_eq!(c, SamplerConfig::new(8));
        let c: WeightedSamplerConfig =
            serde_json::from_str(r#"{"capacity": 2, "algorithm": "sequential-poisson", "seed": 5}"#)
                .unwrap();
        assert_eq!(c.algorithm, WeightedAlgorithm::SequentialPoisson);
        assert_eq!(c.seed, Some(5));
    }
}
