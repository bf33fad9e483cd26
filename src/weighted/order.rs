//! Order sampling: every item gets a random key from its weight, the `k` best keys
//! are kept in a [`KeyHeap`].
//!
//! Keys are stored on a log scale. That is a monotone transform of the textbook keys,
//! so the retained set is identical, and it keeps keys like `u^(1/w)` from
//! underflowing to zero for small weights.

use std::marker::PhantomData;

use super::check_positive;
use crate::error::{Error, Result};
use crate::heap::KeyHeap;
use crate::random::{open01, RandomSource};
use crate::sampler::WeightedSampler;

/// Key formula of an order-sampling design. Larger keys are kept.
pub trait OrderKey {
    /// Reject weights the formula cannot use.
    fn check_weight(weight: f64) -> Result<f64>;

    /// Ranking key for an accepted `weight` and a uniform draw `u` in `(0, 1)`.
    fn key(weight: f64, u: f64) -> f64;
}

/// Efraimidis–Spirakis A-Res: key `u^(1/w)`, stored as `ln(u) / w`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ARes;

impl OrderKey for ARes {
    fn check_weight(weight: f64) -> Result<f64> {
        check_positive(weight)
    }

    #[inline]
    fn key(weight: f64, u: f64) -> f64 {
        u.ln() / weight
    }
}

/// Ohlsson's sequential Poisson sampling: keeps the `k` smallest `u / w`,
/// ranked here as `ln(w) - ln(u)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoissonKey;

impl OrderKey for PoissonKey {
    fn check_weight(weight: f64) -> Result<f64> {
        check_positive(weight)
    }

    #[inline]
    fn key(weight: f64, u: f64) -> f64 {
        weight.ln() - u.ln()
    }
}

/// Rosén's Pareto sampling: keeps the `k` smallest `(u / (1 - u)) · ((1 - w) / w)`.
///
/// Weights are target inclusion probabilities and must lie in `(0, 1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParetoKey;

impl OrderKey for ParetoKey {
    fn check_weight(weight: f64) -> Result<f64> {
        if weight > 0.0 && weight < 1.0 {
            Ok(weight)
        } else {
            Err(Error::InvalidWeight {
                weight,
                expected: "in (0, 1)",
            })
        }
    }

    #[inline]
    fn key(weight: f64, u: f64) -> f64 {
        // ln of the reciprocal Pareto ratio: (1 - u) w / (u (1 - w)).
        (-u).ln_1p() + weight.ln() - u.ln() - (-weight).ln_1p()
    }
}

/// Weighted reservoir keeping the items with the `k` largest keys under `K`.
///
/// See [`EfraimidisSpirakis`](super::EfraimidisSpirakis),
/// [`SequentialPoisson`](super::SequentialPoisson) and [`Pareto`](super::Pareto).
#[derive(Debug, Clone)]
pub struct OrderSampler<T, K, R> {
    heap: KeyHeap<T>,
    seen: u64,
    source: R,
    key: PhantomData<K>,
}

impl<T, K: OrderKey, R: RandomSource> OrderSampler<T, K, R> {
    /// Sampler keeping at most `capacity` items, drawing from `source`.
    pub fn new(capacity: usize, source: R) -> Result<Self> {
        Ok(Self {
            heap: KeyHeap::new(capacity)?,
            seen: 0,
            source,
            key: PhantomData,
        })
    }

    /// Log-scale keys, aligned with [`sample`](WeightedSampler::sample).
    pub fn keys(&self) -> &[f64] {
        self.heap.keys()
    }

    /// Smallest retained key: the bar a new item has to clear once the reservoir is full.
    pub fn threshold(&self) -> Option<f64> {
        self.heap.min_key()
    }

    /// The random source, e.g. to read a draw counter.
    pub fn source(&self) -> &R {
        &self.source
    }

    /// Consume the sampler and return the retained items.
    pub fn into_sample(self) -> Vec<T> {
        self.heap.into_items()
    }
}

impl<T, K: OrderKey, R: RandomSource> WeightedSampler<T> for OrderSampler<T, K, R> {
    fn process(&mut self, item: T, weight: f64) -> Result<bool> {
        let weight = K::check_weight(weight)?;
        let seen = self
            .seen
            .checked_add(1)
            .ok_or(Error::ArithmeticOverflow("stream length"))?;
        let u = open01(&mut self.source)?;
        let key = K::key(weight, u);
        self.seen = seen;
        Ok(self.heap.offer(key, item))
    }

    fn sample(&self) -> &[T] {
        self.heap.items()
    }

    fn count(&self) -> u64 {
        self.seen
    }

    fn capacity(&self) -> usize {
        self.heap.capacity()
    }
}
