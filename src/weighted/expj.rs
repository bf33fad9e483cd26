//! A-ExpJ: A-Res with exponential jumps (Efraimidis & Spirakis, 2006).
//!
//! With `T_w` the smallest retained key, the amount of weight that passes before the
//! next item beats `T_w` is `X_w = ln(r) / ln(T_w)`. Items inside the jump only
//! subtract their weight; the landing item draws its key from `(T_w^w, 1)` so that it
//! is guaranteed to enter. Same retained-set distribution as A-Res, with
//! O(k log(n/k)) draws instead of one per item.

use log::trace;

use super::check_positive;
use crate::error::{Error, Result};
use crate::heap::KeyHeap;
use crate::random::{open01, RandomSource};
use crate::sampler::WeightedSampler;

/// Weighted reservoir sampler using A-ExpJ.
#[derive(Debug, Clone)]
pub struct AExpJ<T, R> {
    heap: KeyHeap<T>,
    seen: u64,
    total_weight: f64,
    /// Weight still to pass before the next replacement; `None` until drawn.
    jump: Option<f64>,
    source: R,
}

impl<T, R: RandomSource> AExpJ<T, R> {
    /// Sampler keeping at most `capacity` items, drawing from `source`.
    pub fn new(capacity: usize, source: R) -> Result<Self> {
        Ok(Self {
            heap: KeyHeap::new(capacity)?,
            seen: 0,
            total_weight: 0.0,
            jump: None,
            source,
        })
    }

    /// Sum of all weights processed so far.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Log-scale keys (`ln(u) / w`), aligned with [`sample`](WeightedSampler::sample).
    pub fn keys(&self) -> &[f64] {
        self.heap.keys()
    }

    /// Weight still to pass before the next replacement, if already drawn.
    pub fn pending_jump(&self) -> Option<f64> {
        self.jump
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

impl<T, R: RandomSource> WeightedSampler<T> for AExpJ<T, R> {
    fn process(&mut self, item: T, weight: f64) -> Result<bool> {
        let weight = check_positive(weight)?;
        let seen = self
            .seen
            .checked_add(1)
            .ok_or(Error::ArithmeticOverflow("stream length"))?;
        let total_weight = self.total_weight + weight;
        if !total_weight.is_finite() {
            return Err(Error::ArithmeticOverflow("cumulative weight"));
        }

        let Some(log_threshold) = self.heap.min_key().filter(|_| self.heap.is_full()) else {
            let key = open01(&mut self.source)?.ln() / weight;
            self.heap.offer(key, item);
            self.seen = seen;
            self.total_weight = total_weight;
            if self.heap.is_full() {
                trace!("A-ExpJ: reservoir of {} filled", self.heap.capacity());
            }
            return Ok(true);
        };

        let jump = match self.jump {
            Some(jump) => jump,
            None => open01(&mut self.source)?.ln() / log_threshold,
        };
        let remaining = jump - weight;
        if remaining > 0.0 {
            self.jump = Some(remaining);
            self.seen = seen;
            self.total_weight = total_weight;
            return Ok(false);
        }

        // Key uniform on (T_w^w, 1), i.e. strictly above the current threshold.
        let floor = (weight * log_threshold).exp();
        let r = floor + (1.0 - floor) * open01(&mut self.source)?;
        let key = r.ln() / weight;
        self.heap.replace_min(key, item);
        self.jump = None;
        self.seen = seen;
        self.total_weight = total_weight;
        Ok(true)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{CountingSource, SequenceSource};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn jump_passes_over_light_items_without_draws() {
        // k = 1. Fill: key ln(0.5) / 1. Jump: ln(0.25) / ln(0.5) = 2 units of weight.
        let source = SequenceSource::new([0.5, 0.25, 0.5]);
        let mut s = AExpJ::new(1, source).unwrap();
        assert!(s.process("a", 1.0).unwrap());
        assert!(!s.process("b", 0.5).unwrap());
        assert!(!s.process("c", 0.5).unwrap());
        assert!((s.pending_jump().unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(s.source().drawn(), 2);
        // Cumulative weight reaches the jump on "d": it enters with the last draw.
        assert!(s.process("d", 1.5).unwrap());
        assert_eq!(s.sample(), &["d"]);
        assert_eq!(s.pending_jump(), None);
        assert_eq!(s.count(), 4);
        assert!((s.total_weight() - 3.5).abs() < 1e-12);
        // New key sits above the old threshold ln(0.5).
        assert!(s.keys()[0] > 0.5f64.ln());
    }

    #[test]
    fn draws_are_sublinear_in_stream_length() {
        let source = CountingSource::new(ChaCha8Rng::seed_from_u64(12));
        let mut s = AExpJ::new(10, source).unwrap();
        let n = 100_000u64;
        for i in 0..n {
            s.process(i, 1.0 + (i % 7) as f64).unwrap();
        }
        assert_eq!(s.sample().len(), 10);
        let draws = s.source().draws();
        assert!(draws < n / 20, "draws={draws}");
    }

    #[test]
    fn weight_overflow_is_reported_without_mutation() {
        let mut s = AExpJ::new(2, ChaCha8Rng::seed_from_u64(1)).unwrap();
        s.process(1, f64::MAX).unwrap();
        let err = s.process(2, f64::MAX).unwrap_err();
        assert!(matches!(err, Error::ArithmeticOverflow("cumulative weight")));
        assert_eq!(s.count(), 1);
        assert_eq!(s.sample(), &[1]);
    }
}
