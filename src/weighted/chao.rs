//! Chao's method (1982): weighted reservoir without keys.
//!
//! Only the running weight total is kept. After the first `k` items, an item of weight
//! `w` enters with probability `min(1, k·w / W)`, where `W` includes `w`, and replaces
//! a uniformly chosen slot. Inclusion probabilities are proportional to weight only
//! approximately: items heavy enough to hit the `min(1, ·)` cap, and the first `k`
//! items, are not corrected for.

use log::trace;

use super::check_positive;
use crate::error::{Error, Result};
use crate::random::RandomSource;
use crate::reservoir::Reservoir;
use crate::sampler::WeightedSampler;

/// Weighted reservoir sampler using Chao's method.
#[derive(Debug, Clone)]
pub struct Chao<T, R> {
    reservoir: Reservoir<T>,
    total_weight: f64,
    source: R,
}

impl<T, R: RandomSource> Chao<T, R> {
    /// Sampler keeping at most `capacity` items, drawing from `source`.
    pub fn new(capacity: usize, source: R) -> Result<Self> {
        Ok(Self {
            reservoir: Reservoir::new(capacity)?,
            total_weight: 0.0,
            source,
        })
    }

    /// Sum of all weights processed so far.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// The random source, e.g. to read a draw counter.
    pub fn source(&self) -> &R {
        &self.source
    }

    /// Consume the sampler and return the retained items.
    pub fn into_sample(self) -> Vec<T> {
        self.reservoir.into_vec()
    }
}

impl<T, R: RandomSource> WeightedSampler<T> for Chao<T, R> {
    fn process(&mut self, item: T, weight: f64) -> Result<bool> {
        let weight = check_positive(weight)?;
        self.reservoir.seen_after(1)?;
        let total_weight = self.total_weight + weight;
        if !total_weight.is_finite() {
            return Err(Error::ArithmeticOverflow("cumulative weight"));
        }

        if !self.reservoir.is_full() {
            self.reservoir.append(item);
            self.reservoir.advance(1)?;
            self.total_weight = total_weight;
            if self.reservoir.is_full() {
                trace!("Chao: reservoir of {} filled", self.reservoir.capacity());
            }
            return Ok(true);
        }

        let k = self.reservoir.capacity();
        let p = k as f64 * weight / total_weight;
        let accept = p >= 1.0 || self.source.uniform01()? < p;
        let slot = if accept {
            Some(self.source.uniform_int(0, (k - 1) as u64)? as usize)
        } else {
            None
        };

        self.reservoir.advance(1)?;
        self.total_weight = total_weight;
        match slot {
            Some(slot) => {
                self.reservoir.replace(slot, item);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn sample(&self) -> &[T] {
        self.reservoir.as_slice()
    }

    fn count(&self) -> u64 {
        self.reservoir.seen()
    }

    fn capacity(&self) -> usize {
        self.reservoir.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceSource;

    #[test]
    fn inclusion_probability_uses_weight_including_current_item() {
        // k = 2 filled with weight 1 + 1. Item "c" of weight 2: p = 2·2 / 4 = 1, no
        // acceptance draw, slot floor(0.6 · 2) = 1.
        // Item "d" of weight 1: p = 2·1 / 5 = 0.4, draw 0.5 rejects.
        // Item "e" of weight 3: p = 2·3 / 8 = 0.75, draw 0.7 accepts, slot 0.
        let source = SequenceSource::new([0.6, 0.5, 0.7, 0.1]);
        let mut s = Chao::new(2, source).unwrap();
        assert!(s.process("a", 1.0).unwrap());
        assert!(s.process("b", 1.0).unwrap());
        assert!(s.process("c", 2.0).unwrap());
        assert!(!s.process("d", 1.0).unwrap());
        assert!(s.process("e", 3.0).unwrap());
        assert_eq!(s.sample(), &["e", "c"]);
        assert_eq!(s.total_weight(), 8.0);
        assert_eq!(s.source().remaining(), 0);
    }

    #[test]
    fn bad_weight_leaves_state_untouched() {
        let mut s = Chao::new(2, SequenceSource::new([])).unwrap();
        s.process('a', 2.0).unwrap();
        for w in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                s.process('x', w),
                Err(Error::InvalidWeight { .. })
            ));
        }
        assert_eq!(s.sample(), &['a']);
        assert_eq!(s.count(), 1);
        assert_eq!(s.total_weight(), 2.0);
    }
}
