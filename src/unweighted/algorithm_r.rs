//! Algorithm R (Waterman; popularised by Knuth and Vitter).
//!
//! The O(n) baseline: one integer draw per item once the reservoir is full. Every item
//! ends up in the sample with probability exactly `k / n` and all size-`k` subsets are
//! equally likely, which makes it the oracle the skip-based algorithms are checked
//! against.

use log::trace;

use crate::error::Result;
use crate::random::RandomSource;
use crate::reservoir::Reservoir;
use crate::sampler::Sampler;

/// Reservoir sampler using Algorithm R.
#[derive(Debug, Clone)]
pub struct AlgorithmR<T, R> {
    reservoir: Reservoir<T>,
    source: R,
}

impl<T, R: RandomSource> AlgorithmR<T, R> {
    /// Sampler keeping at most `capacity` items, drawing from `source`.
    pub fn new(capacity: usize, source: R) -> Result<Self> {
        Ok(Self {
            reservoir: Reservoir::new(capacity)?,
            source,
        })
    }

    /// The random source, e.g. to read a draw counter.
    pub fn source(&self) -> &R {
        &self.source
    }

    /// Consume the sampler and return the retained items.
    pub fn into_sample(self) -> Vec<T> {
        self.reservoir.into_vec()
    }

    /// Feed a slice. Every element is visited, one draw each once the reservoir is
    /// full; on error, elements before the failing one have been applied.
    pub fn process_slice(&mut self, items: &[T]) -> Result<bool>
    where
        T: Clone,
    {
        self.reservoir.seen_after(items.len() as u64)?;
        let mut changed = false;
        for item in items {
            changed |= self.process(item.clone())?;
        }
        Ok(changed)
    }
}

impl<T, R: RandomSource> Sampler<T> for AlgorithmR<T, R> {
    fn process(&mut self, item: T) -> Result<bool> {
        // 1-based position of this item.
        let i = self.reservoir.seen_after(1)?;

        if !self.reservoir.is_full() {
            self.reservoir.append(item);
            self.reservoir.advance(1)?;
            if self.reservoir.is_full() {
                trace!("algorithm R: reservoir filled after {i} items");
            }
            return Ok(true);
        }

        let k = self.reservoir.capacity() as u64;
        let j = self.source.uniform_int(1, i)?;
        self.reservoir.advance(1)?;
        if j <= k {
            self.reservoir.replace((j - 1) as usize, item);
            return Ok(true);
        }
        Ok(false)
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
    use crate::error::Error;
    use crate::random::SequenceSource;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn keeps_k_items() {
        let mut s = AlgorithmR::new(5, ChaCha8Rng::seed_from_u64(1)).unwrap();
        for i in 0..100 {
            s.process(i).unwrap();
        }
        assert_eq!(s.sample().len(), 5);
        assert_eq!(s.count(), 100);
    }

    #[test]
    fn hand_computed_stream() {
        // k = 2 over A..E. Draws for C, D, E: j = 1 + floor(u * i).
        // C: i=3, u=0.1 -> j=1, slot 0.  D: i=4, u=0.9 -> j=4, discard.
        // E: i=5, u=0.3 -> j=2, slot 1.
        let source = SequenceSource::new([0.1, 0.9, 0.3]);
        let mut s = AlgorithmR::new(2, source).unwrap();
        let entered: Vec<bool> = ["A", "B", "C", "D", "E"]
            .into_iter()
            .map(|x| s.process(x).unwrap())
            .collect();
        assert_eq!(entered, vec![true, true, true, false, true]);
        assert_eq!(s.sample(), &["C", "E"]);
        assert_eq!(s.source().remaining(), 0);
    }

    #[test]
    fn process_slice_matches_item_by_item() {
        let items: Vec<u32> = (0..2_000).collect();
        let mut one = AlgorithmR::new(8, ChaCha8Rng::seed_from_u64(21)).unwrap();
        one.process_all(items.iter().copied()).unwrap();
        let mut sliced = AlgorithmR::new(8, ChaCha8Rng::seed_from_u64(21)).unwrap();
        for chunk in items.chunks(97) {
            sliced.process_slice(chunk).unwrap();
        }
        assert_eq!(one.sample(), sliced.sample());
        assert_eq!(sliced.count(), 2_000);
    }

    #[test]
    fn process_slice_stops_at_failed_draw() {
        // k = 1: "b" takes the only draw (j = 1, replace), "c" finds the source empty.
        let mut s = AlgorithmR::new(1, SequenceSource::new([0.1])).unwrap();
        let err = s.process_slice(&["a", "b", "c"]).unwrap_err();
        assert!(matches!(err, Error::RandomSourceFailure(_)));
        assert_eq!(s.sample(), &["b"]);
        assert_eq!(s.count(), 2);
    }

    #[test]
    fn failed_draw_leaves_state_untouched() {
        let mut s = AlgorithmR::new(1, SequenceSource::new([])).unwrap();
        s.process('a').unwrap();
        let err = s.process('b').expect_err("no draws available");
        assert!(matches!(err, Error::RandomSourceFailure(_)));
        assert_eq!(s.sample(), &['a']);
        assert_eq!(s.count(), 1);
    }
}
