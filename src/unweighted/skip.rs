//! Skip-based reservoir sampling.
//!
//! Once the reservoir is full, a [`SkipStrategy`] says how many items to pass over
//! before the next replacement. Skipped items are never examined; only the stream
//! cursor moves. The landing item overwrites a uniformly chosen slot.
//!
//! A skip is drawn lazily, at the first item that needs it, and all draws for an item
//! are taken before any state changes. A failing random source therefore leaves the
//! sampler exactly as it was.

use log::trace;

use crate::error::Result;
use crate::random::RandomSource;
use crate::reservoir::Reservoir;
use crate::sampler::Sampler;

/// Distribution of the gap between two replacements.
///
/// Implementations are small value types; the sampler works on a copy and commits it
/// only once every draw for the current item has succeeded.
pub trait SkipStrategy: Clone + Default {
    /// Number of items to skip before the next replacement.
    ///
    /// `seen` is the number of items processed so far (at least `k`).
    fn next_skip<R: RandomSource + ?Sized>(
        &mut self,
        seen: u64,
        k: usize,
        source: &mut R,
    ) -> Result<u64>;
}

/// Reservoir sampler driven by a [`SkipStrategy`].
///
/// See [`AlgorithmX`](super::AlgorithmX), [`AlgorithmZ`](super::AlgorithmZ) and
/// [`AlgorithmL`](super::AlgorithmL).
#[derive(Debug, Clone)]
pub struct SkipReservoir<T, S, R> {
    reservoir: Reservoir<T>,
    strategy: S,
    /// Items still to pass over; `None` until the next skip is drawn.
    pending: Option<u64>,
    source: R,
}

impl<T, S: SkipStrategy, R: RandomSource> SkipReservoir<T, S, R> {
    /// Sampler keeping at most `capacity` items, drawing from `source`.
    pub fn new(capacity: usize, source: R) -> Result<Self> {
        Ok(Self {
            reservoir: Reservoir::new(capacity)?,
            strategy: S::default(),
            pending: None,
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

    /// Items that will be passed over before the next replacement, if already drawn.
    pub fn pending_skip(&self) -> Option<u64> {
        self.pending
    }

    /// Current skip, drawing a fresh one (on a copy of the strategy) if needed.
    fn current_skip(&mut self) -> Result<(u64, Option<S>)> {
        if let Some(skip) = self.pending {
            return Ok((skip, None));
        }
        let mut strategy = self.strategy.clone();
        let skip = strategy.next_skip(
            self.reservoir.seen(),
            self.reservoir.capacity(),
            &mut self.source,
        )?;
        trace!(
            "skip of {skip} drawn after {} items",
            self.reservoir.seen()
        );
        Ok((skip, Some(strategy)))
    }

    fn commit(&mut self, strategy: Option<S>) {
        if let Some(strategy) = strategy {
            self.strategy = strategy;
        }
    }

    fn random_slot(&mut self) -> Result<usize> {
        let hi = (self.reservoir.capacity() - 1) as u64;
        Ok(self.source.uniform_int(0, hi)? as usize)
    }

    fn fill(&mut self, item: T) -> Result<()> {
        self.reservoir.append(item);
        self.reservoir.advance(1)?;
        if self.reservoir.is_full() {
            trace!(
                "reservoir of {} filled; switching to skips",
                self.reservoir.capacity()
            );
        }
        Ok(())
    }

    /// Feed a slice, jumping over skipped items by index instead of visiting them.
    ///
    /// Produces the same reservoir as calling [`process`](Sampler::process) on each
    /// element with the same source. On error, elements before the failing one have
    /// been applied.
    pub fn process_slice(&mut self, items: &[T]) -> Result<bool>
    where
        T: Clone,
    {
        self.reservoir.seen_after(items.len() as u64)?;

        let mut changed = false;
        let mut offset = 0usize;
        while offset < items.len() && !self.reservoir.is_full() {
            self.fill(items[offset].clone())?;
            offset += 1;
            changed = true;
        }

        while offset < items.len() {
            let remaining = (items.len() - offset) as u64;
            let (skip, strategy) = self.current_skip()?;
            if skip >= remaining {
                self.commit(strategy);
                self.pending = Some(skip - remaining);
                self.reservoir.advance(remaining)?;
                break;
            }
            let slot = self.random_slot()?;
            self.commit(strategy);
            self.pending = None;
            offset += skip as usize;
            self.reservoir.advance(skip + 1)?;
            self.reservoir.replace(slot, items[offset].clone());
            offset += 1;
            changed = true;
        }
        Ok(changed)
    }
}

impl<T, S: SkipStrategy, R: RandomSource> Sampler<T> for SkipReservoir<T, S, R> {
    fn process(&mut self, item: T) -> Result<bool> {
        self.reservoir.seen_after(1)?;

        if !self.reservoir.is_full() {
            self.fill(item)?;
            return Ok(true);
        }

        let (skip, strategy) = self.current_skip()?;
        if skip > 0 {
            self.commit(strategy);
            self.pending = Some(skip - 1);
            self.reservoir.advance(1)?;
            return Ok(false);
        }

        let slot = self.random_slot()?;
        self.commit(strategy);
        self.pending = None;
        self.reservoir.replace(slot, item);
        self.reservoir.advance(1)?;
        Ok(true)
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
