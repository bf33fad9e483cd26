//! Capability traits shared by every sampler.

use crate::error::Result;

/// An unweighted reservoir sampler.
///
/// Implementations differ only in how they decide which items replace which slots;
/// they all keep `min(capacity, count)` items.
pub trait Sampler<T> {
    /// Feed one item. Returns `true` if the item entered the reservoir.
    fn process(&mut self, item: T) -> Result<bool>;

    /// Feed items in iteration order, stopping at the first error.
    ///
    /// Returns `true` if any item entered the reservoir.
    fn process_all<I>(&mut self, items: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        let mut changed = false;
        for item in items {
            changed |= self.process(item)?;
        }
        Ok(changed)
    }

    /// Current sample. Slot order carries no statistical meaning.
    fn sample(&self) -> &[T];

    /// Number of items processed so far.
    fn count(&self) -> u64;

    /// Maximum sample size `k`.
    fn capacity(&self) -> usize;
}

/// A reservoir sampler whose items carry a positive weight.
pub trait WeightedSampler<T> {
    /// Feed one item with its weight. Returns `true` if the item entered the reservoir.
    ///
    /// Fails with [`Error::InvalidWeight`](crate::Error::InvalidWeight) without touching
    /// the sampler when the weight is not acceptable to the algorithm.
    fn process(&mut self, item: T, weight: f64) -> Result<bool>;

    /// Feed `(item, weight)` pairs in iteration order, stopping at the first error.
    fn process_all<I>(&mut self, items: I) -> Result<bool>
    where
        I: IntoIterator<Item = (T, f64)>,
        Self: Sized,
    {
        let mut changed = false;
        for (item, weight) in items {
            changed |= self.process(item, weight)?;
        }
        Ok(changed)
    }

    /// Current sample. Slot order carries no statistical meaning.
    fn sample(&self) -> &[T];

    /// Number of items processed so far, rejected weights excluded.
    fn count(&self) -> u64;

    /// Maximum sample size `k`.
    fn capacity(&self) -> usize;
}

impl<T, S: Sampler<T> + ?Sized> Sampler<T> for Box<S> {
    fn process(&mut self, item: T) -> Result<bool> {
        (**self).process(item)
    }

    fn sample(&self) -> &[T] {
        (**self).sample()
    }

    fn count(&self) -> u64 {
        (**self).count()
    }

    fn capacity(&self) -> usize {
        (**self).capacity()
    }
}

impl<T, S: WeightedSampler<T> + ?Sized> WeightedSampler<T> for Box<S> {
    fn process(&mut self, item: T, weight: f64) -> Result<bool> {
        (**self).process(item, weight)
    }

    fn sample(&self) -> &[T] {
        (**self).sample()
    }

    fn count(&self) -> u64 {
        (**self).count()
    }

    fn capacity(&self) -> usize {
        (**self).capacity()
    }
}
