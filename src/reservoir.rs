//! Fixed-capacity reservoir and stream cursor.

use crate::error::{Error, Result};

/// Largest reservoir capacity accepted by any sampler.
pub const MAX_CAPACITY: usize = i32::MAX as usize;

/// Storage reserved up front; larger reservoirs grow as they fill.
const PREALLOCATE: usize = 4096;

/// Check a requested capacity against `1..=MAX_CAPACITY`.
pub(crate) fn check_capacity(capacity: usize) -> Result<usize> {
    if capacity == 0 || capacity > MAX_CAPACITY {
        return Err(Error::InvalidCapacity {
            capacity,
            max: MAX_CAPACITY,
        });
    }
    Ok(capacity)
}

/// Ordered, fixed-capacity sample plus the count of stream items seen.
///
/// Slots are filled by [`append`](Self::append) until the reservoir is full and
/// overwritten in place by [`replace`](Self::replace) afterwards; the reservoir never
/// grows past its capacity.
#[derive(Debug, Clone)]
pub struct Reservoir<T> {
    capacity: usize,
    seen: u64,
    items: Vec<T>,
}

impl<T> Reservoir<T> {
    /// Empty reservoir holding at most `capacity` items.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = check_capacity(capacity)?;
        Ok(Self {
            capacity,
            seen: 0,
            items: Vec::with_capacity(capacity.min(PREALLOCATE)),
        })
    }

    /// Maximum number of retained items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of items currently retained.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been retained yet.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    /// Stream items accounted for so far.
    pub fn seen(&self) -> u64 {
        self.seen
    }

    /// The value [`advance`](Self::advance) would store, without storing it.
    pub(crate) fn seen_after(&self, by: u64) -> Result<u64> {
        self.seen
            .checked_add(by)
            .ok_or(Error::ArithmeticOverflow("stream length"))
    }

    /// Move the stream cursor forward by `by` items.
    pub fn advance(&mut self, by: u64) -> Result<u64> {
        self.seen = self.seen_after(by)?;
        Ok(self.seen)
    }

    /// Add an item to a reservoir that is not yet full.
    ///
    /// # Panics
    ///
    /// Panics if the reservoir is already full.
    pub fn append(&mut self, item: T) {
        assert!(
            !self.is_full(),
            "Reservoir::append: reservoir is full (capacity {})",
            self.capacity
        );
        self.items.push(item);
    }

    /// Overwrite slot `index`, returning the previous occupant.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn replace(&mut self, index: usize, item: T) -> T {
        std::mem::replace(&mut self.items[index], item)
    }

    /// Current sample, in slot order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Ordered copy of the current sample.
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }

    /// Consume the reservoir and return its items.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}
