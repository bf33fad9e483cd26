//! Errors surfaced by samplers and random sources.

use thiserror::Error;

/// Errors for reservoir construction and stream processing.
///
/// Every error is reported at the call that triggered it. A failed call leaves the
/// sampler exactly as it was before the call.
#[derive(Debug, Error)]
pub enum Error {
    /// Capacity is zero or larger than [`MAX_CAPACITY`](crate::MAX_CAPACITY).
    #[error("capacity must be in 1..={max} (got {capacity})")]
    InvalidCapacity {
        /// Requested capacity.
        capacity: usize,
        /// Largest accepted capacity.
        max: usize,
    },

    /// Weight rejected by a weighted sampler.
    #[error("weight must be {expected} (got {weight})")]
    InvalidWeight {
        /// The rejected weight.
        weight: f64,
        /// Range the algorithm accepts.
        expected: &'static str,
    },

    /// The random source could not produce a value.
    #[error("random source failed: {0}")]
    RandomSourceFailure(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A stream counter or weight accumulator left its representable range.
    #[error("arithmetic overflow in {0}")]
    ArithmeticOverflow(&'static str),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn random_source(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self::RandomSourceFailure(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn messages_name_the_offending_value() {
        let err = Error::InvalidCapacity {
            capacity: 0,
            max: 10,
        };
        assert_eq!(err.to_string(), "capacity must be in 1..=10 (got 0)");

        let err = Error::InvalidWeight {
            weight: -1.0,
            expected: "finite and > 0",
        };
        assert_eq!(err.to_string(), "weight must be finite and > 0 (got -1)");
    }

    #[test]
    fn random_source_failure_keeps_source() {
        let err = Error::random_source("exhausted");
        assert_eq!(err.to_string(), "random source failed: exhausted");
        assert_eq!(err.source().map(|s| s.to_string()), Some("exhausted".into()));
    }
}
