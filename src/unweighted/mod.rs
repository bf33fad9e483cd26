//! Unweighted reservoir sampling.
//!
//! Maintains a uniform sample of size `k` from a stream of unknown length.
//!
//! - [`AlgorithmR`]: one draw per item. The reference implementation.
//! - [`AlgorithmX`], [`AlgorithmZ`], [`AlgorithmL`]: compute how many items to *skip*
//!   before the next replacement, reducing random draws from O(n) to
//!   O(k(1 + log(n/k))).
//!
//! All four give every item inclusion probability exactly `k / n`. Prefer
//! [`AlgorithmL`]: it is as cheap as Z and has no rejection step.
//!
//! ## References
//!
//! - Vitter (1985): *Random sampling with a reservoir* (Algorithms R, X, Z).
//! - Li (1994): *Reservoir-sampling algorithms of time complexity O(n(1 + log(N/n)))*.

mod algorithm_r;
mod skip;
mod strategies;

pub use algorithm_r::AlgorithmR;
pub use skip::{SkipReservoir, SkipStrategy};
pub use strategies::{LiL, VitterX, VitterZ, MAX_REJECTION_ROUNDS, Z_THRESHOLD};

/// Vitter's Algorithm X: exact skip by linear search.
pub type AlgorithmX<T, R> = SkipReservoir<T, VitterX, R>;

/// Vitter's Algorithm Z: skip by rejection sampling, X for short streams.
pub type AlgorithmZ<T, R> = SkipReservoir<T, VitterZ, R>;

/// Li's Algorithm L: geometric skips from a running threshold.
pub type AlgorithmL<T, R> = SkipReservoir<T, LiL, R>;
