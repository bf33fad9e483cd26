//! `skipsample`: streaming reservoir sampling.
//!
//! Keep a fixed-size random sample of a stream whose length is not known in advance,
//! in one pass and O(k) memory.
//!
//! Exposed modules:
//! - `unweighted`: uniform samples (Algorithms R, X, Z and L). X, Z and L skip over
//!   items instead of drawing once per item.
//! - `weighted`: weight-biased samples (A-Res, A-ExpJ, Chao, sequential Poisson, Pareto).
//! - `random`: the [`RandomSource`] seam every sampler draws through.
//! - `config`: runtime algorithm selection.
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use skipsample::{AlgorithmL, Sampler};
//!
//! let mut s = AlgorithmL::new(3, ChaCha8Rng::seed_from_u64(0))?;
//! s.process_all(0..1_000)?;
//! assert_eq!(s.sample().len(), 3);
//! assert_eq!(s.count(), 1_000);
//! # Ok::<(), skipsample::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod heap;
pub mod random;
pub mod reservoir;
pub mod sampler;
pub mod unweighted;
pub mod weighted;

pub use config::{
    sample_iter, sample_weighted_iter, Algorithm, SamplerConfig, WeightedAlgorithm,
    WeightedSamplerConfig,
};
pub use error::{Error, Result};
pub use random::{CountingSource, RandomSource, SequenceSource, TryRandom};
pub use reservoir::{Reservoir, MAX_CAPACITY};
pub use sampler::{Sampler, WeightedSampler};
pub use unweighted::{AlgorithmL, AlgorithmR, AlgorithmX, AlgorithmZ};
pub use weighted::{AExpJ, Chao, EfraimidisSpirakis, Pareto, SequentialPoisson};
