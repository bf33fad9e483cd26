//! Weighted reservoir sampling.
//!
//! Each item carries a weight `w`; heavier items are more likely to be kept. None of
//! these designs gives inclusion probabilities exactly proportional to weight for
//! finite streams, so treat them as approximate PPS:
//!
//! - [`EfraimidisSpirakis`] (A-Res): key `u^(1/w)`, keep the `k` largest. Each retained
//!   item is as if drawn in successive weighted rounds without replacement.
//! - [`AExpJ`]: A-Res with exponential jumps over cumulative weight; same distribution,
//!   far fewer random draws.
//! - [`Chao`]: no keys, running weight total only.
//! - [`SequentialPoisson`]: keep the `k` smallest `u / w`.
//! - [`Pareto`]: keep the `k` smallest `(u / (1 - u))((1 - w) / w)`, weights in `(0, 1)`.
//!
//! ## References
//!
//! - Efraimidis & Spirakis (2006): *Weighted random sampling with a reservoir*.
//! - Chao (1982): *A general purpose unequal probability sampling plan*.
//! - Ohlsson (1990): *Sequential Poisson sampling from a business register*.
//! - Rosén (1997): *On sampling with probability proportional to size*.

mod chao;
mod expj;
mod order;

pub use chao::Chao;
pub use expj::AExpJ;
pub use order::{ARes, OrderKey, OrderSampler, ParetoKey, PoissonKey};

use crate::error::{Error, Result};

/// Efraimidis–Spirakis A-Res order sampling.
pub type EfraimidisSpirakis<T, R> = OrderSampler<T, ARes, R>;

/// Ohlsson's sequential Poisson sampling.
pub type SequentialPoisson<T, R> = OrderSampler<T, PoissonKey, R>;

/// Rosén's Pareto sampling.
pub type Pareto<T, R> = OrderSampler<T, ParetoKey, R>;

/// Accept finite, strictly positive weights.
pub(crate) fn check_positive(weight: f64) -> Result<f64> {
    if weight.is_finite() && weight > 0.0 {
        Ok(weight)
    } else {
        Err(Error::InvalidWeight {
            weight,
            expected: "finite and > 0",
        })
    }
}
