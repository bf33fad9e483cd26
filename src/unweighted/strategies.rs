//! Skip distributions for Algorithms X, Z (Vitter, 1985) and L (Li, 1994).
//!
//! With `t` items processed and a full reservoir of size `k`, the number of items `S`
//! skipped before the next replacement satisfies
//!
//! ```text
//! P(S > s) = Π_{j=1..=s+1} (t + j - k) / (t + j)
//! ```
//!
//! X inverts this exactly by linear search, Z samples a continuous envelope and
//! corrects it by rejection, L tracks the running threshold `W` of the underlying
//! uniform keys and gets a geometric skip in closed form.

use log::{debug, warn};

use super::skip::SkipStrategy;
use crate::error::Result;
use crate::random::{open01, RandomSource};

/// Algorithm Z uses X's exact search while `t <= Z_THRESHOLD * k`.
pub const Z_THRESHOLD: u64 = 22;

/// Rounds of Z's acceptance test before the current skip is computed exactly instead.
pub const MAX_REJECTION_ROUNDS: usize = 1_000;

/// Algorithm X: exact inversion of the skip distribution.
///
/// One uniform draw per skip; CPU time proportional to the skip length.
#[derive(Debug, Clone, Copy, Default)]
pub struct VitterX;

/// Smallest `s` with `P(S > s) <= v`.
fn exact_skip(seen: u64, k: usize, v: f64) -> u64 {
    let k = k as f64;
    let mut t = seen as f64 + 1.0;
    let mut quot = (t - k) / t;
    let mut skip = 0u64;
    while quot > v {
        skip += 1;
        t += 1.0;
        quot *= (t - k) / t;
    }
    skip
}

impl SkipStrategy for VitterX {
    fn next_skip<R: RandomSource + ?Sized>(
        &mut self,
        seen: u64,
        k: usize,
        source: &mut R,
    ) -> Result<u64> {
        let v = open01(source)?;
        Ok(exact_skip(seen, k, v))
    }
}

/// Algorithm Z: rejection sampling from a continuous envelope.
///
/// Expected O(1) draws per skip independent of the stream length. Falls back to
/// [`VitterX`] while the stream is short relative to `k`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VitterZ {
    /// `U^(-1/k)`, carried between skips as in Vitter's formulation.
    w: Option<f64>,
}

fn draw_w<R: RandomSource + ?Sized>(source: &mut R, k: f64) -> Result<f64> {
    Ok((-open01(source)?.ln() / k).exp())
}

impl SkipStrategy for VitterZ {
    fn next_skip<R: RandomSource + ?Sized>(
        &mut self,
        seen: u64,
        k: usize,
        source: &mut R,
    ) -> Result<u64> {
        if seen <= Z_THRESHOLD.saturating_mul(k as u64) {
            return VitterX.next_skip(seen, k, source);
        }

        let n = k as f64;
        let t = seen as f64;
        let term = t - n + 1.0;
        let mut w = match self.w {
            Some(w) => w,
            None => {
                debug!("algorithm Z: rejection regime from t={seen} (k={k})");
                draw_w(source, n)?
            }
        };

        for _ in 0..MAX_REJECTION_ROUNDS {
            let u = open01(source)?;
            let x = t * (w - 1.0);
            let s = x.floor();

            // Squeeze: U <= h(S) / c·g(X).
            let lhs = ((u * ((t + 1.0) / term).powi(2) * (term + s)) / (t + x)).powf(1.0 / n);
            let rhs = (((t + x) / (term + s)) * term) / t;
            if lhs <= rhs {
                self.w = Some(rhs / lhs);
                return Ok(s as u64);
            }

            // Exact: U <= f(S) / c·g(X).
            let mut y = (((u * (t + 1.0)) / term) * (t + s + 1.0)) / (t + x);
            let (mut denom, factors) = if n < s { (t, k as u64) } else { (t - n + s, s as u64) };
            let mut numer = t + s;
            for _ in 0..factors {
                y = (y * numer) / denom;
                numer -= 1.0;
                denom -= 1.0;
            }

            w = draw_w(source, n)?;
            if y.powf(1.0 / n) <= (t + x) / t {
                self.w = Some(w);
                return Ok(s as u64);
            }
        }

        warn!(
            "algorithm Z: no acceptance after {MAX_REJECTION_ROUNDS} rounds at t={seen} (k={k}); \
             using exact search"
        );
        self.w = Some(w);
        VitterX.next_skip(seen, k, source)
    }
}

/// Algorithm L: geometric skips from the running key threshold `W`.
///
/// `W` starts at `U^(1/k)` and shrinks by a factor `U^(1/k)` after every replacement;
/// the skip is `floor(ln U' / ln(1 - W))`. Two draws per skip, no rejection step.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiL {
    w: Option<f64>,
}

impl LiL {
    /// Current threshold, once the first skip has been drawn.
    pub fn threshold(&self) -> Option<f64> {
        self.w
    }
}

impl SkipStrategy for LiL {
    fn next_skip<R: RandomSource + ?Sized>(
        &mut self,
        _seen: u64,
        k: usize,
        source: &mut R,
    ) -> Result<u64> {
        let k = k as f64;
        let factor = (open01(source)?.ln() / k).exp();
        let w = self.w.map_or(factor, |w| w * factor);
        let u = open01(source)?;
        // ln(1 - W) via ln_1p keeps precision once W is small.
        let skip = (u.ln() / (-w).ln_1p()).floor();
        self.w = Some(w);
        Ok(skip as u64)
    }
}
