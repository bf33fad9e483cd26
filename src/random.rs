//! Random sources.
//!
//! Every sampler is generic over [`RandomSource`] and owns its source. Any
//! [`rand::RngCore`] is a source out of the box (`ChaCha8Rng`, `StdRng`, `rand::rng()`,
//! `Box<dyn RngCore>`, `&mut R`), fallible generators go through [`TryRandom`], and
//! [`SequenceSource`] replays a fixed list of draws for hand-checked tests.

use rand::{Rng, RngCore, TryRngCore};

use crate::error::{Error, Result};

/// Zero draws tolerated in a row before an open-interval draw gives up.
const MAX_ZERO_REDRAWS: usize = 64;

/// Uniform draws consumed by the sampling algorithms.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn uniform01(&mut self) -> Result<f64>;

    /// Uniform integer in `[lo, hi]` (inclusive). Requires `lo <= hi`.
    ///
    /// The default scales one [`uniform01`](Self::uniform01) draw, which carries a
    /// bias of order `(hi - lo) / 2^53`. Generator-backed sources override it with an
    /// unbiased draw.
    fn uniform_int(&mut self, lo: u64, hi: u64) -> Result<u64> {
        debug_assert!(lo <= hi, "uniform_int: empty range {lo}..={hi}");
        let u = self.uniform01()?;
        let span = (hi - lo) as f64 + 1.0;
        let offset = (u * span) as u64;
        Ok(lo.saturating_add(offset).min(hi))
    }
}

impl<R: RngCore + ?Sized> RandomSource for R {
    #[inline]
    fn uniform01(&mut self) -> Result<f64> {
        Ok(self.random::<f64>())
    }

    #[inline]
    fn uniform_int(&mut self, lo: u64, hi: u64) -> Result<u64> {
        Ok(self.random_range(lo..=hi))
    }
}

/// Uniform draw in the open interval `(0, 1)`, for use under a logarithm.
///
/// Exact zeros are redrawn; a source that keeps returning zero is reported as failed.
pub(crate) fn open01<S: RandomSource + ?Sized>(source: &mut S) -> Result<f64> {
    for _ in 0..MAX_ZERO_REDRAWS {
        let u = source.uniform01()?;
        if u > 0.0 {
            return Ok(u);
        }
    }
    Err(Error::random_source(format!(
        "source returned 0.0 for {MAX_ZERO_REDRAWS} consecutive draws"
    )))
}

/// Adapter for fallible generators such as `rand::rngs::OsRng`.
///
/// Generator errors are surfaced unchanged as [`Error::RandomSourceFailure`].
#[derive(Debug, Clone)]
pub struct TryRandom<R> {
    inner: R,
}

impl<R> TryRandom<R> {
    /// Wrap a fallible generator.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Return the wrapped generator.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R> TryRandom<R>
where
    R: TryRngCore,
    R::Error: std::error::Error + Send + Sync + 'static,
{
    fn next_u64(&mut self) -> Result<u64> {
        self.inner
            .try_next_u64()
            .map_err(|e| Error::RandomSourceFailure(Box::new(e)))
    }
}

impl<R> RandomSource for TryRandom<R>
where
    R: TryRngCore,
    R::Error: std::error::Error + Send + Sync + 'static,
{
    fn uniform01(&mut self) -> Result<f64> {
        // 53 high bits -> [0, 1) on the f64 grid.
        let bits = self.next_u64()? >> 11;
        Ok(bits as f64 * (1.0 / (1u64 << 53) as f64))
    }

    fn uniform_int(&mut self, lo: u64, hi: u64) -> Result<u64> {
        debug_assert!(lo <= hi, "uniform_int: empty range {lo}..={hi}");
        let span = (hi - lo).wrapping_add(1);
        if span == 0 {
            return self.next_u64();
        }
        // Reject the low `2^64 mod span` values to remove modulo bias.
        let threshold = span.wrapping_neg() % span;
        loop {
            let r = self.next_u64()?;
            if r >= threshold {
                return Ok(lo + r % span);
            }
        }
    }
}

/// Replays a fixed sequence of uniform draws.
///
/// Integer draws scale the next value (`lo + floor(u * (hi - lo + 1))`), so a test can
/// script every decision an algorithm makes. Running out of values, or a value outside
/// `[0, 1)`, fails with [`Error::RandomSourceFailure`].
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    values: Vec<f64>,
    next: usize,
}

impl SequenceSource {
    /// Source replaying `values` in order.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            next: 0,
        }
    }

    /// Draws consumed so far.
    pub fn drawn(&self) -> usize {
        self.next
    }

    /// Draws still available.
    pub fn remaining(&self) -> usize {
        self.values.len() - self.next
    }
}

impl RandomSource for SequenceSource {
    fn uniform01(&mut self) -> Result<f64> {
        let Some(&u) = self.values.get(self.next) else {
            return Err(Error::random_source(format!(
                "sequence exhausted after {} draws",
                self.values.len()
            )));
        };
        if !(0.0..1.0).contains(&u) {
            return Err(Error::random_source(format!(
                "sequence value {u} at draw {} is outside [0, 1)",
                self.next
            )));
        }
        self.next += 1;
        Ok(u)
    }
}

/// Wraps a source and counts the draws taken from it.
#[derive(Debug, Clone)]
pub struct CountingSource<S> {
    inner: S,
    draws: u64,
}

impl<S> CountingSource<S> {
    /// Start counting draws taken from `inner`.
    pub fn new(inner: S) -> Self {
        Self { inner, draws: 0 }
    }

    /// Number of successful draws (`uniform01` and `uniform_int` each count as one).
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// The wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Return the wrapped source.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: RandomSource> RandomSource for CountingSource<S> {
    fn uniform01(&mut self) -> Result<f64> {
        let u = self.inner.uniform01()?;
        self.draws += 1;
        Ok(u)
    }

    fn uniform_int(&mut self, lo: u64, hi: u64) -> Result<u64> {
        let v = self.inner.uniform_int(lo, hi)?;
        self.draws += 1;
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn rng_draws_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1_000 {
            let u = rng.uniform01().unwrap();
            assert!((0.0..1.0).contains(&u));
            let j = RandomSource::uniform_int(&mut rng, 1, 6).unwrap();
            assert!((1..=6).contains(&j));
        }
    }

    #[test]
    fn sequence_source_scales_integer_draws() {
        let mut s = SequenceSource::new([0.0, 0.5, 0.999]);
        assert_eq!(s.uniform_int(1, 4).unwrap(), 1);
        assert_eq!(s.uniform_int(1, 4).unwrap(), 3);
        assert_eq!(s.uniform_int(1, 4).unwrap(), 4);
        assert_eq!(s.drawn(), 3);
        assert_eq!(s.remaining(), 0);
        assert!(matches!(
            s.uniform01(),
            Err(Error::RandomSourceFailure(_))
        ));
    }

    #[test]
    fn sequence_source_rejects_values_outside_unit_interval() {
        let mut s = SequenceSource::new([1.0]);
        let err = s.uniform01().expect_err("1.0 is not in [0, 1)");
        assert!(err.to_string().contains("outside [0, 1)"));
        assert_eq!(s.drawn(), 0);
    }

    #[test]
    fn open01_skips_zeros_but_gives_up_eventually() {
        let mut s = SequenceSource::new([0.0, 0.0, 0.25]);
        assert_eq!(open01(&mut s).unwrap(), 0.25);

        let mut zeros = SequenceSource::new(std::iter::repeat_n(0.0, 100));
        assert!(matches!(
            open01(&mut zeros),
            Err(Error::RandomSourceFailure(_))
        ));
    }

    #[test]
    fn counting_source_counts_successful_draws() {
        let mut s = CountingSource::new(SequenceSource::new([0.1, 0.2]));
        s.uniform01().unwrap();
        s.uniform_int(0, 9).unwrap();
        assert!(s.uniform01().is_err());
        assert_eq!(s.draws(), 2);
    }

    #[test]
    fn try_random_integer_draws_are_in_range() {
        let mut s = TryRandom::new(ChaCha8Rng::seed_from_u64(11));
        for _ in 0..1_000 {
            let j = s.uniform_int(10, 12).unwrap();
            assert!((10..=12).contains(&j));
            let u = s.uniform01().unwrap();
            assert!((0.0..1.0).contains(&u));
        }
        assert!(s.uniform_int(0, u64::MAX).is_ok());
    }
}
