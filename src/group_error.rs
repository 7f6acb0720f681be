//! Single-group error evaluation: the inner-loop primitive of the
//! optimal partition solver.

extern crate alloc;
use alloc::vec::Vec;

/// Prefix moments of a histogram, for O(1) range error queries.
///
/// `m0`, `m1`, `m2` are prefix sums of `count`, `count·l`, and `count·l²`,
/// each of length `bins + 1`, so any closed range `[lo, hi]` reduces to two
/// lookups. All arithmetic stays in `u64` and is exact, so results are
/// identical to summing the range directly.
pub(crate) struct Moments {
    m0: Vec<u64>,
    m1: Vec<u64>,
    m2: Vec<u64>,
}

impl Moments {
    pub(crate) fn new(hist: &[u32]) -> Self {
        let mut m0 = Vec::with_capacity(hist.len() + 1);
        let mut m1 = Vec::with_capacity(hist.len() + 1);
        let mut m2 = Vec::with_capacity(hist.len() + 1);
        m0.push(0);
        m1.push(0);
        m2.push(0);
        let (mut s0, mut s1, mut s2) = (0u64, 0u64, 0u64);
        for (l, &count) in hist.iter().enumerate() {
            let c = count as u64;
            let l = l as u64;
            s0 += c;
            s1 += c * l;
            s2 += c * l * l;
            m0.push(s0);
            m1.push(s1);
            m2.push(s2);
        }
        Self { m0, m1, m2 }
    }

    /// Sum of `hist[l] * (l - level)²` over `l ∈ [lo, hi]`.
    fn group_error(&self, lo: usize, hi: usize, level: usize) -> u64 {
        let s0 = self.m0[hi + 1] - self.m0[lo];
        let s1 = self.m1[hi + 1] - self.m1[lo];
        let s2 = self.m2[hi + 1] - self.m2[lo];
        let lvl = level as u64;
        // Expanded square; the subtrahend never exceeds the sum because the
        // quadratic is non-negative.
        s2 + lvl * lvl * s0 - 2 * lvl * s1
    }

    /// Find the representative level minimizing the sum of squared errors
    /// when every bin in `[lo, hi]` is replaced by a single intensity.
    ///
    /// Returns `(error, level)`. Candidates are scanned ascending and only a
    /// strictly smaller error replaces the running best, so ties resolve to
    /// the smallest level. The scan is exhaustive rather than a rounded
    /// weighted mean: with sparse or zero-weight bins the integer-domain
    /// minimizer is not always the rounded mean, and the exhaustive search
    /// is exact.
    pub(crate) fn min_group_error(&self, lo: usize, hi: usize) -> (u64, usize) {
        debug_assert!(lo <= hi && hi + 1 < self.m0.len());

        let mut best_error = u64::MAX;
        let mut best_level = lo;
        for level in lo..=hi {
            let error = self.group_error(lo, hi, level);
            if error < best_error {
                best_error = error;
                best_level = level;
            }
        }
        (best_error, best_level)
    }
}
