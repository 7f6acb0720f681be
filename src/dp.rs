//! Optimal contiguous partitioning of an intensity histogram.
//!
//! Classic two-index dynamic program: for every `(k, n)` cell, the minimum
//! sum-of-squared-error of splitting the prefix `[0, n]` into `k + 1`
//! contiguous groups, together with the per-bin representative assignment
//! that achieves it. Exact and deliberately exhaustive — `H` is an
//! intensity depth (typically 256) and the target level count is small, so
//! the cubic split search is a non-issue in practice.

extern crate alloc;
use alloc::vec::Vec;

use crate::error::QuantizeError;
use crate::group_error::Moments;
use crate::partition::Partition;

/// Flat row-major `levels × bins` table of minimal partition errors.
///
/// Cell `(k, n)` holds the minimum SSE of partitioning the prefix `[0, n]`
/// into `k + 1` contiguous groups. Row `k` reads only row `k - 1`.
struct ErrorTable {
    data: Vec<u64>,
    bins: usize,
}

impl ErrorTable {
    fn new(levels: usize, bins: usize) -> Result<Self, QuantizeError> {
        let cells = levels
            .checked_mul(bins)
            .ok_or(QuantizeError::Allocation)?;
        let mut data = Vec::new();
        data.try_reserve_exact(cells)
            .map_err(|_| QuantizeError::Allocation)?;
        data.resize(cells, 0);
        Ok(Self { data, bins })
    }

    fn get(&self, k: usize, n: usize) -> u64 {
        self.data[k * self.bins + n]
    }

    fn set(&mut self, k: usize, n: usize, error: u64) {
        self.data[k * self.bins + n] = error;
    }
}

/// Flat `levels × bins × bins` table of per-bin representative assignments.
///
/// Cell `(k, n, m)` is the representative level bin `m` takes under the
/// optimal `k + 1`-group partition of the prefix `[0, n]`. Entries with
/// `m <= n` are always written before they are read; the extractor only ever
/// consumes the final `(levels - 1, bins - 1)` row.
struct AssignmentTable {
    data: Vec<u16>,
    bins: usize,
}

impl AssignmentTable {
    fn new(levels: usize, bins: usize) -> Result<Self, QuantizeError> {
        let cells = levels
            .checked_mul(bins)
            .and_then(|c| c.checked_mul(bins))
            .ok_or(QuantizeError::Allocation)?;
        let mut data = Vec::new();
        data.try_reserve_exact(cells)
            .map_err(|_| QuantizeError::Allocation)?;
        data.resize(cells, 0);
        Ok(Self { data, bins })
    }

    fn base(&self, k: usize, n: usize) -> usize {
        (k * self.bins + n) * self.bins
    }

    fn row(&self, k: usize, n: usize) -> &[u16] {
        let base = self.base(k, n);
        &self.data[base..base + self.bins]
    }

    /// Set bins `lo..=hi` of row `(k, n)` to `level`.
    fn fill(&mut self, k: usize, n: usize, lo: usize, hi: usize, level: u16) {
        let base = self.base(k, n);
        for cell in &mut self.data[base + lo..=base + hi] {
            *cell = level;
        }
    }

    /// Copy bins `0..=upto` of row `(src_k, src_n)` into row `(dst_k, dst_n)`,
    /// inheriting an already-optimal sub-partition.
    fn inherit(&mut self, src_k: usize, src_n: usize, dst_k: usize, dst_n: usize, upto: usize) {
        let src = self.base(src_k, src_n);
        let dst = self.base(dst_k, dst_n);
        self.data.copy_within(src..=src + upto, dst);
    }
}

/// Compute the minimum-SSE partition of `hist` into `target_levels`
/// contiguous groups.
///
/// Both scratch tables are sized up front and fail as a unit: an allocation
/// failure surfaces as [`QuantizeError::Allocation`] before any cell is
/// written. Tie-breaks are fixed (earliest split, smallest representative),
/// so the result is deterministic.
pub fn optimal_partition(hist: &[u32], target_levels: usize) -> Result<Partition, QuantizeError> {
    let bins = hist.len();
    if bins == 0 {
        return Err(QuantizeError::EmptyHistogram);
    }
    if target_levels == 0 || target_levels > bins {
        return Err(QuantizeError::InvalidLevelCount {
            got: target_levels,
            max: bins,
        });
    }

    let (_, assignments) = solve(hist, target_levels)?;
    Ok(extract_partition(
        assignments.row(target_levels - 1, bins - 1),
        target_levels,
    ))
}

/// Fill both DP tables row by row.
///
/// Row `k` represents `k + 1` groups. Per-cell transition:
/// - `k >= n`: at least as many groups as prefix bins, so every bin keeps
///   its own intensity at zero error (this also covers `n == 0`).
/// - `k == 0`: the whole prefix is one group; error and representative come
///   straight from the single-group evaluator.
/// - otherwise: search every split `m` in `[0, n - 1]`, costing the optimal
///   `k`-group partition of `[0, m]` plus one new group over `[m + 1, n]`.
///   The running best starts at `m = 0` and is replaced only on strict
///   improvement, so the earliest minimizing split wins.
fn solve(
    hist: &[u32],
    target_levels: usize,
) -> Result<(ErrorTable, AssignmentTable), QuantizeError> {
    let bins = hist.len();
    let mut errors = ErrorTable::new(target_levels, bins)?;
    let mut assignments = AssignmentTable::new(target_levels, bins)?;
    let moments = Moments::new(hist);

    for k in 0..target_levels {
        for n in 0..bins {
            if k >= n {
                errors.set(k, n, 0);
                for m in 0..=n {
                    assignments.fill(k, n, m, m, m as u16);
                }
            } else if k == 0 {
                let (error, level) = moments.min_group_error(0, n);
                errors.set(k, n, error);
                assignments.fill(k, n, 0, n, level as u16);
            } else {
                let (last_error, last_level) = moments.min_group_error(1, n);
                let mut best_error = errors.get(k - 1, 0) + last_error;
                let mut best_split = 0usize;
                let mut best_level = last_level;

                for m in 1..n {
                    let (last_error, last_level) = moments.min_group_error(m + 1, n);
                    let cost = errors.get(k - 1, m) + last_error;
                    if cost < best_error {
                        best_error = cost;
                        best_split = m;
                        best_level = last_level;
                    }
                }

                errors.set(k, n, best_error);
                assignments.inherit(k - 1, best_split, k, n, best_split);
                assignments.fill(k, n, best_split + 1, n, best_level as u16);
            }
        }
    }

    Ok((errors, assignments))
}

/// Collapse the final assignment row into `(thresholds, levels)`.
///
/// Each change of representative along the row emits a threshold at the
/// changing bin; the last group is closed with a threshold equal to the
/// histogram length. When mass concentrates in fewer than `target_levels`
/// runs, the remaining slots repeat the trailing entry so both vectors come
/// out at exactly `target_levels`.
fn extract_partition(row: &[u16], target_levels: usize) -> Partition {
    let mut thresholds = Vec::with_capacity(target_levels);
    let mut levels = Vec::with_capacity(target_levels);

    let mut prev = row[0];
    levels.push(prev);
    for (m, &level) in row.iter().enumerate().skip(1) {
        if level != prev {
            thresholds.push(m);
            levels.push(level);
            prev = level;
        }
    }
    thresholds.push(row.len());

    while thresholds.len() < target_levels {
        thresholds.push(row.len());
        levels.push(prev);
    }

    Partition::new(thresholds, levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn rejects_degenerate_inputs() {
        assert!(matches!(
            optimal_partition(&[], 1),
            Err(QuantizeError::EmptyHistogram)
        ));
        assert!(matches!(
            optimal_partition(&[1, 2], 0),
            Err(QuantizeError::InvalidLevelCount { got: 0, max: 2 })
        ));
        assert!(matches!(
            optimal_partition(&[1, 2], 3),
            Err(QuantizeError::InvalidLevelCount { got: 3, max: 2 })
        ));
    }

    #[test]
    fn bimodal_histogram_splits_at_the_gap() {
        // Mass at bins 0 and 3 only; two groups recover it exactly.
        let hist = [4, 0, 0, 6];
        let p = optimal_partition(&hist, 2).unwrap();
        assert_eq!(p.thresholds(), &[1, 4]);
        assert_eq!(p.levels(), &[0, 3]);
        assert_eq!(p.sse(&hist), 0);
    }

    #[test]
    fn single_group_keeps_ascending_tie_break() {
        // Levels 1 and 2 tie at error 6; the ascending scan keeps 1.
        let hist = [1, 1, 1, 1];
        let p = optimal_partition(&hist, 1).unwrap();
        assert_eq!(p.levels(), &[1]);
        assert_eq!(p.thresholds(), &[4]);
        assert_eq!(p.sse(&hist), 6);
    }

    #[test]
    fn as_many_levels_as_bins_is_the_identity() {
        let hist = [3, 1, 4, 1, 5];
        let p = optimal_partition(&hist, hist.len()).unwrap();
        assert_eq!(p.thresholds(), &[1, 2, 3, 4, 5]);
        assert_eq!(p.levels(), &[0, 1, 2, 3, 4]);
        assert_eq!(p.sse(&hist), 0);
    }

    #[test]
    fn sparse_histogram_pads_unused_slots() {
        // Only two runs of mass exist, but three levels were requested.
        let hist = [4, 0, 0, 6];
        let p = optimal_partition(&hist, 3).unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.thresholds(), &[1, 4, 4]);
        assert_eq!(p.levels(), &[0, 3, 3]);
        assert_eq!(p.sse(&hist), 0);
    }

    #[test]
    fn reported_error_matches_reconstruction() {
        let hist = [9, 2, 0, 4, 4, 1, 7, 3];
        for target in 1..=hist.len() {
            let (errors, assignments) = solve(&hist, target).unwrap();
            let p = extract_partition(assignments.row(target - 1, hist.len() - 1), target);
            assert_eq!(
                p.sse(&hist),
                errors.get(target - 1, hist.len() - 1),
                "reconstructed SSE diverges from the DP table at L={target}"
            );
        }
    }

    #[test]
    fn error_never_increases_with_more_levels() {
        let hist = [5, 1, 0, 2, 8, 8, 1, 0, 0, 3];
        let mut prev = u64::MAX;
        for target in 1..=hist.len() {
            let p = optimal_partition(&hist, target).unwrap();
            let sse = p.sse(&hist);
            assert!(
                sse <= prev,
                "SSE rose from {prev} to {sse} at L={target}"
            );
            prev = sse;
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let hist = [2, 2, 2, 9, 9, 0, 1, 5];
        let first = optimal_partition(&hist, 3).unwrap();
        let second = optimal_partition(&hist, 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn extract_handles_single_run() {
        let row = vec![7u16; 5];
        let p = extract_partition(&row, 2);
        assert_eq!(p.thresholds(), &[5, 5]);
        assert_eq!(p.levels(), &[7, 7]);
    }
}
