//! Greedy mass-quota partitioning — a linear-time baseline with the same
//! contract as the optimal solver, but no optimality guarantee.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::QuantizeError;
use crate::partition::Partition;

/// Partition `hist` into `target_levels` groups by accumulating histogram
/// mass until a per-group quota is exceeded.
///
/// The quota is `total_mass / target_levels`. A cut is placed at the bin
/// whose count pushes the running sum past the quota; that bin starts the
/// next group, so the accumulator restarts from its count. Each group's
/// representative is the mass-weighted mean intensity over its bins, or 0
/// for a group with no mass. Cuts that never happen (heavily front-loaded
/// histograms) leave their threshold slots at the histogram length.
pub fn greedy_partition(hist: &[u32], target_levels: usize) -> Result<Partition, QuantizeError> {
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

    let total: u64 = hist.iter().map(|&c| c as u64).sum();
    let ceiling = total / target_levels as u64;

    // The lightest groups end up on the right; the final threshold always
    // covers the full range.
    let mut thresholds = vec![bins; target_levels];
    let mut cuts = 0usize;
    let mut sum = 0u64;
    for (bin, &count) in hist.iter().enumerate() {
        sum += count as u64;
        if sum > ceiling {
            thresholds[cuts] = bin;
            sum = count as u64;
            cuts += 1;
            if cuts == target_levels - 1 {
                break;
            }
        }
    }

    let mut levels = Vec::with_capacity(target_levels);
    let mut start = 0usize;
    for &end in &thresholds {
        let end = end.min(bins);
        let mut weighted = 0u64;
        let mut mass = 0u64;
        for l in start..end {
            weighted += hist[l] as u64 * l as u64;
            mass += hist[l] as u64;
        }
        let level = if mass == 0 { 0 } else { weighted / mass };
        levels.push(level as u16);
        start = start.max(end);
    }

    Ok(Partition::new(thresholds, levels))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_inputs() {
        assert!(matches!(
            greedy_partition(&[], 1),
            Err(QuantizeError::EmptyHistogram)
        ));
        assert!(matches!(
            greedy_partition(&[1], 2),
            Err(QuantizeError::InvalidLevelCount { got: 2, max: 1 })
        ));
    }

    #[test]
    fn uniform_mass_splits_evenly() {
        let hist = [2, 2, 2, 2, 2, 2];
        let p = greedy_partition(&hist, 2).unwrap();
        // Quota is 6; bin 3 pushes the sum to 8 and starts the second group.
        assert_eq!(p.thresholds(), &[3, 6]);
        assert_eq!(p.levels(), &[1, 4]);
    }

    #[test]
    fn levels_are_weighted_means() {
        let hist = [1, 0, 0, 3, 0, 0, 0, 4];
        let p = greedy_partition(&hist, 2).unwrap();
        for (group, window) in core::iter::once(&0)
            .chain(p.thresholds().iter())
            .zip(p.thresholds().iter())
            .enumerate()
        {
            let (&start, &end) = window;
            let bins = &hist[start..end.min(hist.len())];
            let mass: u64 = bins.iter().map(|&c| c as u64).sum();
            if mass > 0 {
                let weighted: u64 = bins
                    .iter()
                    .enumerate()
                    .map(|(i, &c)| (start + i) as u64 * c as u64)
                    .sum();
                assert_eq!(p.levels()[group] as u64, weighted / mass);
            } else {
                assert_eq!(p.levels()[group], 0);
            }
        }
    }

    #[test]
    fn zero_mass_group_gets_level_zero() {
        // All mass in bin 0: the single cut lands immediately and every
        // later group is empty.
        let hist = [10, 0, 0, 0];
        let p = greedy_partition(&hist, 2).unwrap();
        assert_eq!(p.levels()[1], 0);
    }

    #[test]
    fn thresholds_are_non_decreasing_and_end_at_length() {
        let hist = [5, 1, 7, 2, 2, 9, 1, 1];
        for target in 1..=hist.len() {
            let p = greedy_partition(&hist, target).unwrap();
            assert!(p.thresholds().windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(*p.thresholds().last().unwrap(), hist.len());
        }
    }
}
