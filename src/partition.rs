extern crate alloc;
use alloc::vec::Vec;

/// A computed reduction of the intensity range into contiguous groups.
///
/// `thresholds[i]` is the bin index where group `i` ends (exclusive for
/// SSE reconstruction, inclusive for pixel lookup — see [`level_for`]); the
/// last meaningful entry is the histogram length. `levels[i]` is the single
/// representative intensity substituted for every bin of group `i`. Both
/// vectors have exactly the requested length; when the source histogram
/// yields fewer distinct groups, trailing entries repeat the last real one.
///
/// [`level_for`]: Partition::level_for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    thresholds: Vec<usize>,
    levels: Vec<u16>,
}

impl Partition {
    pub(crate) fn new(thresholds: Vec<usize>, levels: Vec<u16>) -> Self {
        debug_assert_eq!(thresholds.len(), levels.len());
        Self { thresholds, levels }
    }

    /// Group boundary bin indices, ascending (trailing duplicates are padding).
    pub fn thresholds(&self) -> &[usize] {
        &self.thresholds
    }

    /// Representative intensity per group.
    pub fn levels(&self) -> &[u16] {
        &self.levels
    }

    /// Number of groups (the requested target level count).
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The representative of the last group, which becomes the quantized
    /// image's new maximum intensity.
    pub fn max_level(&self) -> u16 {
        self.levels.last().copied().unwrap_or(0)
    }

    /// Map an input intensity to its group's representative.
    ///
    /// Uses the smallest `k` with `intensity <= thresholds[k]`, the same
    /// inclusive bound the remap pass has always applied: an intensity equal
    /// to a boundary resolves to the group on its left.
    pub fn level_for(&self, intensity: u16) -> u16 {
        let mut k = 0;
        while k + 1 < self.thresholds.len() && intensity as usize > self.thresholds[k] {
            k += 1;
        }
        self.levels[k]
    }

    /// Total squared error of applying this partition to `hist`, summing
    /// `hist[l] * (l - level)²` over each group's `[start, threshold)` range.
    pub fn sse(&self, hist: &[u32]) -> u64 {
        let mut total = 0u64;
        let mut start = 0usize;
        for (j, &end) in self.thresholds.iter().enumerate() {
            let end = end.min(hist.len());
            let level = self.levels[j] as i64;
            for l in start..end {
                let d = l as i64 - level;
                total += hist[l] as u64 * (d * d) as u64;
            }
            start = start.max(end);
        }
        total
    }
}
