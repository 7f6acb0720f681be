#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod dp;
pub mod error;
pub mod greedy;
mod group_error;
pub mod histogram;
pub mod partition;
pub mod remap;

pub use error::QuantizeError;
pub use partition::Partition;

use alloc::vec::Vec;
use rgb::alt::Gray;

/// How to partition the intensity range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionStrategy {
    /// Exact minimum-SSE partition via dynamic programming.
    Optimal,
    /// Linear-time mass-quota heuristic. Same output contract, no
    /// optimality guarantee; useful as a fast baseline.
    Greedy,
}

impl Default for PartitionStrategy {
    fn default() -> Self {
        Self::Optimal
    }
}

/// Configuration for grayscale level reduction.
#[derive(Debug, Clone)]
pub struct QuantizeConfig {
    /// Number of intensity levels in the output (1..=histogram length).
    pub target_levels: usize,
    /// Partitioning strategy.
    pub strategy: PartitionStrategy,
}

impl Default for QuantizeConfig {
    fn default() -> Self {
        Self {
            target_levels: 16,
            strategy: PartitionStrategy::Optimal,
        }
    }
}

impl QuantizeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_levels(mut self, n: usize) -> Self {
        self.target_levels = n;
        self
    }

    pub fn strategy(mut self, strategy: PartitionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Level reduction result.
#[derive(Debug)]
pub struct QuantizeResult {
    partition: Partition,
    pixels: Vec<Gray<u16>>,
    max_value: u16,
}

impl QuantizeResult {
    /// The remapped pixel buffer, same length and order as the input.
    pub fn pixels(&self) -> &[Gray<u16>] {
        &self.pixels
    }

    /// The quantized image's maximum intensity: the representative of the
    /// last group.
    pub fn max_value(&self) -> u16 {
        self.max_value
    }

    /// The computed partition.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Group boundary bin indices.
    pub fn thresholds(&self) -> &[usize] {
        self.partition.thresholds()
    }

    /// Representative intensity per group.
    pub fn levels(&self) -> &[u16] {
        self.partition.levels()
    }
}

/// Reduce a grayscale image to `config.target_levels` distinct intensities.
///
/// Builds the intensity histogram over `0..=max_value`, partitions it with
/// the configured strategy, and remaps every pixel to its group's
/// representative. On failure nothing is produced; there is no partial
/// result.
pub fn quantize(
    pixels: &[Gray<u16>],
    width: usize,
    height: usize,
    max_value: u16,
    config: &QuantizeConfig,
) -> Result<QuantizeResult, QuantizeError> {
    validate_inputs(pixels, width, height, max_value, config)?;

    let hist = histogram::build_histogram(pixels, max_value);

    let partition = match config.strategy {
        PartitionStrategy::Optimal => dp::optimal_partition(&hist, config.target_levels)?,
        PartitionStrategy::Greedy => greedy::greedy_partition(&hist, config.target_levels)?,
    };

    let remapped = remap::remap_pixels(pixels, &partition);
    let max_value = partition.max_level();

    Ok(QuantizeResult {
        partition,
        pixels: remapped,
        max_value,
    })
}

fn validate_inputs(
    pixels: &[Gray<u16>],
    width: usize,
    height: usize,
    max_value: u16,
    config: &QuantizeConfig,
) -> Result<(), QuantizeError> {
    if width == 0 || height == 0 {
        return Err(QuantizeError::ZeroDimension);
    }
    if pixels.len() != width * height {
        return Err(QuantizeError::DimensionMismatch {
            len: pixels.len(),
            width,
            height,
        });
    }
    if let Some(p) = pixels.iter().find(|p| p.0 > max_value) {
        return Err(QuantizeError::IntensityOutOfRange {
            value: p.0,
            max: max_value,
        });
    }
    let bins = max_value as usize + 1;
    if config.target_levels == 0 || config.target_levels > bins {
        return Err(QuantizeError::InvalidLevelCount {
            got: config.target_levels,
            max: bins,
        });
    }
    Ok(())
}
