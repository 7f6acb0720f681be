extern crate alloc;
use alloc::vec::Vec;

use rgb::alt::Gray;

use crate::partition::Partition;

/// Replace every pixel's intensity with its group's representative level.
pub fn remap_pixels(pixels: &[Gray<u16>], partition: &Partition) -> Vec<Gray<u16>> {
    pixels
        .iter()
        .map(|p| Gray(partition.level_for(p.0)))
        .collect()
}
