extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use rgb::alt::Gray;

/// Count pixels per intensity over `0..=max_value`.
///
/// The returned histogram always has `max_value + 1` bins, so unused
/// intensities show up as empty bins rather than being elided. Callers
/// validate that no pixel exceeds `max_value` before building.
pub fn build_histogram(pixels: &[Gray<u16>], max_value: u16) -> Vec<u32> {
    let mut hist = vec![0u32; max_value as usize + 1];
    for pixel in pixels {
        hist[pixel.0 as usize] += 1;
    }
    hist
}
