//! Intensity histogram and spike-based threshold bounds.
//!
//! The working image of a usable eye frame is bimodal: a dark mode (pupil,
//! lashes, shadow) and a bright mode (sclera, skin, IR illumination). A
//! histogram bucket counting at least [`MIN_SPIKE_SIZE`] pixels is treated as
//! a spike; the lowest and highest spike positions bound those two modes and
//! anchor the dark/glint mask cutoffs.

use crate::image::GrayImageU8;

/// Minimum bucket population for a bucket to count as a spike.
pub const MIN_SPIKE_SIZE: u32 = 40;

/// 256-bucket intensity histogram over a working image.
#[derive(Clone, Debug)]
pub struct Histogram {
    pub counts: [u32; 256],
}

impl Histogram {
    /// Count intensity occurrences over the whole image.
    pub fn compute(img: &GrayImageU8) -> Self {
        let mut counts = [0u32; 256];
        for &px in &img.data {
            counts[px as usize] += 1;
        }
        Self { counts }
    }

    /// Total number of counted pixels.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }
}

/// Intensity values bounding the dominant dark and bright modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpikeBounds {
    /// Intensity of the lowest spike bucket.
    pub lowest: u8,
    /// Intensity of the highest spike bucket.
    pub highest: u8,
    /// Number of spike buckets found (before any fallback).
    pub num_spikes: u32,
}

/// Locate the lowest- and highest-intensity spikes.
///
/// Fewer than two spikes means the frame is degenerate (closed eye, uniform
/// lighting); the bounds then fall back to the full [0, 255] range so the
/// downstream masks neither collapse nor cover everything.
pub fn find_spike_bounds(hist: &Histogram) -> SpikeBounds {
    let mut lowest = 255u8;
    let mut highest = 0u8;
    let mut num_spikes = 0u32;

    for (i, &count) in hist.counts.iter().enumerate() {
        if count >= MIN_SPIKE_SIZE {
            num_spikes += 1;
            let i = i as u8;
            if i < lowest {
                lowest = i;
            }
            if i > highest {
                highest = i;
            }
        }
    }

    if num_spikes < 2 {
        lowest = 0;
        highest = 255;
    }

    SpikeBounds {
        lowest,
        highest,
        num_spikes,
    }
}
