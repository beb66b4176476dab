//! Pupil detector: a linear five-stage pipeline over one eye frame.
//!
//! Overview
//! - Builds a normalized grayscale working image, optionally restricted by a
//!   caller-supplied region-of-interest mask (excluded area is forced white
//!   so it can never pass the dark-candidate test).
//! - Derives the pupil/glint intensity cutoffs from the working image's own
//!   histogram: the lowest and highest spike buckets bound the dark and
//!   bright modes, with a full-range fallback on degenerate frames.
//! - Shapes two binary masks (dark-candidate dilated out past the boundary,
//!   non-glint eroded back around specular highlights).
//! - Runs Canny on the blurred working image and keeps only edge pixels
//!   inside both masks.
//! - Extracts boundary contours, relaxes the minimum-size filter until at
//!   least one survives, merges the survivors, and fits an ellipse.
//!
//! Modules
//! - [`params`] – configuration knobs with the reference defaults.
//! - `pipeline` – the [`PupilDetector`] implementation.
//!
//! The pipeline holds no state between invocations beyond the parameter set
//! and the optional region mask; recoverable conditions (degenerate
//! histogram, undersized contours) are absorbed internally and only the
//! found/not-found outcome surfaces.

pub mod params;
mod pipeline;

pub use params::PupilParams;
pub use pipeline::PupilDetector;
