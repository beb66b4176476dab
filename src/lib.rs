#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod image;
pub mod types;

// Lower-level building blocks. Public for reuse, but not a stability promise.
pub mod conic;
pub mod contours;
pub mod edges;
pub mod histogram;
pub mod masks;
pub mod preprocess;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{PupilDetector, PupilParams};
pub use crate::types::{PupilEllipse, PupilResult};

// Diagnostics returned alongside the result.
pub use crate::diagnostics::{DetectionReport, PipelineTrace, StageKind};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use pupil_detector::prelude::*;
///
/// # fn main() {
/// let (w, h) = (640usize, 360usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// let det = PupilDetector::new(PupilParams::default());
/// let report = det.process(img);
/// println!("found={} latency_ms={:.3}", report.pupil.found, report.pupil.latency_ms);
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{GrayImageU8, ImageU8};
    pub use crate::{DetectionReport, PupilDetector, PupilParams, PupilResult};
}
