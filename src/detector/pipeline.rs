//! Detector pipeline orchestrating single-frame pupil detection.
//!
//! The [`PupilDetector`] exposes a simple API: feed an eye image and get the
//! best-fit pupil ellipse with optional stage-by-stage diagnostics.
//! Internally it runs preprocessing, histogram-driven threshold estimation,
//! mask construction, Canny edge extraction with mask pruning, and contour
//! selection + ellipse fitting, strictly in that order.
//!
//! Typical usage:
//! ```no_run
//! use pupil_detector::{PupilDetector, PupilParams};
//! use pupil_detector::image::ImageU8;
//!
//! # fn example(gray: ImageU8) {
//! let detector = PupilDetector::new(PupilParams::default());
//! let report = detector.process(gray);
//! if report.pupil.found {
//!     let e = report.pupil.ellipse.unwrap();
//!     println!("pupil at ({:.1}, {:.1})", e.center.0, e.center.1);
//! }
//! # }
//! ```

use log::debug;
use std::time::Instant;

use super::params::PupilParams;
use crate::conic::fit_ellipse_direct;
use crate::contours::{extract_contours, select_and_merge, Contour};
use crate::diagnostics::{DetectionReport, PipelineTrace, StageKind};
use crate::edges::{box_blur, canny_edges, prune_edges};
use crate::histogram::{find_spike_bounds, Histogram};
use crate::image::{GrayImageU8, ImageU8};
use crate::masks::{dark_mask, glint_mask};
use crate::preprocess::build_working_image;
use crate::types::{PupilEllipse, PupilResult};

/// Single-frame pupil detector.
///
/// Holds only the configured parameters and an optional region-of-interest
/// mask; every image buffer is scoped to one `process` call. One detector
/// instance serves one calling thread.
pub struct PupilDetector {
    params: PupilParams,
    region_mask: Option<GrayImageU8>,
}

impl PupilDetector {
    /// Create a detector with the supplied parameters.
    pub fn new(params: PupilParams) -> Self {
        Self {
            params,
            region_mask: None,
        }
    }

    /// Restrict detection to the nonzero area of `mask` (same dimensions as
    /// the frames that will be processed). Stays in effect until cleared.
    pub fn set_region_mask(&mut self, mask: GrayImageU8) {
        self.region_mask = Some(mask);
    }

    /// Remove the region-of-interest restriction.
    pub fn clear_region_mask(&mut self) {
        self.region_mask = None;
    }

    /// Replace the parameter set for subsequent invocations.
    pub fn set_params(&mut self, params: PupilParams) {
        self.params = params;
    }

    pub fn params(&self) -> &PupilParams {
        &self.params
    }

    /// Run the full pipeline on one frame.
    pub fn process(&self, eye: ImageU8<'_>) -> DetectionReport {
        let total_start = Instant::now();
        let p = &self.params;
        let mut trace = p.debug_capture.then(PipelineTrace::default);

        // stage 1: normalized working image (ROI-restricted if set)
        let work = build_working_image(&eye, self.region_mask.as_ref());
        capture(&mut trace, StageKind::NormalizedGray, &work);

        // stage 2: spike bounds from the intensity histogram
        let hist = Histogram::compute(&work);
        let bounds = find_spike_bounds(&hist);
        debug!(
            "spike bounds: lowest={} highest={} spikes={}",
            bounds.lowest, bounds.highest, bounds.num_spikes
        );

        // stage 3: candidate-pupil and non-glint masks
        let dark = dark_mask(&work, bounds, p.pupil_intensity_offset);
        capture(&mut trace, StageKind::DarkMask, &dark);
        let glint = glint_mask(&work, bounds, p.glint_intensity_offset);
        capture(&mut trace, StageKind::GlintMask, &glint);

        // stage 4: edges on the blurred image, pruned to both masks
        let blurred = box_blur(&work, p.blur_kernel_size);
        capture(&mut trace, StageKind::Blurred, &blurred);
        let edges = canny_edges(
            &blurred,
            p.edge_threshold,
            p.edge_threshold_ratio,
            p.edge_aperture,
        );
        capture(&mut trace, StageKind::RawEdges, &edges);
        let pruned = prune_edges(&edges, &dark, &glint);
        capture(&mut trace, StageKind::PrunedEdges, &pruned);

        // stage 5: contour selection and ellipse fit
        let contours = extract_contours(&pruned);
        debug!("extracted {} contours", contours.len());

        let selection = select_and_merge(&contours, p.min_contour_size);
        if let Some(t) = trace.as_mut() {
            let flags = selection
                .as_ref()
                .map(|s| s.mergeable.as_slice())
                .unwrap_or(&[]);
            t.push(
                StageKind::AllContours,
                rasterize_contours(&contours, None, pruned.w, pruned.h),
            );
            t.push(
                StageKind::FilteredContours,
                rasterize_contours(&contours, Some(flags), pruned.w, pruned.h),
            );
        }

        let ellipse = selection.as_ref().and_then(|sel| {
            debug!(
                "merging {} contours at effective min size {}",
                sel.mergeable.iter().filter(|&&m| m).count(),
                sel.effective_min
            );
            fit_merged(&sel.merged)
        });

        let pupil = PupilResult {
            found: ellipse.is_some(),
            ellipse,
            latency_ms: total_start.elapsed().as_secs_f64() * 1000.0,
        };
        DetectionReport { pupil, trace }
    }
}

fn capture(trace: &mut Option<PipelineTrace>, kind: StageKind, image: &GrayImageU8) {
    if let Some(t) = trace.as_mut() {
        t.push(kind, image.clone());
    }
}

/// Draw contour chains as 255-valued pixels on a zeroed frame. With `flags`,
/// only the contours marked true are drawn.
fn rasterize_contours(
    contours: &[Contour],
    flags: Option<&[bool]>,
    w: usize,
    h: usize,
) -> GrayImageU8 {
    let mut out = GrayImageU8::new(w, h);
    for (i, contour) in contours.iter().enumerate() {
        if let Some(flags) = flags {
            if !flags.get(i).copied().unwrap_or(false) {
                continue;
            }
        }
        for &[x, y] in &contour.points {
            out.set(x as usize, y as usize, 255);
        }
    }
    out
}

/// Fit the merged point set, converting to full axes and degrees.
fn fit_merged(points: &[[i32; 2]]) -> Option<PupilEllipse> {
    let pts: Vec<[f64; 2]> = points
        .iter()
        .map(|&[x, y]| [x as f64, y as f64])
        .collect();
    let e = fit_ellipse_direct(&pts)?;
    Some(PupilEllipse {
        center: (e.cx as f32, e.cy as f32),
        major_axis: (2.0 * e.a) as f32,
        minor_axis: (2.0 * e.b) as f32,
        angle_deg: e.angle.to_degrees() as f32,
    })
}
