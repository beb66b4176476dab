//! Structured diagnostics for the detection pipeline.
//!
//! When `debug_capture` is enabled, the detector snapshots every
//! intermediate plane into a [`PipelineTrace`] in stage order. The trace is
//! purely observational side output for external tiling/display tools; the
//! core never renders or arranges anything itself.

use crate::image::GrayImageU8;
use serde::Serialize;

use crate::types::PupilResult;

/// The pipeline stage an intermediate image was captured from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    NormalizedGray,
    DarkMask,
    GlintMask,
    Blurred,
    RawEdges,
    PrunedEdges,
    AllContours,
    FilteredContours,
}

impl StageKind {
    /// Stable lowercase label, usable as a file stem.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NormalizedGray => "normalized_gray",
            Self::DarkMask => "dark_mask",
            Self::GlintMask => "glint_mask",
            Self::Blurred => "blurred",
            Self::RawEdges => "raw_edges",
            Self::PrunedEdges => "pruned_edges",
            Self::AllContours => "all_contours",
            Self::FilteredContours => "filtered_contours",
        }
    }
}

/// One captured intermediate image.
#[derive(Clone, Debug)]
pub struct StageImage {
    pub kind: StageKind,
    pub image: GrayImageU8,
}

/// Ordered sequence of intermediate images from one invocation.
#[derive(Clone, Debug, Default)]
pub struct PipelineTrace {
    pub stages: Vec<StageImage>,
}

impl PipelineTrace {
    pub fn push(&mut self, kind: StageKind, image: GrayImageU8) {
        self.stages.push(StageImage { kind, image });
    }
}

/// Detection outcome plus the optional stage trace.
#[derive(Clone, Debug)]
pub struct DetectionReport {
    pub pupil: PupilResult,
    /// Present only when the detector ran with `debug_capture` enabled.
    pub trace: Option<PipelineTrace>,
}
