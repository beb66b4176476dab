//! Parameter types configuring the detector stages.
//!
//! Defaults come from tuning against 640×360 IR eye-camera footage; the most
//! load-bearing knobs are the two intensity offsets (how far past the
//! histogram spikes the masks reach) and the minimum contour size.

use serde::Deserialize;

/// Detector-wide parameters. One set applies uniformly to one invocation;
/// nothing here is mutated during a run.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PupilParams {
    /// Box-blur kernel size applied before edge detection; ≤ 1 disables.
    pub blur_kernel_size: usize,
    /// Canny low (weak-edge) threshold on the L1 gradient magnitude.
    pub edge_threshold: f32,
    /// The high threshold is `edge_threshold × edge_threshold_ratio`.
    pub edge_threshold_ratio: f32,
    /// Sobel aperture used by the edge detector (3 or 5).
    pub edge_aperture: usize,
    /// Dark-mask cutoff offset above the lowest histogram spike.
    pub pupil_intensity_offset: u8,
    /// Glint-mask cutoff offset below the highest histogram spike.
    pub glint_intensity_offset: u8,
    /// Minimum contour point count before the relaxation loop kicks in.
    pub min_contour_size: usize,
    /// Capture every intermediate image into the report's trace.
    pub debug_capture: bool,
}

impl Default for PupilParams {
    fn default() -> Self {
        Self {
            blur_kernel_size: 5,
            edge_threshold: 159.0,
            edge_threshold_ratio: 2.0,
            edge_aperture: 5,
            pupil_intensity_offset: 11,
            glint_intensity_offset: 5,
            min_contour_size: 80,
            debug_capture: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_tracker() {
        let p = PupilParams::default();
        assert_eq!(p.blur_kernel_size, 5);
        assert_eq!(p.edge_threshold, 159.0);
        assert_eq!(p.edge_threshold_ratio, 2.0);
        assert_eq!(p.edge_aperture, 5);
        assert_eq!(p.pupil_intensity_offset, 11);
        assert_eq!(p.glint_intensity_offset, 5);
        assert_eq!(p.min_contour_size, 80);
        assert!(!p.debug_capture);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let p: PupilParams =
            serde_json::from_str(r#"{"min_contour_size": 40, "debug_capture": true}"#).unwrap();
        assert_eq!(p.min_contour_size, 40);
        assert!(p.debug_capture);
        assert_eq!(p.blur_kernel_size, 5);
    }
}
