use serde::Serialize;

/// Fitted pupil ellipse in image pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PupilEllipse {
    /// Ellipse center (x, y).
    pub center: (f32, f32),
    /// Full major axis length.
    pub major_axis: f32,
    /// Full minor axis length.
    pub minor_axis: f32,
    /// Rotation of the major axis from +x, in degrees.
    pub angle_deg: f32,
}

/// Per-frame detection outcome.
///
/// `ellipse` is `Some` exactly when `found` is true; a failed frame carries
/// no ellipse data at all.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PupilResult {
    pub found: bool,
    pub ellipse: Option<PupilEllipse>,
    pub latency_ms: f64,
}
