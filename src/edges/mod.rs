//! Edge extraction and mask-based pruning.
//!
//! - Box blur before differentiation ([`blur`]).
//! - Sobel gradients at aperture 3/5 ([`grad`]).
//! - Canny NMS + hysteresis ([`canny`]).
//! - [`prune_edges`]: pixel-wise minimum of the edge map and the two region
//!   masks, discarding boundaries that are not simultaneously inside the
//!   dark-candidate region and outside the glint.

pub mod blur;
pub mod canny;
pub mod grad;

pub use blur::box_blur;
pub use canny::canny_edges;
pub use grad::{sobel_gradients, Grad};

use crate::image::GrayImageU8;

/// Keep an edge pixel only where both masks are set.
///
/// All three planes are 0/255, so the pixel-wise minimum is the intersection.
pub fn prune_edges(edges: &GrayImageU8, dark: &GrayImageU8, glint: &GrayImageU8) -> GrayImageU8 {
    debug_assert_eq!(edges.data.len(), dark.data.len());
    debug_assert_eq!(edges.data.len(), glint.data.len());

    let mut out = GrayImageU8::new(edges.w, edges.h);
    for i in 0..out.data.len() {
        out.data[i] = edges.data[i].min(dark.data[i]).min(glint.data[i]);
    }
    out
}
