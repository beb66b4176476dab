//! Working-image construction: optional region-of-interest masking followed
//! by a linear min/max contrast stretch.
//!
//! The ROI mask forces everything outside the eligible region to full white.
//! The pupil is the darkest structure in the frame, so white filler can never
//! be picked up by the dark-candidate mask downstream.
//!
//! The stretch maps the observed min/max intensity onto [0, 255]. This keeps
//! the histogram spike positions comparable across cameras and exposure
//! settings without reshaping the distribution the way equalization would.

use crate::image::{GrayImageU8, ImageU8};

/// Build the normalized working image from a source frame and an optional
/// same-size ROI mask (0 = excluded, nonzero = eligible).
///
/// Empty input or a mask of mismatched dimensions is a caller error.
pub fn build_working_image(src: &ImageU8<'_>, region_mask: Option<&GrayImageU8>) -> GrayImageU8 {
    assert!(src.w > 0 && src.h > 0, "empty source image");

    let mut work = GrayImageU8::from_view(src);

    if let Some(mask) = region_mask {
        assert_eq!(
            (mask.w, mask.h),
            (work.w, work.h),
            "region mask dimensions must match the frame"
        );
        for (px, &m) in work.data.iter_mut().zip(mask.data.iter()) {
            if m == 0 {
                *px = 255;
            }
        }
    }

    stretch_min_max(&mut work);
    work
}

/// Linearly rescale pixel values so the observed minimum maps to 0 and the
/// observed maximum to 255. A constant image is left unchanged.
pub fn stretch_min_max(img: &mut GrayImageU8) {
    let mut lo = u8::MAX;
    let mut hi = u8::MIN;
    for &px in &img.data {
        lo = lo.min(px);
        hi = hi.max(px);
    }
    if hi == lo {
        return;
    }

    let span = (hi - lo) as u32;
    for px in &mut img.data {
        let v = (*px - lo) as u32;
        *px = ((v * 255 + span / 2) / span) as u8;
    }
}
