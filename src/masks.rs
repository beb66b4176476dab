//! Binary region masks and elliptical-kernel morphology.
//!
//! Two masks gate the edge map:
//! - the dark mask marks plausible pupil interior (low intensity), dilated
//!   twice so it reaches slightly past the apparent pupil boundary where the
//!   gradient edges actually sit;
//! - the glint mask marks everything except the brightest specular pixels,
//!   eroded once so edges immediately ringing a glint survive while the
//!   glint itself is still cut out.
//!
//! Masks use 0/255 values and always match the working image dimensions.

use crate::histogram::SpikeBounds;
use crate::image::GrayImageU8;

/// Radius of the elliptical structuring neighborhood (7×7 kernel).
const STRUCT_RADIUS: i32 = 3;

/// Threshold an image into a 0/255 mask: 255 where intensity ≤ `upper`.
pub fn in_range_mask(img: &GrayImageU8, upper: u8) -> GrayImageU8 {
    let mut mask = GrayImageU8::new(img.w, img.h);
    for (out, &px) in mask.data.iter_mut().zip(img.data.iter()) {
        *out = if px <= upper { 255 } else { 0 };
    }
    mask
}

/// Build the pupil-candidate mask: dark pixels, dilated twice.
pub fn dark_mask(work: &GrayImageU8, bounds: SpikeBounds, pupil_offset: u8) -> GrayImageU8 {
    let cutoff = bounds.lowest.saturating_add(pupil_offset);
    let mut mask = in_range_mask(work, cutoff);
    mask = dilate(&mask);
    mask = dilate(&mask);
    mask
}

/// Build the non-glint mask: everything below the bright mode, eroded once.
pub fn glint_mask(work: &GrayImageU8, bounds: SpikeBounds, glint_offset: u8) -> GrayImageU8 {
    let cutoff = bounds.highest.saturating_sub(glint_offset);
    let mask = in_range_mask(work, cutoff);
    erode(&mask)
}

/// Offsets covered by the elliptical structuring neighborhood.
fn struct_offsets() -> Vec<(i32, i32)> {
    let r = STRUCT_RADIUS;
    let mut offsets = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                offsets.push((dx, dy));
            }
        }
    }
    offsets
}

/// Binary dilation: a pixel becomes 255 if any neighbor under the kernel is 255.
pub fn dilate(mask: &GrayImageU8) -> GrayImageU8 {
    morph(mask, true)
}

/// Binary erosion: a pixel stays 255 only if every in-bounds neighbor under
/// the kernel is 255.
pub fn erode(mask: &GrayImageU8) -> GrayImageU8 {
    morph(mask, false)
}

fn morph(mask: &GrayImageU8, grow: bool) -> GrayImageU8 {
    let offsets = struct_offsets();
    let (w, h) = (mask.w as i32, mask.h as i32);
    let mut out = GrayImageU8::new(mask.w, mask.h);

    for y in 0..h {
        for x in 0..w {
            let mut hit = !grow;
            for &(dx, dy) in &offsets {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= w || ny >= h {
                    continue;
                }
                let on = mask.get(nx as usize, ny as usize) != 0;
                if grow && on {
                    hit = true;
                    break;
                }
                if !grow && !on {
                    hit = false;
                    break;
                }
            }
            if hit {
                out.set(x as usize, y as usize, 255);
            }
        }
    }
    out
}
