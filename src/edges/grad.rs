//! Sobel image gradients at aperture 3 or 5.
//!
//! Computes per-pixel `gx`, `gy` by separable convolution (derivative kernel
//! along one axis, binomial smoothing along the other) with border clamping,
//! plus the L1 magnitude `|gx| + |gy|` that the hysteresis thresholds are
//! calibrated against.

use crate::image::{GrayImageU8, ImageF32, ImageView, ImageViewMut};

const DERIV_3: [f32; 3] = [-1.0, 0.0, 1.0];
const SMOOTH_3: [f32; 3] = [1.0, 2.0, 1.0];
const DERIV_5: [f32; 5] = [-1.0, -2.0, 0.0, 2.0, 1.0];
const SMOOTH_5: [f32; 5] = [1.0, 4.0, 6.0, 4.0, 1.0];

/// Per-pixel gradient buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative
    pub gx: ImageF32,
    /// Vertical derivative
    pub gy: ImageF32,
    /// L1 magnitude per pixel: `|gx| + |gy|`
    pub mag: ImageF32,
}

/// Compute Sobel gradients at the given aperture (3 or 5).
///
/// Unsupported apertures fall back to 3.
pub fn sobel_gradients(img: &GrayImageU8, aperture: usize) -> Grad {
    let (deriv, smooth): (&[f32], &[f32]) = if aperture == 5 {
        (&DERIV_5, &SMOOTH_5)
    } else {
        (&DERIV_3, &SMOOTH_3)
    };

    let luma = to_f32(img);
    let gx = separable(&luma, deriv, smooth);
    let gy = separable(&luma, smooth, deriv);

    let mut mag = ImageF32::new(img.w, img.h);
    for i in 0..mag.data.len() {
        mag.data[i] = gx.data[i].abs() + gy.data[i].abs();
    }

    Grad { gx, gy, mag }
}

fn to_f32(img: &GrayImageU8) -> ImageF32 {
    let mut out = ImageF32::new(img.w, img.h);
    for (dst, &src) in out.data.iter_mut().zip(img.data.iter()) {
        *dst = src as f32;
    }
    out
}

/// Convolve rows with `kx` and columns with `ky`, clamping at borders.
fn separable(l: &ImageF32, kx: &[f32], ky: &[f32]) -> ImageF32 {
    let (w, h) = (l.w, l.h);
    let rx = (kx.len() / 2) as i32;
    let ry = (ky.len() / 2) as i32;

    let mut tmp = ImageF32::new(w, h);
    for y in 0..h {
        let src = l.row(y);
        let dst = tmp.row_mut(y);
        for x in 0..w {
            let mut sum = 0.0;
            for (t, &kv) in kx.iter().enumerate() {
                let xx = (x as i32 + t as i32 - rx).clamp(0, w as i32 - 1) as usize;
                sum += src[xx] * kv;
            }
            dst[x] = sum;
        }
    }

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0;
            for (t, &kv) in ky.iter().enumerate() {
                let yy = (y as i32 + t as i32 - ry).clamp(0, h as i32 - 1) as usize;
                sum += tmp.get(x, yy) * kv;
            }
            out.set(x, y, sum);
        }
    }
    out
}
