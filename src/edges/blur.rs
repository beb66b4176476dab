//! Separable box blur on 8-bit images with clamped borders.

use crate::image::GrayImageU8;

/// Box-blur `img` with a `k × k` kernel. Kernel sizes ≤ 1 return the input
/// unchanged.
pub fn box_blur(img: &GrayImageU8, k: usize) -> GrayImageU8 {
    if k <= 1 {
        return img.clone();
    }
    let (w, h) = (img.w, img.h);
    let lo = -((k / 2) as i32);
    let hi = lo + k as i32 - 1;

    // horizontal pass, keeping integer sums
    let mut tmp = vec![0u32; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0u32;
            for d in lo..=hi {
                let xx = (x as i32 + d).clamp(0, w as i32 - 1) as usize;
                sum += img.get(xx, y) as u32;
            }
            tmp[y * w + x] = sum;
        }
    }

    // vertical pass with rounded division by the kernel area
    let area = (k * k) as u32;
    let mut out = GrayImageU8::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0u32;
            for d in lo..=hi {
                let yy = (y as i32 + d).clamp(0, h as i32 - 1) as usize;
                sum += tmp[yy * w + x];
            }
            out.set(x, y, ((sum + area / 2) / area) as u8);
        }
    }
    out
}
