//! Canny edge detection: non-maximum suppression on the gradient magnitude
//! followed by two-threshold hysteresis linking and gap bridging.
//!
//! NMS compares each pixel against its two neighbors along the quantized
//! gradient direction (4 sectors split at tan 22.5°) and keeps local maxima.
//! Hysteresis then seeds from pixels at or above the high threshold and
//! floods 8-connected weaker responses down to the low threshold. Where the
//! sector quantization flips along a curved boundary, NMS can drop a single
//! pixel and disconnect the boundary; a final pass re-admits those pixels so
//! a smooth closed boundary stays 8-connected.
//!
//! The outermost 1-pixel frame is ignored to keep neighbor lookups in
//! bounds.

use crate::edges::grad::{sobel_gradients, Grad};
use crate::image::{GrayImageU8, ImageF32, ImageView};

const TAN_22_5_DEG: f32 = 0.41421356237;

/// Detect edges on a (typically pre-blurred) grayscale image.
///
/// `low` is the weak-edge threshold, `high = low × ratio` the seed
/// threshold, both applied to the L1 gradient magnitude at `aperture`.
/// Returns a 0/255 edge map with the input dimensions.
pub fn canny_edges(img: &GrayImageU8, low: f32, ratio: f32, aperture: usize) -> GrayImageU8 {
    let grad = sobel_gradients(img, aperture);
    let high = low * ratio;

    let maxima = run_nms(&grad, low);
    let linked = link_hysteresis(&grad, &maxima, high);
    bridge_gaps(&linked, &grad.mag, low)
}

/// Suppress non-maximal magnitudes, keeping candidates at or above `low`.
fn run_nms(grad: &Grad, low: f32) -> GrayImageU8 {
    let w = grad.gx.w;
    let h = grad.gx.h;
    let mut out = GrayImageU8::new(w, h);
    if w < 3 || h < 3 {
        return out;
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag < low {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            // The two neighbors along the quantized gradient direction,
            // ordered so neighbor1 sits on the side the gradient points away
            // from. With the strict test against neighbor1 only, a
            // constant-slope ramp resolves to the same side of its magnitude
            // band on every scan line, so a closed boundary stays closed,
            // and a two-pixel plateau keeps exactly one pixel.
            let (neighbor1, neighbor2) = if abs_gy <= abs_gx * TAN_22_5_DEG {
                if gx >= 0.0 {
                    (mag_row[x - 1], mag_row[x + 1])
                } else {
                    (mag_row[x + 1], mag_row[x - 1])
                }
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                if gy >= 0.0 {
                    (mag_prev[x], mag_next[x])
                } else {
                    (mag_next[x], mag_prev[x])
                }
            } else if same_sign {
                if gx >= 0.0 {
                    (mag_prev[x - 1], mag_next[x + 1])
                } else {
                    (mag_next[x + 1], mag_prev[x - 1])
                }
            } else if gx >= 0.0 {
                (mag_next[x - 1], mag_prev[x + 1])
            } else {
                (mag_prev[x + 1], mag_next[x - 1])
            };

            if mag <= neighbor1 || mag < neighbor2 {
                continue;
            }

            out.set(x, y, 255);
        }
    }
    out
}

/// Keep maxima at or above `high` plus any maxima 8-connected to them.
fn link_hysteresis(grad: &Grad, maxima: &GrayImageU8, high: f32) -> GrayImageU8 {
    let (w, h) = (maxima.w, maxima.h);
    let mut out = GrayImageU8::new(w, h);
    let mut stack = Vec::new();

    for y in 0..h {
        for x in 0..w {
            if maxima.get(x, y) != 0 && grad.mag.get(x, y) >= high {
                out.set(x, y, 255);
                stack.push((x, y));
            }
        }
    }

    while let Some((x, y)) = stack.pop() {
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx < 0 || ny < 0 || nx >= w as i32 || ny >= h as i32 {
                    continue;
                }
                let (nx, ny) = (nx as usize, ny as usize);
                if maxima.get(nx, ny) != 0 && out.get(nx, ny) == 0 {
                    out.set(nx, ny, 255);
                    stack.push((nx, ny));
                }
            }
        }
    }
    out
}

// 8-neighborhood in circular order, for counting edge runs around a pixel.
const RING: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

/// Reconnect single-pixel breaks left by sector-quantized NMS.
///
/// A zero pixel whose 8-neighborhood holds two or more separate edge runs
/// sits between boundary fragments that suppression disconnected; it is
/// re-admitted when its own gradient magnitude clears the weak threshold.
/// Pixels merely alongside a line see one contiguous run and stay untouched,
/// so edges do not thicken.
fn bridge_gaps(edges: &GrayImageU8, mag: &ImageF32, low: f32) -> GrayImageU8 {
    let (w, h) = (edges.w as i32, edges.h as i32);
    let on =
        |x: i32, y: i32| x >= 0 && y >= 0 && x < w && y < h && edges.get(x as usize, y as usize) != 0;

    let mut out = edges.clone();
    for y in 0..h {
        for x in 0..w {
            if edges.get(x as usize, y as usize) != 0 || mag.get(x as usize, y as usize) < low {
                continue;
            }
            let mut runs = 0;
            for (i, &(dx, dy)) in RING.iter().enumerate() {
                let (px, py) = RING[(i + 7) % 8];
                if on(x + dx, y + dy) && !on(x + px, y + py) {
                    runs += 1;
                }
            }
            if runs >= 2 {
                out.set(x as usize, y as usize, 255);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_edge_produces_a_thin_vertical_line() {
        let mut img = GrayImageU8::new(20, 20);
        for y in 0..20 {
            for x in 10..20 {
                img.set(x, y, 255);
            }
        }
        let edges = canny_edges(&img, 100.0, 2.0, 3);
        // an edge column exists near the step
        let hits: usize = edges.data.iter().filter(|&&p| p != 0).count();
        assert!(hits > 0, "expected edge responses at the step");
        // all responses are clustered on the two columns around the step
        for y in 2..18 {
            for x in 0..20usize {
                if edges.get(x, y) != 0 {
                    assert!((9..=10).contains(&x), "stray edge at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn diagonal_step_edge_is_detected_on_every_row() {
        let mut img = GrayImageU8::new(24, 24);
        for y in 0..24 {
            for x in 0..24 {
                if x + y >= 24 {
                    img.set(x, y, 255);
                }
            }
        }
        let edges = canny_edges(&img, 100.0, 2.0, 3);
        for y in 2..22 {
            let hits = (0..24).filter(|&x| edges.get(x, y) != 0).count();
            assert!(hits >= 1, "no edge response on row {y}");
            for x in 0..24usize {
                if edges.get(x, y) != 0 {
                    let s = (x + y) as i32 - 24;
                    assert!((-2..=1).contains(&s), "stray edge at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn uniform_image_has_no_edges() {
        let img = GrayImageU8::from_raw(16, 16, vec![90u8; 256]);
        let edges = canny_edges(&img, 50.0, 2.0, 5);
        assert!(edges.data.iter().all(|&p| p == 0));
    }

    fn flat_magnitude(w: usize, h: usize, value: f32) -> ImageF32 {
        let mut mag = ImageF32::new(w, h);
        mag.data.iter_mut().for_each(|m| *m = value);
        mag
    }

    #[test]
    fn single_pixel_gap_between_fragments_is_bridged() {
        let mut edges = GrayImageU8::new(7, 7);
        for &(x, y) in &[(1, 1), (2, 2), (4, 4), (5, 5)] {
            edges.set(x, y, 255);
        }
        let out = bridge_gaps(&edges, &flat_magnitude(7, 7, 100.0), 50.0);
        assert_eq!(out.get(3, 3), 255, "gap between fragments should close");
    }

    #[test]
    fn pixels_alongside_a_line_are_left_alone() {
        let mut edges = GrayImageU8::new(7, 7);
        for x in 1..6 {
            edges.set(x, 3, 255);
        }
        let out = bridge_gaps(&edges, &flat_magnitude(7, 7, 100.0), 50.0);
        assert_eq!(out.data, edges.data, "a straight line must not thicken");
    }

    #[test]
    fn weak_gap_pixels_are_not_bridged() {
        let mut edges = GrayImageU8::new(7, 7);
        for &(x, y) in &[(1, 1), (2, 2), (4, 4), (5, 5)] {
            edges.set(x, y, 255);
        }
        let out = bridge_gaps(&edges, &flat_magnitude(7, 7, 10.0), 50.0);
        assert_eq!(out.get(3, 3), 0, "sub-threshold magnitude stays suppressed");
    }

    #[test]
    fn weak_isolated_responses_are_dropped() {
        // shallow ramp: gradients exist but stay below the high threshold
        let mut img = GrayImageU8::new(16, 16);
        for y in 0..16 {
            for x in 0..16 {
                img.set(x, y, (x * 4) as u8);
            }
        }
        let edges = canny_edges(&img, 200.0, 10.0, 3);
        assert!(edges.data.iter().all(|&p| p == 0));
    }
}
