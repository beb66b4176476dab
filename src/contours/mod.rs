//! Connected boundary extraction via Suzuki–Abe border following.
//!
//! Walks the binary edge map row by row and traces every outer and hole
//! border it encounters, giving the two-level connectivity used by the
//! contour selector. Each contour is the ordered point sequence visited
//! during the trace; enumeration order follows the raster scan and is stable
//! for identical input.

pub mod select;

pub use select::{select_and_merge, Selection};

use crate::image::GrayImageU8;

/// Whether a traced border encloses foreground (outer) or background (hole).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContourKind {
    Outer,
    Hole,
}

/// One connected boundary: ordered points in (x, y) pixel coordinates.
#[derive(Clone, Debug)]
pub struct Contour {
    pub kind: ContourKind,
    pub points: Vec<[i32; 2]>,
}

impl Contour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// 8-neighborhood in clockwise order starting from "west".
const NEIGHBORS: [(i32, i32); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

// Direction indexes into NEIGHBORS.
const WEST: usize = 0;
const EAST: usize = 4;

/// Extract all borders from a 0/255 edge map.
pub fn extract_contours(edges: &GrayImageU8) -> Vec<Contour> {
    let (w, h) = (edges.w as i32, edges.h as i32);
    // label grid: 0 background, 1 unvisited foreground, |v| > 1 visited
    let mut f: Vec<i32> = edges.data.iter().map(|&p| i32::from(p != 0)).collect();
    let at = |x: i32, y: i32| (y * w + x) as usize;

    let mut contours = Vec::new();
    let mut nbd = 1i32;

    for y in 0..h {
        for x in 0..w {
            let fxy = f[at(x, y)];
            if fxy == 0 {
                continue;
            }

            let entry_dir;
            let kind;
            if fxy == 1 && (x == 0 || f[at(x - 1, y)] == 0) {
                // outer border start, entered from the west
                kind = ContourKind::Outer;
                entry_dir = WEST;
            } else if fxy >= 1 && (x == w - 1 || f[at(x + 1, y)] == 0) {
                // hole border start, entered from the east
                kind = ContourKind::Hole;
                entry_dir = EAST;
            } else {
                continue;
            }

            nbd += 1;
            let points = trace_border(&mut f, w, h, (x, y), entry_dir, nbd);
            contours.push(Contour { kind, points });
        }
    }
    contours
}

/// Follow one border starting at `p0`, marking visited pixels with `±nbd`.
fn trace_border(
    f: &mut [i32],
    w: i32,
    h: i32,
    p0: (i32, i32),
    entry_dir: usize,
    nbd: i32,
) -> Vec<[i32; 2]> {
    let at = |x: i32, y: i32| (y * w + x) as usize;
    let in_bounds = |x: i32, y: i32| x >= 0 && y >= 0 && x < w && y < h;
    let nonzero = |f: &[i32], x: i32, y: i32| in_bounds(x, y) && f[at(x, y)] != 0;

    let mut points = Vec::new();

    // step 1: clockwise search around p0 from the entry neighbor
    let mut first = None;
    for s in 0..8 {
        let dir = (entry_dir + s) % 8; // clockwise
        let (dx, dy) = NEIGHBORS[dir];
        let q = (p0.0 + dx, p0.1 + dy);
        if nonzero(f, q.0, q.1) {
            first = Some((q, dir));
            break;
        }
    }
    let Some((p1, dir1)) = first else {
        // isolated pixel
        f[at(p0.0, p0.1)] = -nbd;
        points.push([p0.0, p0.1]);
        return points;
    };

    // step 2/3: counterclockwise walks until we return to the start edge;
    // back_dir always points from the current pixel to the previous one
    let mut cur = p0;
    let mut back_dir = dir1;
    loop {
        // default to stepping back to the previous pixel, which is always
        // nonzero; the search below can only improve on it
        let (bdx, bdy) = NEIGHBORS[back_dir];
        let mut next = (cur.0 + bdx, cur.1 + bdy);
        let mut next_dir = back_dir;
        let mut crossed_east_zero = false;
        for s in 1..8 {
            let dir = (back_dir + 8 - s) % 8; // counterclockwise
            let (dx, dy) = NEIGHBORS[dir];
            let q = (cur.0 + dx, cur.1 + dy);
            if nonzero(f, q.0, q.1) {
                next = q;
                next_dir = dir;
                break;
            }
            if dir == EAST {
                // examined the east neighbor and found it empty
                crossed_east_zero = true;
            }
        }

        let idx = at(cur.0, cur.1);
        if crossed_east_zero {
            f[idx] = -nbd;
        } else if f[idx] == 1 {
            f[idx] = nbd;
        }
        points.push([cur.0, cur.1]);

        if next == p0 && cur == p1 {
            break;
        }
        back_dir = (next_dir + 4) % 8;
        cur = next;
    }
    points
}
