//! Contour size filtering with relaxation, and point-set merging.
//!
//! Starting from the configured minimum contour size, every contour at least
//! that long is marked mergeable. If none qualifies, the effective threshold
//! drops by 2 and the filter reruns. The threshold is floored at one point,
//! so with a nonempty contour list the loop always terminates — at worst by
//! admitting everything.

use super::Contour;

/// Outcome of the size filter: per-contour flags plus the merged point set.
#[derive(Clone, Debug)]
pub struct Selection {
    /// Parallel to the contour list; true where the contour was merged.
    pub mergeable: Vec<bool>,
    /// Concatenated points of every mergeable contour, in enumeration order.
    pub merged: Vec<[i32; 2]>,
    /// The threshold the filter finally settled on.
    pub effective_min: usize,
}

/// Filter contours by size, relaxing the threshold until at least one
/// qualifies. Returns `None` when the contour list is empty.
pub fn select_and_merge(contours: &[Contour], min_contour_size: usize) -> Option<Selection> {
    if contours.is_empty() {
        return None;
    }

    let mut threshold = min_contour_size.max(1);
    let mergeable = loop {
        let flags: Vec<bool> = contours.iter().map(|c| c.len() >= threshold).collect();
        if flags.iter().any(|&m| m) {
            break flags;
        }
        // relax by 2 per round, floored at a single point
        threshold = threshold.saturating_sub(2).max(1);
    };

    let merged: Vec<[i32; 2]> = contours
        .iter()
        .zip(mergeable.iter())
        .filter(|(_, &m)| m)
        .flat_map(|(c, _)| c.points.iter().copied())
        .collect();

    Some(Selection {
        mergeable,
        merged,
        effective_min: threshold,
    })
}
