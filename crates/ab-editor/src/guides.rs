//! Alignment guidelines and snapping.
//!
//! The moving box's edges and centre line are compared against the
//! artboard centre and every sibling's edges and centre line. A guideline
//! appears at the target coordinate whenever the distance is below the
//! tolerance. Computing guides never moves anything; [`snap_offset`] gives
//! the shift that puts the closest match exactly on its guide.

use ab_core::{Axis, Bounds, Geom, Guideline};

fn vertical_lines(b: &Bounds) -> [f64; 3] {
    [b.left, b.right, b.center_x]
}

fn horizontal_lines(b: &Bounds) -> [f64; 3] {
    [b.top, b.bottom, b.center_y]
}

fn targets(siblings: &[Bounds], artboard: Geom, axis: Axis) -> Vec<f64> {
    let board = artboard.bounds();
    let mut out = Vec::with_capacity(siblings.len() * 3 + 1);
    match axis {
        Axis::Vertical => {
            out.push(board.center_x);
            out.extend(siblings.iter().flat_map(vertical_lines));
        }
        Axis::Horizontal => {
            out.push(board.center_y);
            out.extend(siblings.iter().flat_map(horizontal_lines));
        }
    }
    out
}

fn moving_lines(moving: &Bounds, axis: Axis) -> [f64; 3] {
    match axis {
        Axis::Vertical => vertical_lines(moving),
        Axis::Horizontal => horizontal_lines(moving),
    }
}

/// Guidelines for a box being dragged. Each (axis, position) pair appears
/// once, vertical guides first.
pub fn compute_guides(moving: Bounds, siblings: &[Bounds], artboard: Geom, tolerance: f64) -> Vec<Guideline> {
    let mut guides: Vec<Guideline> = Vec::new();
    for axis in [Axis::Vertical, Axis::Horizontal] {
        let lines = moving_lines(&moving, axis);
        for target in targets(siblings, artboard, axis) {
            let hit = lines.iter().any(|m| (m - target).abs() < tolerance);
            let g = Guideline { axis, position: target };
            if hit && !guides.contains(&g) {
                guides.push(g);
            }
        }
    }
    guides
}

/// Offset `(dx, dy)` that moves the closest matching line of `moving` onto
/// its target, per axis. Zero on an axis without a match.
pub fn snap_offset(moving: Bounds, siblings: &[Bounds], artboard: Geom, tolerance: f64) -> (f64, f64) {
    let best = |axis: Axis| -> f64 {
        let lines = moving_lines(&moving, axis);
        let mut best: Option<f64> = None;
        for target in targets(siblings, artboard, axis) {
            for m in lines {
                let delta = target - m;
                if delta.abs() < tolerance && best.is_none_or(|b| delta.abs() < b.abs()) {
                    best = Some(delta);
                }
            }
        }
        best.unwrap_or(0.0)
    };
    (best(Axis::Vertical), best(Axis::Horizontal))
}
