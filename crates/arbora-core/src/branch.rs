//! Branch geometry builder.
//!
//! Turns `(slot, progress)` into a sagging cubic spine plus a closed tapered
//! outline. Length follows a square-root curve so early progress yields
//! disproportionately larger visible growth, and even 0% produces a visible
//! stub. Total over all real inputs: progress is clamped, never rejected.

use crate::config::{BranchTuning, Slot};
use crate::geom::{CubicBezier, PathSeg, Point, clamp_progress, lerp};
use crate::model::BranchGeometry;

/// Branch length for a given progress, before sag is applied.
pub fn branch_length(slot: &Slot, progress: f64, tuning: &BranchTuning) -> f64 {
    let ratio = clamp_progress(progress) / 100.0;
    let reach = (slot.max_length - tuning.min_length).max(0.0);
    tuning.min_length + ratio.sqrt() * reach
}

pub fn build_branch(slot: &Slot, progress: f64, tuning: &BranchTuning) -> BranchGeometry {
    let ratio = clamp_progress(progress) / 100.0;
    let length = branch_length(slot, progress, tuning);

    let origin = slot.origin();
    let angle = slot.angle_deg.to_radians();
    let dir = crate::geom::vector(angle.cos(), angle.sin());

    // Gravity illusion: control points displace downwards progressively more
    // toward the tip, by a fixed fraction of the branch length.
    let sag = tuning.sag_ratio * length;
    let p1 = origin + dir * (length / 3.0) + crate::geom::vector(0.0, sag * 0.25);
    let p2 = origin + dir * (length * 2.0 / 3.0) + crate::geom::vector(0.0, sag * 0.6);
    let p3 = origin + dir * length + crate::geom::vector(0.0, sag);
    let spine = CubicBezier::new(origin, p1, p2, p3);

    let root_half_width = lerp(tuning.min_half_width, slot.base_half_width, ratio)
        .max(tuning.min_half_width);
    let outline = tapered_outline(&spine, root_half_width, tuning.tip_half_width);

    BranchGeometry {
        spine,
        outline,
        tip_x: p3.x,
        tip_y: p3.y,
        length,
        root_half_width,
    }
}

/// Offsets the spine perpendicular to its tangent on both sides, with the
/// half-width interpolated linearly from root to tip, and joins the two
/// offset curves into one closed ribbon.
fn tapered_outline(spine: &CubicBezier, root_hw: f64, tip_hw: f64) -> Vec<PathSeg> {
    let width_at = |t: f64| lerp(root_hw, tip_hw, t);
    let offset_at = |t: f64, sign: f64| -> Point {
        let p = spine.eval(t);
        let n = spine.unit_normal(t);
        p + n * (width_at(t) * sign)
    };

    let root_left = offset_at(0.0, 1.0);
    let c1_left = offset_at(1.0 / 3.0, 1.0);
    let c2_left = offset_at(2.0 / 3.0, 1.0);
    let tip_left = offset_at(1.0, 1.0);

    let tip_right = offset_at(1.0, -1.0);
    let c2_right = offset_at(2.0 / 3.0, -1.0);
    let c1_right = offset_at(1.0 / 3.0, -1.0);
    let root_right = offset_at(0.0, -1.0);

    vec![
        PathSeg::move_to(root_left),
        PathSeg::curve_to(c1_left, c2_left, tip_left),
        PathSeg::line_to(tip_right),
        PathSeg::curve_to(c2_right, c1_right, root_right),
        PathSeg::Close,
    ]
}
