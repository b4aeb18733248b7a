//! Leaf / twig / blossom / fruit placement along a branch.
//!
//! Counts and positions are pure functions of the entity seed, the branch
//! spine, progress, and overdue count. Each family draws from its own index
//! window of the seeded stream so adding leaves never reshuffles blossoms.

use crate::geom::clamp_progress;
use crate::model::{BranchGeometry, DepthLayer, Ornament, OrnamentKind};
use crate::rng::next_float;
use crate::stage;

// Per-family index windows into the seeded stream.
const LEAF_STREAM: u64 = 100;
const TWIG_STREAM: u64 = 400;
const BLOSSOM_STREAM: u64 = 600;

/// No leaves sprout below this progress.
const LEAF_FLOOR: f64 = 10.0;
/// Leaf count stops growing here to avoid clutter at 100%.
const LEAF_SATURATION: f64 = 97.0;

/// Leaves sit on the outer part of the spine, denser toward the tip.
const LEAF_T_MIN: f64 = 0.42;
const LEAF_T_MAX: f64 = 0.97;

/// Fixed angular offsets (degrees, relative to the tip tangent) for twigs.
/// The first two unlock at 25% progress, all four at 50%.
const TWIG_ANGLES_DEG: [f64; 4] = [-28.0, 22.0, -52.0, 46.0];

fn depth_layer(index: usize) -> DepthLayer {
    match index % 3 {
        0 => DepthLayer::Back,
        1 => DepthLayer::Mid,
        _ => DepthLayer::Front,
    }
}

fn leaf_count(progress: f64) -> usize {
    if progress < LEAF_FLOOR {
        return 0;
    }
    let effective = progress.min(LEAF_SATURATION);
    (4.0 + (effective - LEAF_FLOOR) * 0.16).round() as usize
}

fn twig_count(progress: f64) -> usize {
    if progress >= 50.0 {
        4
    } else if progress >= 25.0 {
        2
    } else {
        0
    }
}

fn blossom_count(progress: f64) -> usize {
    if !(80.0..100.0).contains(&progress) {
        return 0;
    }
    let maturity = stage::classify(progress).maturity;
    1 + (maturity * 4.0).round() as usize
}

/// Scatters all ornament instances for one branch. Deterministic: identical
/// inputs reproduce an identical list bit-for-bit.
pub fn place_ornaments(
    seed: u64,
    branch: &BranchGeometry,
    progress: f64,
    overdue: u32,
) -> Vec<Ornament> {
    let p = clamp_progress(progress);
    let spine = &branch.spine;
    let mut out = Vec::new();

    // Leaves.
    let leaves = leaf_count(p);
    let yellow_total = leaves.min(overdue as usize * 2);
    let yellow_stride = if yellow_total > 0 {
        leaves / yellow_total
    } else {
        0
    };
    for i in 0..leaves {
        let base = LEAF_STREAM + (i as u64) * 4;
        // Bias the parametric position toward the tip.
        let t = LEAF_T_MIN + (LEAF_T_MAX - LEAF_T_MIN) * next_float(seed, base).powf(0.6);
        let side = if i % 2 == 0 { 1.0 } else { -1.0 };
        let offset = 2.0 + next_float(seed, base + 1) * 4.0;
        let pos = spine.eval(t) + spine.unit_normal(t) * (side * offset);
        let spread = (next_float(seed, base + 2) - 0.5) * 76.0;
        let rotation_deg = spine.tangent_angle_deg(t) + spread;
        let size = 9.0 + next_float(seed, base + 3) * 13.0;
        // Modulo selection spreads yellowed leaves evenly along the branch
        // instead of clustering them.
        let yellowed = yellow_stride > 0 && i % yellow_stride == 0 && i / yellow_stride < yellow_total;
        out.push(Ornament {
            kind: OrnamentKind::Leaf { yellowed },
            x: pos.x,
            y: pos.y,
            size,
            rotation_deg,
            layer: depth_layer(i),
        });
    }

    // Twigs: short stubs fanning out from the tip.
    let tip_angle = spine.tangent_angle_deg(1.0);
    for (i, angle) in TWIG_ANGLES_DEG.iter().enumerate().take(twig_count(p)) {
        let jitter = next_float(seed, TWIG_STREAM + i as u64) * 3.0;
        out.push(Ornament {
            kind: OrnamentKind::Twig,
            x: branch.tip_x,
            y: branch.tip_y,
            size: 12.0 + 10.0 * (p / 100.0) + jitter,
            rotation_deg: tip_angle + angle,
            layer: DepthLayer::Mid,
        });
    }

    // Blossoms: only inside the 80..100 band, crowding the tip.
    for i in 0..blossom_count(p) {
        let base = BLOSSOM_STREAM + (i as u64) * 3;
        let t = 0.68 + next_float(seed, base) * 0.30;
        let side = if i % 2 == 0 { 1.0 } else { -1.0 };
        let pos = spine.eval(t) + spine.unit_normal(t) * (side * (1.5 + next_float(seed, base + 1) * 3.0));
        out.push(Ornament {
            kind: OrnamentKind::Blossom,
            x: pos.x,
            y: pos.y,
            size: 7.0 + next_float(seed, base + 1) * 4.0,
            rotation_deg: next_float(seed, base + 2) * 360.0,
            layer: DepthLayer::Front,
        });
    }

    // Fruit: exactly one at full completion, anchored just above the tip.
    if p >= 100.0 {
        out.push(Ornament {
            kind: OrnamentKind::Fruit,
            x: branch.tip_x,
            y: branch.tip_y - 8.0,
            size: 13.0,
            rotation_deg: 0.0,
            layer: DepthLayer::Front,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::build_branch;
    use crate::config::{BranchTuning, TreeConfig};
    use crate::rng::seed_from_id;

    fn ornaments_at(progress: f64, overdue: u32) -> Vec<Ornament> {
        let slot = TreeConfig::default().slots[1];
        let branch = build_branch(&slot, progress, &BranchTuning::default());
        place_ornaments(seed_from_id("tech"), &branch, progress, overdue)
    }

    fn count_kind(ornaments: &[Ornament], f: impl Fn(&OrnamentKind) -> bool) -> usize {
        ornaments.iter().filter(|o| f(&o.kind)).count()
    }

    #[test]
    fn blossoms_gate_exactly_at_eighty() {
        let below = ornaments_at(79.0, 0);
        let at = ornaments_at(80.0, 0);
        assert_eq!(count_kind(&below, |k| matches!(k, OrnamentKind::Blossom)), 0);
        assert!(count_kind(&at, |k| matches!(k, OrnamentKind::Blossom)) >= 1);
    }

    #[test]
    fn fruit_only_at_full_completion() {
        let partial = ornaments_at(99.9, 0);
        let full = ornaments_at(100.0, 0);
        assert_eq!(count_kind(&partial, |k| matches!(k, OrnamentKind::Fruit)), 0);
        assert_eq!(count_kind(&full, |k| matches!(k, OrnamentKind::Fruit)), 1);
        // Blossoms hand over to the fruit at 100; the 80..100 band's maximum
        // count is never exceeded at the boundary.
        assert_eq!(count_kind(&full, |k| matches!(k, OrnamentKind::Blossom)), 0);
        let band_max = ornaments_at(99.9, 0);
        assert!(count_kind(&band_max, |k| matches!(k, OrnamentKind::Blossom)) <= 5);
    }

    #[test]
    fn leaves_floor_and_saturate() {
        assert_eq!(count_kind(&ornaments_at(9.9, 0), |k| matches!(k, OrnamentKind::Leaf { .. })), 0);
        assert!(count_kind(&ornaments_at(10.0, 0), |k| matches!(k, OrnamentKind::Leaf { .. })) >= 4);
        let near = count_kind(&ornaments_at(97.0, 0), |k| matches!(k, OrnamentKind::Leaf { .. }));
        let full = count_kind(&ornaments_at(99.0, 0), |k| matches!(k, OrnamentKind::Leaf { .. }));
        assert_eq!(near, full, "leaf count saturates near 97%");
    }

    #[test]
    fn twig_thresholds_form_a_two_level_ladder() {
        assert_eq!(count_kind(&ornaments_at(24.9, 0), |k| matches!(k, OrnamentKind::Twig)), 0);
        assert_eq!(count_kind(&ornaments_at(25.0, 0), |k| matches!(k, OrnamentKind::Twig)), 2);
        assert_eq!(count_kind(&ornaments_at(49.9, 0), |k| matches!(k, OrnamentKind::Twig)), 2);
        assert_eq!(count_kind(&ornaments_at(50.0, 0), |k| matches!(k, OrnamentKind::Twig)), 4);
    }

    #[test]
    fn overdue_yellows_an_even_fraction_of_leaves() {
        let clean = ornaments_at(70.0, 0);
        assert_eq!(
            count_kind(&clean, |k| matches!(k, OrnamentKind::Leaf { yellowed: true })),
            0
        );
        let flagged = ornaments_at(70.0, 2);
        let yellow =
            count_kind(&flagged, |k| matches!(k, OrnamentKind::Leaf { yellowed: true }));
        assert_eq!(yellow, 4);
        // Yellowed leaves are spread by stride, not clustered at the front.
        let yellow_indices: Vec<usize> = flagged
            .iter()
            .enumerate()
            .filter(|(_, o)| matches!(o.kind, OrnamentKind::Leaf { yellowed: true }))
            .map(|(i, _)| i)
            .collect();
        assert!(yellow_indices.windows(2).all(|w| w[1] - w[0] >= 2));
    }

    #[test]
    fn placement_is_deterministic() {
        let a = ornaments_at(83.0, 1);
        let b = ornaments_at(83.0, 1);
        assert_eq!(a, b);
    }

    #[test]
    fn depth_layers_cycle_per_leaf_index() {
        let ornaments = ornaments_at(60.0, 0);
        let leaves: Vec<&Ornament> = ornaments
            .iter()
            .filter(|o| matches!(o.kind, OrnamentKind::Leaf { .. }))
            .collect();
        assert_eq!(leaves[0].layer, DepthLayer::Back);
        assert_eq!(leaves[1].layer, DepthLayer::Mid);
        assert_eq!(leaves[2].layer, DepthLayer::Front);
        assert_eq!(leaves[3].layer, DepthLayer::Back);
    }

    #[test]
    fn leaves_stay_on_the_outer_spine() {
        // Positions must come from t in [0.42, 0.97]; check by projecting the
        // sampled point back onto the spine parameter range loosely: every
        // leaf should be closer to the tip than the branch origin is.
        let slot = TreeConfig::default().slots[0];
        let branch = build_branch(&slot, 90.0, &BranchTuning::default());
        let ornaments = place_ornaments(seed_from_id("hr"), &branch, 90.0, 0);
        let origin = branch.spine.start();
        let inner_cutoff = branch.spine.eval(0.35);
        let tip = branch.spine.end();
        let origin_to_tip = (tip - origin).length();
        for o in ornaments
            .iter()
            .filter(|o| matches!(o.kind, OrnamentKind::Leaf { .. }))
        {
            let d_origin = (crate::geom::point(o.x, o.y) - origin).length();
            let d_cutoff = (crate::geom::point(o.x, o.y) - inner_cutoff).length();
            assert!(
                d_origin + 1e-6 > d_cutoff,
                "leaf sits on the inner spine: {d_origin} vs {d_cutoff} (branch span {origin_to_tip})"
            );
        }
    }
}
