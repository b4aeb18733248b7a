//! Root/soil ancillary geometry.
//!
//! Decorative curves under the tree: a soil band, surfacing root outlines, a
//! grass fringe whose density follows one entity's progress, and seeded
//! pebbles in the underground band. Low complexity, but part of the scene
//! contract so every backend draws the same ground.

use crate::config::TreeConfig;
use crate::geom::{PathSeg, clamp_progress, point};
use crate::model::{GrassBlade, GroundLayout, Pebble, SoilBand};
use crate::rng::next_float;

// Fixed decorative seeds; ground variety is scene-stable, not per-entity.
const GRASS_SEED: u64 = 0x4752_4153;
const PEBBLE_SEED: u64 = 0x5045_4242;

const SOIL_BAND_HEIGHT: f64 = 22.0;
const PEBBLE_COUNT: usize = 18;

/// Left lateral surfacing root, transcribed from the dashboard artwork and
/// parameterized by trunk center / ground line. `mirror` flips it to the right.
fn lateral_root(tx: f64, gy: f64, mirror: f64) -> Vec<PathSeg> {
    let x = |dx: f64| tx + dx * mirror;
    vec![
        PathSeg::move_to(point(x(-56.0), gy)),
        PathSeg::curve_to(
            point(x(-110.0), gy + 8.0),
            point(x(-220.0), gy - 14.0),
            point(x(-330.0), gy + 2.0),
        ),
        PathSeg::curve_to(
            point(x(-390.0), gy + 12.0),
            point(x(-420.0), gy + 28.0),
            point(x(-450.0), gy + 46.0),
        ),
        PathSeg::line_to(point(x(-438.0), gy + 54.0)),
        PathSeg::curve_to(
            point(x(-406.0), gy + 36.0),
            point(x(-374.0), gy + 20.0),
            point(x(-314.0), gy + 10.0),
        ),
        PathSeg::line_to(point(x(-310.0), gy + 60.0)),
        PathSeg::line_to(point(x(-294.0), gy + 62.0)),
        PathSeg::line_to(point(x(-298.0), gy + 10.0)),
        PathSeg::curve_to(
            point(x(-200.0), gy),
            point(x(-96.0), gy + 16.0),
            point(x(-48.0), gy + 20.0),
        ),
        PathSeg::Close,
    ]
}

/// Thin trailing root running deeper underground.
fn trailing_root(tx: f64, gy: f64, mirror: f64) -> Vec<PathSeg> {
    let x = |dx: f64| tx + dx * mirror;
    vec![
        PathSeg::move_to(point(x(-298.0), gy + 12.0)),
        PathSeg::curve_to(
            point(x(-338.0), gy + 26.0),
            point(x(-376.0), gy + 50.0),
            point(x(-404.0), gy + 76.0),
        ),
        PathSeg::line_to(point(x(-392.0), gy + 84.0)),
        PathSeg::curve_to(
            point(x(-362.0), gy + 58.0),
            point(x(-324.0), gy + 34.0),
            point(x(-284.0), gy + 20.0),
        ),
        PathSeg::Close,
    ]
}

fn tap_root(tx: f64, gy: f64) -> Vec<PathSeg> {
    vec![
        PathSeg::move_to(point(tx - 16.0, gy)),
        PathSeg::line_to(point(tx - 12.0, gy + 74.0)),
        PathSeg::line_to(point(tx + 12.0, gy + 74.0)),
        PathSeg::line_to(point(tx + 16.0, gy)),
        PathSeg::Close,
    ]
}

/// Derives the full ground layout. `progress` (usually the lowest-ranked
/// slotted entity's) only drives grass density.
pub fn build_ground(config: &TreeConfig, progress: f64) -> GroundLayout {
    let p = clamp_progress(progress);
    let tx = config.trunk_x;
    let gy = config.ground_y;
    let width = config.viewport.max_x - config.viewport.min_x;

    let roots = vec![
        lateral_root(tx, gy, 1.0),
        lateral_root(tx, gy, -1.0),
        tap_root(tx, gy),
        trailing_root(tx, gy, 1.0),
        trailing_root(tx, gy, -1.0),
    ];

    let blade_count = 32 + (p * 0.4).round() as usize;
    let grass = (0..blade_count)
        .map(|i| {
            let base = (i as u64) * 3;
            let base_x = config.viewport.min_x + next_float(GRASS_SEED, base) * width;
            let height = 12.0 + next_float(GRASS_SEED, base + 1) * 24.0;
            let lean = next_float(GRASS_SEED, base + 2) * 5.0;
            GrassBlade {
                base_x,
                height,
                left_x: base_x - 3.0 - lean,
                right_x: base_x + 3.0 + lean,
                color_index: i % 5,
            }
        })
        .collect();

    let pebbles = (0..PEBBLE_COUNT)
        .map(|i| {
            let base = (i as u64) * 4;
            Pebble {
                x: config.viewport.min_x + next_float(PEBBLE_SEED, base) * width,
                y: gy + 98.0 + next_float(PEBBLE_SEED, base + 1) * 40.0,
                rx: 2.0 + next_float(PEBBLE_SEED, base + 2) * 7.0,
                ry: 1.5 + next_float(PEBBLE_SEED, base + 2) * 3.0,
                opacity: 0.06 + next_float(PEBBLE_SEED, base + 3) * 0.11,
            }
        })
        .collect();

    GroundLayout {
        soil: SoilBand {
            x: config.viewport.min_x,
            y: gy,
            width,
            height: SOIL_BAND_HEIGHT,
        },
        roots,
        grass,
        pebbles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grass_density_follows_progress() {
        let cfg = TreeConfig::default();
        let sparse = build_ground(&cfg, 0.0);
        let dense = build_ground(&cfg, 100.0);
        assert_eq!(sparse.grass.len(), 32);
        assert_eq!(dense.grass.len(), 72);
    }

    #[test]
    fn ground_is_deterministic_and_closed() {
        let cfg = TreeConfig::default();
        let a = build_ground(&cfg, 55.0);
        let b = build_ground(&cfg, 55.0);
        assert_eq!(a, b);
        assert_eq!(a.roots.len(), 5);
        for root in &a.roots {
            assert!(matches!(root.first(), Some(PathSeg::MoveTo { .. })));
            assert!(matches!(root.last(), Some(PathSeg::Close)));
        }
        assert_eq!(a.pebbles.len(), 18);
    }

    #[test]
    fn blades_straddle_their_base() {
        let cfg = TreeConfig::default();
        for blade in build_ground(&cfg, 40.0).grass {
            assert!(blade.left_x < blade.base_x);
            assert!(blade.right_x > blade.base_x);
            assert!(blade.height >= 12.0 && blade.height < 36.0);
        }
    }
}
