#![forbid(unsafe_code)]

//! Procedural growth-tree geometry engine (headless).
//!
//! Design goals:
//! - deterministic: identical inputs reproduce identical layouts bit-for-bit
//! - total: numeric inputs are clamped/defaulted, never rejected
//! - pure: no I/O, no clock, no hidden state; memoization is the caller's
//!   concern (key on the entity tuple + elapsed fraction)
//!
//! The engine maps a list of entities (`id`, `progress`, task stats) onto a
//! fixed slot table and derives branch ribbons, ornament scatters, label
//! anchors, an ecosystem health summary, and decorative ground geometry. A
//! rendering adapter (see `arbora-render`) turns the result into SVG or any
//! other vector surface.

pub mod branch;
pub mod config;
pub mod error;
pub mod geom;
pub mod ground;
pub mod health;
pub mod label;
pub mod model;
pub mod ornament;
pub mod rank;
pub mod rng;
pub mod stage;

pub use config::{BadgeMetrics, BranchTuning, Slot, SlotSide, TreeConfig, Viewport};
pub use error::{Error, Result};
pub use model::{Entity, EntityStats, HealthTier, SceneLayout};
pub use stage::{GrowthStage, StageInfo};

/// Inputs to a scene layout pass beyond the entity list.
#[derive(Debug, Clone, Default)]
pub struct SceneOptions {
    /// How much of the reporting window has elapsed, in `[0, 1]`. Supplied by
    /// the caller; the engine never reads the clock.
    pub elapsed_fraction: f64,
    pub config: TreeConfig,
}

/// Computes the full scene for one render frame.
///
/// Entities are ranked onto the slot table best-progress-first; entities
/// beyond the table are reported in `ranking.overflow` (and logged) but still
/// excluded from the visual.
pub fn layout_scene(entities: &[Entity], options: &SceneOptions) -> Result<SceneLayout> {
    let config = &options.config;
    config.validate()?;

    let ranking = rank::assign_slots(entities, config.slots.len());
    if !ranking.overflow.is_empty() {
        tracing::warn!(
            overflow = ranking.overflow.len(),
            slots = config.slots.len(),
            "more entities than slots; overflow entities are not drawn"
        );
    }

    let expected = health::expected_progress(options.elapsed_fraction);

    let mut branches = Vec::with_capacity(ranking.ranked.len());
    let mut ornaments = Vec::new();
    let mut labels = Vec::with_capacity(ranking.ranked.len());

    for ranked in &ranking.ranked {
        let entity = &entities[ranked.entity_index];
        let slot = &config.slots[ranked.slot_index];
        let progress = geom::clamp_progress(entity.progress);
        let info = stage::classify(progress);
        tracing::debug!(id = %entity.id, slot = ranked.slot_index, ?info, "layout branch");

        let geometry = branch::build_branch(slot, progress, &config.branch);
        let seed = rng::seed_from_id(&entity.id);
        for ornament in ornament::place_ornaments(seed, &geometry, progress, entity.stats.overdue) {
            ornaments.push(model::OrnamentLayout {
                entity_id: entity.id.clone(),
                ornament,
            });
        }

        let anchor = label::resolve_anchor(
            geom::point(geometry.tip_x, geometry.tip_y),
            slot.side(),
            &config.badge,
            &config.viewport,
        );
        labels.push(model::LabelLayout {
            entity_id: entity.id.clone(),
            anchor,
            text: format!("{}%", progress.round() as i64),
            color_class: health::tier_for(progress, expected),
        });

        branches.push(model::BranchLayout {
            entity_id: entity.id.clone(),
            slot_index: ranked.slot_index,
            geometry,
        });
    }

    // Grass density tracks the least prominent drawn entity, the way the
    // dashboard keys its ground cover to one team.
    let ground_progress = ranking
        .ranked
        .last()
        .map(|r| geom::clamp_progress(entities[r.entity_index].progress))
        .unwrap_or(0.0);
    let ground = ground::build_ground(config, ground_progress);

    let health = health::summarize(entities, options.elapsed_fraction);

    Ok(SceneLayout {
        viewport: config.viewport,
        ranking,
        branches,
        ornaments,
        labels,
        health,
        ground,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityStats;

    fn entity(id: &str, progress: f64, overdue: u32) -> Entity {
        Entity {
            id: id.to_string(),
            progress,
            stats: EntityStats {
                done: 0,
                total: 0,
                overdue,
            },
        }
    }

    #[test]
    fn scene_layout_binds_best_entity_to_slot_zero() {
        let entities = vec![entity("hr", 20.0, 0), entity("tech", 65.0, 1)];
        let scene = layout_scene(&entities, &SceneOptions {
            elapsed_fraction: 0.6,
            config: TreeConfig::default(),
        })
        .expect("layout ok");

        assert_eq!(scene.branches.len(), 2);
        assert_eq!(scene.branches[0].entity_id, "tech");
        assert_eq!(scene.branches[0].slot_index, 0);
        assert_eq!(scene.health.value, 43);
        assert_eq!(scene.health.expected, 60);
        assert_eq!(scene.health.tier, HealthTier::Behind);
    }

    #[test]
    fn empty_slot_table_is_an_error() {
        let options = SceneOptions {
            elapsed_fraction: 0.0,
            config: TreeConfig {
                slots: Vec::new(),
                ..TreeConfig::default()
            },
        };
        assert!(matches!(
            layout_scene(&[entity("a", 10.0, 0)], &options),
            Err(Error::NoSlots)
        ));
    }

    #[test]
    fn labels_carry_per_entity_tiers() {
        let entities = vec![entity("tech", 90.0, 0), entity("hr", 10.0, 0)];
        let scene = layout_scene(&entities, &SceneOptions {
            elapsed_fraction: 1.0,
            config: TreeConfig::default(),
        })
        .expect("layout ok");
        let tech = scene.labels.iter().find(|l| l.entity_id == "tech").unwrap();
        let hr = scene.labels.iter().find(|l| l.entity_id == "hr").unwrap();
        assert_eq!(tech.color_class, HealthTier::OnTrack);
        assert_eq!(hr.color_class, HealthTier::Critical);
        assert_eq!(tech.text, "90%");
    }
}
