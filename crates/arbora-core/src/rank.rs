//! Rank assignment: bind entities to prominence slots.
//!
//! The best performer always occupies the most prominent slot. Ties keep
//! input order (stable sort), so ranking is fully deterministic.

use crate::geom::clamp_progress;
use crate::model::{Entity, RankAssignment, RankedEntity};

/// Sorts entities by progress descending and binds each to a slot index in
/// sorted order. Entities beyond `slot_count` are returned in `overflow`
/// (best progress first) rather than silently dropped; callers decide
/// whether to truncate or aggregate them upstream.
pub fn assign_slots(entities: &[Entity], slot_count: usize) -> RankAssignment {
    let mut order: Vec<usize> = (0..entities.len()).collect();
    order.sort_by(|&a, &b| {
        clamp_progress(entities[b].progress).total_cmp(&clamp_progress(entities[a].progress))
    });

    let mut assignment = RankAssignment::default();
    for (rank, entity_index) in order.into_iter().enumerate() {
        if rank < slot_count {
            assignment.ranked.push(RankedEntity {
                entity_index,
                slot_index: rank,
            });
        } else {
            assignment.overflow.push(entity_index);
        }
    }
    assignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityStats;

    fn entity(id: &str, progress: f64) -> Entity {
        Entity {
            id: id.to_string(),
            progress,
            stats: EntityStats::default(),
        }
    }

    #[test]
    fn ranks_by_progress_descending_with_stable_ties() {
        let entities = [entity("A", 30.0), entity("B", 90.0), entity("C", 30.0)];
        let assignment = assign_slots(&entities, 5);
        let order: Vec<usize> = assignment.ranked.iter().map(|r| r.entity_index).collect();
        // B first; the two 30s keep original relative order.
        assert_eq!(order, vec![1, 0, 2]);
        assert_eq!(assignment.ranked[0].slot_index, 0);
        assert_eq!(assignment.ranked[2].slot_index, 2);
        assert!(assignment.overflow.is_empty());
    }

    #[test]
    fn overflow_entities_are_reported_not_dropped() {
        let entities: Vec<Entity> = (0..7)
            .map(|i| entity(&format!("t{i}"), (i * 10) as f64))
            .collect();
        let assignment = assign_slots(&entities, 5);
        assert_eq!(assignment.ranked.len(), 5);
        assert_eq!(assignment.overflow.len(), 2);
        // The two lowest-progress entities overflow, best first.
        assert_eq!(assignment.overflow, vec![1, 0]);
    }

    #[test]
    fn out_of_range_progress_is_clamped_before_ranking() {
        let entities = [entity("A", 250.0), entity("B", 100.0), entity("C", -5.0)];
        let assignment = assign_slots(&entities, 3);
        let order: Vec<usize> = assignment.ranked.iter().map(|r| r.entity_index).collect();
        // 250 clamps to 100, tying with B; input order breaks the tie.
        assert_eq!(order, vec![0, 1, 2]);
    }
}
