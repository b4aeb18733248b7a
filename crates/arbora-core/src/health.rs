//! Aggregate health summary.
//!
//! Ecosystem value is the rounded mean progress; the expectation baseline is
//! supplied as an elapsed-time fraction by the caller (never read from the
//! clock here), and a three-tier classification of the value/expected ratio
//! is reused for branch opacity, label color, and alert ordering.

use crate::geom::clamp_progress;
use crate::model::{EcosystemHealth, Entity, HealthTier};

/// Tier thresholds on the progress/expected ratio.
const ON_TRACK_RATIO: f64 = 0.8;
const BEHIND_RATIO: f64 = 0.5;

/// Classifies a single progress value against an expected percentage.
/// When nothing is expected yet, the ratio defaults to 1 (on track).
pub fn tier_for(progress: f64, expected: i64) -> HealthTier {
    let ratio = if expected <= 0 {
        1.0
    } else {
        clamp_progress(progress) / expected as f64
    };
    if ratio >= ON_TRACK_RATIO {
        HealthTier::OnTrack
    } else if ratio >= BEHIND_RATIO {
        HealthTier::Behind
    } else {
        HealthTier::Critical
    }
}

/// Rounded `elapsed_fraction * 100`, with the fraction clamped into `[0, 1]`.
pub fn expected_progress(elapsed_fraction: f64) -> i64 {
    let f = if elapsed_fraction.is_finite() {
        elapsed_fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    (f * 100.0).round() as i64
}

pub fn summarize(entities: &[Entity], elapsed_fraction: f64) -> EcosystemHealth {
    let expected = expected_progress(elapsed_fraction);
    let value = if entities.is_empty() {
        0
    } else {
        let sum: f64 = entities.iter().map(|e| clamp_progress(e.progress)).sum();
        (sum / entities.len() as f64).round() as i64
    };
    EcosystemHealth {
        value,
        expected,
        tier: tier_for(value as f64, expected),
    }
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
    fn mean_rounds_half_away_from_zero() {
        let health = summarize(&[entity("tech", 65.0), entity("hr", 20.0)], 0.6);
        assert_eq!(health.value, 43); // mean 42.5 rounds up
        assert_eq!(health.expected, 60);
        // 43 / 60 ≈ 0.71 -> behind.
        assert_eq!(health.tier, HealthTier::Behind);
    }

    #[test]
    fn zero_expected_defaults_to_on_track() {
        let health = summarize(&[entity("a", 0.0)], 0.0);
        assert_eq!(health.expected, 0);
        assert_eq!(health.tier, HealthTier::OnTrack);
    }

    #[test]
    fn tier_thresholds() {
        assert_eq!(tier_for(80.0, 100), HealthTier::OnTrack);
        assert_eq!(tier_for(79.9, 100), HealthTier::Behind);
        assert_eq!(tier_for(50.0, 100), HealthTier::Behind);
        assert_eq!(tier_for(49.9, 100), HealthTier::Critical);
    }

    #[test]
    fn empty_entity_list_yields_zero_value() {
        let health = summarize(&[], 0.5);
        assert_eq!(health.value, 0);
        assert_eq!(health.expected, 50);
        assert_eq!(health.tier, HealthTier::Critical);
    }

    #[test]
    fn elapsed_fraction_is_clamped() {
        assert_eq!(expected_progress(1.7), 100);
        assert_eq!(expected_progress(-0.3), 0);
        assert_eq!(expected_progress(f64::NAN), 0);
    }
}
