//! Growth-stage classifier.
//!
//! A total function from a progress percentage to one of five discrete visual
//! maturity levels, plus a continuous in-band ratio used by downstream
//! interpolation (ornament counts, blossom sizes).

use crate::geom::clamp_progress;

/// Discrete visual maturity of a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum GrowthStage {
    Dry,
    Sprouting,
    Leafy,
    Blossoming,
    Fruited,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StageInfo {
    pub stage: GrowthStage,
    /// Position within the stage band, in `[0, 1]` (`1.0` for `Fruited`).
    pub maturity: f64,
}

const DRY_END: f64 = 20.0;
const SPROUTING_END: f64 = 50.0;
const LEAFY_END: f64 = 80.0;
const BLOSSOMING_END: f64 = 100.0;

/// Classifies a progress value. Out-of-range input is clamped, never rejected.
pub fn classify(progress: f64) -> StageInfo {
    let p = clamp_progress(progress);
    if p < DRY_END {
        StageInfo {
            stage: GrowthStage::Dry,
            maturity: p / DRY_END,
        }
    } else if p < SPROUTING_END {
        StageInfo {
            stage: GrowthStage::Sprouting,
            maturity: (p - DRY_END) / (SPROUTING_END - DRY_END),
        }
    } else if p < LEAFY_END {
        StageInfo {
            stage: GrowthStage::Leafy,
            maturity: (p - SPROUTING_END) / (LEAFY_END - SPROUTING_END),
        }
    } else if p < BLOSSOMING_END {
        StageInfo {
            stage: GrowthStage::Blossoming,
            maturity: (p - LEAFY_END) / (BLOSSOMING_END - LEAFY_END),
        }
    } else {
        StageInfo {
            stage: GrowthStage::Fruited,
            maturity: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_boundaries_are_exact() {
        assert_eq!(classify(19.9).stage, GrowthStage::Dry);
        assert_eq!(classify(20.0).stage, GrowthStage::Sprouting);
        assert_eq!(classify(49.999).stage, GrowthStage::Sprouting);
        assert_eq!(classify(50.0).stage, GrowthStage::Leafy);
        assert_eq!(classify(79.999).stage, GrowthStage::Leafy);
        assert_eq!(classify(80.0).stage, GrowthStage::Blossoming);
        assert_eq!(classify(99.999).stage, GrowthStage::Blossoming);
        assert_eq!(classify(100.0).stage, GrowthStage::Fruited);
    }

    #[test]
    fn every_progress_maps_to_exactly_one_stage() {
        // Sweep in tenths; totality means no panic and a maturity in [0, 1].
        for i in 0..=1000 {
            let info = classify(i as f64 / 10.0);
            assert!((0.0..=1.0).contains(&info.maturity));
        }
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(classify(-10.0).stage, GrowthStage::Dry);
        assert_eq!(classify(140.0).stage, GrowthStage::Fruited);
        assert_eq!(classify(f64::NAN).stage, GrowthStage::Dry);
    }

    #[test]
    fn maturity_interpolates_inside_the_band() {
        let info = classify(90.0);
        assert_eq!(info.stage, GrowthStage::Blossoming);
        assert!((info.maturity - 0.5).abs() < 1e-12);
    }
}
