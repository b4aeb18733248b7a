//! Static tree configuration: the slot table, viewport, and tuning constants.
//!
//! Defaults reproduce the dashboard's baked-in scene (viewBox `0 0 1000 700`,
//! ground line at y=560, five branch slots ordered by visual prominence).
//! All of it is plain data: defined once at startup, read-only afterwards.

use crate::error::{Error, Result};
use crate::geom::{Point, point};
use serde::{Deserialize, Serialize};

/// Which side of the trunk a slot reaches toward. Drives label text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotSide {
    Left,
    Right,
}

/// A fixed geometric attachment descriptor for one ranked branch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub origin_x: f64,
    pub origin_y: f64,
    /// Direction the branch grows toward, in degrees (0 = +x, y-down screen space).
    pub angle_deg: f64,
    pub max_length: f64,
    pub base_half_width: f64,
}

impl Slot {
    pub fn origin(&self) -> Point {
        point(self.origin_x, self.origin_y)
    }

    pub fn side(&self) -> SlotSide {
        if self.angle_deg.to_radians().cos() < 0.0 {
            SlotSide::Left
        } else {
            SlotSide::Right
        }
    }
}

/// Rectangular viewport that labels are clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 1000.0,
            max_y: 700.0,
        }
    }
}

/// Branch shape tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BranchTuning {
    /// Stub length at 0% progress; a branch never disappears entirely.
    pub min_length: f64,
    /// Root half-width at 0% progress.
    pub min_half_width: f64,
    /// Fixed half-width at the tip.
    pub tip_half_width: f64,
    /// Downward control-point displacement as a fraction of branch length.
    pub sag_ratio: f64,
}

impl Default for BranchTuning {
    fn default() -> Self {
        Self {
            min_length: 26.0,
            min_half_width: 2.0,
            tip_half_width: 2.4,
            sag_ratio: 0.14,
        }
    }
}

/// Badge dimensions used by the label anchor resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BadgeMetrics {
    pub width: f64,
    pub height: f64,
    /// Gap between a branch tip and the badge edge.
    pub tip_gap: f64,
    /// Minimum distance kept between the badge box and the viewport edges.
    pub margin: f64,
}

impl Default for BadgeMetrics {
    fn default() -> Self {
        Self {
            width: 164.0,
            height: 44.0,
            tip_gap: 14.0,
            margin: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TreeConfig {
    pub viewport: Viewport,
    /// Slot table ordered by prominence; index 0 is the most prominent position.
    pub slots: Vec<Slot>,
    pub branch: BranchTuning,
    pub badge: BadgeMetrics,
    /// Horizontal center of the trunk.
    pub trunk_x: f64,
    /// Ground line; soil, roots and grass hang off this y.
    pub ground_y: f64,
}

impl TreeConfig {
    /// Validates invariants that the layout pass relies on.
    pub fn validate(&self) -> Result<()> {
        if self.slots.is_empty() {
            return Err(Error::NoSlots);
        }
        for (i, slot) in self.slots.iter().enumerate() {
            if !(slot.max_length.is_finite() && slot.max_length > 0.0) {
                return Err(Error::InvalidConfig {
                    message: format!("slot {i} has non-positive max_length"),
                });
            }
            if !(slot.base_half_width.is_finite() && slot.base_half_width > 0.0) {
                return Err(Error::InvalidConfig {
                    message: format!("slot {i} has non-positive base_half_width"),
                });
            }
        }
        if self.viewport.max_x <= self.viewport.min_x || self.viewport.max_y <= self.viewport.min_y {
            return Err(Error::InvalidConfig {
                message: "viewport is empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        // Fork points and reach distances transcribed from the dashboard's
        // hand-tuned scene: a center crown, two main laterals, two mid laterals.
        Self {
            viewport: Viewport::default(),
            slots: vec![
                Slot {
                    origin_x: 499.0,
                    origin_y: 258.0,
                    angle_deg: -90.0,
                    max_length: 150.0,
                    base_half_width: 15.0,
                },
                Slot {
                    origin_x: 513.0,
                    origin_y: 278.0,
                    angle_deg: -16.0,
                    max_length: 255.0,
                    base_half_width: 21.0,
                },
                Slot {
                    origin_x: 489.0,
                    origin_y: 290.0,
                    angle_deg: -164.0,
                    max_length: 280.0,
                    base_half_width: 24.0,
                },
                Slot {
                    origin_x: 509.0,
                    origin_y: 338.0,
                    angle_deg: 12.0,
                    max_length: 170.0,
                    base_half_width: 10.0,
                },
                Slot {
                    origin_x: 491.0,
                    origin_y: 350.0,
                    angle_deg: 176.0,
                    max_length: 185.0,
                    base_half_width: 12.0,
                },
            ],
            branch: BranchTuning::default(),
            badge: BadgeMetrics::default(),
            trunk_x: 500.0,
            ground_y: 560.0,
        }
    }
}
