//! Input and layout model types.
//!
//! Everything here is plain serializable data: the engine maps an `Entity`
//! list to a `SceneLayout` and never mutates its inputs. Coordinates are in
//! viewport units with y increasing downwards, renderable as SVG path data,
//! canvas draw calls, or any other vector backend.

use crate::config::Viewport;
use crate::geom::{CubicBezier, PathSeg};
use serde::{Deserialize, Serialize};

/// Per-entity task statistics, computed upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStats {
    pub done: u32,
    pub total: u32,
    #[serde(default)]
    pub overdue: u32,
}

/// One tracked entity (a team). Progress is a 0..=100 completion percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub progress: f64,
    #[serde(default)]
    pub stats: EntityStats,
}

/// An entity bound to its prominence slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntity {
    /// Index into the caller's entity list.
    pub entity_index: usize,
    /// 0 = most prominent slot.
    pub slot_index: usize,
}

/// Result of binding entities to the slot table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankAssignment {
    pub ranked: Vec<RankedEntity>,
    /// Entity indices that did not fit in the slot table, best progress first.
    /// These are reported, not silently dropped.
    pub overflow: Vec<usize>,
}

/// A branch's derived geometry: the centerline spine plus a closed tapered
/// outline obtained by offsetting the spine perpendicular to its tangent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchGeometry {
    pub spine: CubicBezier,
    pub outline: Vec<PathSeg>,
    pub tip_x: f64,
    pub tip_y: f64,
    pub length: f64,
    pub root_half_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchLayout {
    pub entity_id: String,
    pub slot_index: usize,
    #[serde(flatten)]
    pub geometry: BranchGeometry,
}

/// Compositing layer for ornaments; the renderer fakes depth with
/// per-layer blur/opacity, but the assignment itself is part of the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DepthLayer {
    Back,
    Mid,
    Front,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OrnamentKind {
    Leaf { yellowed: bool },
    Twig,
    Blossom,
    Fruit,
}

/// A single decorative instance attached to a branch. Fully described by
/// center, size, and rotation; the renderer supplies the actual petal/leaf
/// outline shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ornament {
    #[serde(flatten)]
    pub kind: OrnamentKind,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub rotation_deg: f64,
    pub layer: DepthLayer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrnamentLayout {
    pub entity_id: String,
    #[serde(flatten)]
    pub ornament: Ornament,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAnchor {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelAnchor {
    pub x: f64,
    pub y: f64,
    pub text_anchor: TextAnchor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelLayout {
    pub entity_id: String,
    pub anchor: LabelAnchor,
    pub text: String,
    pub color_class: HealthTier,
}

/// Three-tier classification of progress against the time-elapsed baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HealthTier {
    OnTrack,
    Behind,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcosystemHealth {
    /// Rounded mean progress across all entities.
    pub value: i64,
    /// Rounded `elapsed_fraction * 100`.
    pub expected: i64,
    pub tier: HealthTier,
}

/// One quadratic grass blade anchored on the ground line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrassBlade {
    pub base_x: f64,
    pub height: f64,
    pub left_x: f64,
    pub right_x: f64,
    /// Index into the renderer's 5-color grass palette.
    pub color_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pebble {
    pub x: f64,
    pub y: f64,
    pub rx: f64,
    pub ry: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilBand {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Decorative ground geometry: soil band, root outlines, grass, pebbles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundLayout {
    pub soil: SoilBand,
    pub roots: Vec<Vec<PathSeg>>,
    pub grass: Vec<GrassBlade>,
    pub pebbles: Vec<Pebble>,
}

/// The full computed scene, handed to a rendering adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneLayout {
    /// Echo of the configured viewport, so adapters can size their canvas
    /// without re-reading the config.
    pub viewport: Viewport,
    pub ranking: RankAssignment,
    pub branches: Vec<BranchLayout>,
    pub ornaments: Vec<OrnamentLayout>,
    pub labels: Vec<LabelLayout>,
    pub health: EcosystemHealth,
    pub ground: GroundLayout,
}
