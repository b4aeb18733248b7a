//! Label/tooltip anchor resolver.
//!
//! Places a text badge next to a branch tip so its bounding box never leaves
//! the viewport. Clamping is axis-independent and total: even wildly
//! out-of-range tip coordinates resolve to a renderable position.

use crate::config::{BadgeMetrics, SlotSide, Viewport};
use crate::geom::Point;
use crate::model::{LabelAnchor, TextAnchor};

fn clamp_finite(v: f64, lo: f64, hi: f64) -> f64 {
    if !v.is_finite() {
        return lo;
    }
    // An over-constrained viewport (hi < lo) degrades to the low bound.
    if hi < lo { lo } else { v.clamp(lo, hi) }
}

pub fn resolve_anchor(
    tip: Point,
    side: SlotSide,
    badge: &BadgeMetrics,
    viewport: &Viewport,
) -> LabelAnchor {
    let (raw_x, text_anchor, x_lo, x_hi) = match side {
        SlotSide::Right => (
            tip.x + badge.tip_gap,
            TextAnchor::Start,
            viewport.min_x + badge.margin,
            viewport.max_x - badge.margin - badge.width,
        ),
        SlotSide::Left => (
            tip.x - badge.tip_gap,
            TextAnchor::End,
            viewport.min_x + badge.margin + badge.width,
            viewport.max_x - badge.margin,
        ),
    };

    // Anchor y is the badge top, vertically centered on the tip.
    let raw_y = tip.y - badge.height / 2.0;
    let y_lo = viewport.min_y + badge.margin;
    let y_hi = viewport.max_y - badge.margin - badge.height;

    LabelAnchor {
        x: clamp_finite(raw_x, x_lo, x_hi),
        y: clamp_finite(raw_y, y_lo, y_hi),
        text_anchor,
    }
}
