//! Standalone-SVG emission for a computed scene layout.
//!
//! Everything here is presentation policy (colors, petal shapes, depth-layer
//! opacity); all geometry decisions were already made by `arbora-core`.

use crate::path::{fmt_num, path_data};
use arbora_core::model::{
    DepthLayer, HealthTier, LabelLayout, Ornament, OrnamentKind, SceneLayout, TextAnchor,
};
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Adds extra space around the scene viewport.
    pub viewbox_padding: f64,
    /// When true, stroke each branch's centerline spine (debug aid).
    pub include_spines: bool,
    /// When true, draw label badges at their resolved anchors.
    pub include_labels: bool,
    /// Optional flat background color (CSS color); `None` leaves it transparent.
    pub background: Option<String>,
    /// Badge box drawn behind each label; must match the layout's badge metrics.
    pub badge_width: f64,
    pub badge_height: f64,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            viewbox_padding: 8.0,
            include_spines: false,
            include_labels: true,
            background: Some("#b8dff2".to_string()),
            badge_width: 164.0,
            badge_height: 44.0,
        }
    }
}

const RIBBON_FILL: &str = "#4e2c0a";
const TRUNK_FILL: &str = "#3d2006";
const TWIG_STROKE: &str = "#3d2006";
const SOIL_FILL: &str = "#59371a";
const UNDERGROUND_FILL: &str = "#100502";
const ROOT_FILL: &str = "#92400e";
const PEBBLE_FILL: &str = "#64380a";
const LEAF_YELLOW: &str = "#fcd34d";

const LEAF_BRIGHT: [&str; 6] = ["#aee84e", "#bef460", "#c8f472", "#9ee040", "#d0f47a", "#8cd83a"];
const LEAF_MID: [&str; 5] = ["#7cc82c", "#88d636", "#68be1e", "#74ca28", "#6ab820"];
const GRASS_PALETTE: [&str; 5] = ["#236018", "#2a6e1e", "#328426", "#246018", "#389224"];

fn tier_color(tier: HealthTier) -> &'static str {
    match tier {
        HealthTier::OnTrack => "#10b981",
        HealthTier::Behind => "#f59e0b",
        HealthTier::Critical => "#ef4444",
    }
}

fn tier_word(tier: HealthTier) -> &'static str {
    match tier {
        HealthTier::OnTrack => "on track",
        HealthTier::Behind => "behind",
        HealthTier::Critical => "critical",
    }
}

fn layer_opacity(layer: DepthLayer) -> f64 {
    match layer {
        DepthLayer::Back => 0.55,
        DepthLayer::Mid => 0.8,
        DepthLayer::Front => 1.0,
    }
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Deterministic palette pick without re-deriving the entity seed here: the
/// ornament's own rotation carries enough per-instance variety.
fn leaf_fill(o: &Ornament, yellowed: bool) -> &'static str {
    if yellowed {
        return LEAF_YELLOW;
    }
    let idx = o.rotation_deg.abs() as usize;
    match o.layer {
        DepthLayer::Front => LEAF_BRIGHT[idx % LEAF_BRIGHT.len()],
        _ => LEAF_MID[idx % LEAF_MID.len()],
    }
}

fn write_leaf(out: &mut String, o: &Ornament, yellowed: bool) {
    let s = o.size;
    let d = format!(
        "M 0,0 C {},{} {},{} 0,{} C {},{} {},{} 0,0 Z",
        fmt_num(s * 0.38),
        fmt_num(-s * 0.26),
        fmt_num(s * 0.32),
        fmt_num(-s * 0.8),
        fmt_num(-s),
        fmt_num(-s * 0.32),
        fmt_num(-s * 0.8),
        fmt_num(-s * 0.38),
        fmt_num(-s * 0.26),
    );
    let _ = writeln!(
        out,
        "<path class=\"leaf\" d=\"{}\" fill=\"{}\" stroke=\"rgba(0,38,0,.14)\" stroke-width=\"0.5\" opacity=\"{}\" transform=\"translate({},{}) rotate({})\"/>",
        d,
        leaf_fill(o, yellowed),
        fmt_num(layer_opacity(o.layer)),
        fmt_num(o.x),
        fmt_num(o.y),
        fmt_num(o.rotation_deg),
    );
}

fn write_twig(out: &mut String, o: &Ornament) {
    let angle = o.rotation_deg.to_radians();
    let (dx, dy) = (angle.cos(), angle.sin());
    // Perpendicular bow gives the stub a slight curl.
    let (nx, ny) = (dy, -dx);
    let cx = o.x + dx * o.size * 0.5 + nx * o.size * 0.18;
    let cy = o.y + dy * o.size * 0.5 + ny * o.size * 0.18;
    let ex = o.x + dx * o.size;
    let ey = o.y + dy * o.size;
    let _ = writeln!(
        out,
        "<path class=\"twig\" d=\"M {},{} Q {},{} {},{}\" stroke=\"{}\" stroke-width=\"1.4\" fill=\"none\" stroke-linecap=\"round\" opacity=\"0.85\"/>",
        fmt_num(o.x),
        fmt_num(o.y),
        fmt_num(cx),
        fmt_num(cy),
        fmt_num(ex),
        fmt_num(ey),
        TWIG_STROKE,
    );
}

fn write_blossom(out: &mut String, o: &Ornament) {
    let s = o.size;
    let _ = writeln!(
        out,
        "<g class=\"blossom\" transform=\"translate({},{}) rotate({})\">",
        fmt_num(o.x),
        fmt_num(o.y),
        fmt_num(o.rotation_deg),
    );
    for i in 0..5 {
        let a = (i as f64) * 72.0 - 90.0;
        let rad = a.to_radians();
        let px = rad.cos() * s * 1.6;
        let py = rad.sin() * s * 1.6;
        let _ = writeln!(
            out,
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" fill=\"#fef9c3\" stroke=\"#fbbf24\" stroke-width=\"1.2\" opacity=\".96\" transform=\"rotate({} {} {})\"/>",
            fmt_num(px),
            fmt_num(py),
            fmt_num(s),
            fmt_num(s * 0.48),
            fmt_num(a),
            fmt_num(px),
            fmt_num(py),
        );
    }
    // Stamens.
    for i in 0..5 {
        let rad = ((i as f64) * 72.0 - 54.0).to_radians();
        let _ = writeln!(
            out,
            "<line x1=\"0\" y1=\"0\" x2=\"{}\" y2=\"{}\" stroke=\"#f59e0b\" stroke-width=\"0.8\"/>",
            fmt_num(rad.cos() * s * 0.9),
            fmt_num(rad.sin() * s * 0.9),
        );
    }
    let _ = writeln!(
        out,
        "<circle cx=\"0\" cy=\"0\" r=\"{}\" fill=\"#fbbf24\" stroke=\"#f59e0b\" stroke-width=\"1\"/>",
        fmt_num(s * 0.6),
    );
    out.push_str("</g>\n");
}

fn write_fruit(out: &mut String, o: &Ornament) {
    let s = o.size;
    let _ = writeln!(
        out,
        "<g class=\"fruit\" transform=\"translate({},{})\">",
        fmt_num(o.x),
        fmt_num(o.y),
    );
    let _ = writeln!(out, "<circle cx=\"0\" cy=\"0\" r=\"{}\" fill=\"#e85c00\"/>", fmt_num(s));
    let _ = writeln!(
        out,
        "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"rgba(255,255,255,.42)\"/>",
        fmt_num(-s * 0.27),
        fmt_num(-s * 0.3),
        fmt_num(s * 0.26),
    );
    let _ = writeln!(
        out,
        "<path d=\"M 0,{} Q {},{} {},{}\" stroke=\"#3d6012\" stroke-width=\"2.2\" fill=\"none\" stroke-linecap=\"round\"/>",
        fmt_num(-s),
        fmt_num(s * 0.45),
        fmt_num(-s * 1.6),
        fmt_num(s * 0.23),
        fmt_num(-s * 1.9),
    );
    out.push_str("</g>\n");
}

fn write_label(out: &mut String, label: &LabelLayout, options: &SvgRenderOptions) {
    let (rect_x, text_x, anchor_attr) = match label.anchor.text_anchor {
        TextAnchor::Start => (label.anchor.x, label.anchor.x + 12.0, "start"),
        TextAnchor::End => (label.anchor.x - options.badge_width, label.anchor.x - 12.0, "end"),
    };
    let color = tier_color(label.color_class);
    let _ = writeln!(
        out,
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"14\" fill=\"rgba(8,12,26,0.92)\" stroke=\"{}\" stroke-width=\"2\"/>",
        fmt_num(rect_x),
        fmt_num(label.anchor.y),
        fmt_num(options.badge_width),
        fmt_num(options.badge_height),
        color,
    );
    let _ = writeln!(
        out,
        "<text x=\"{}\" y=\"{}\" text-anchor=\"{}\" fill=\"white\" font-size=\"11\" font-weight=\"800\">{}</text>",
        fmt_num(text_x),
        fmt_num(label.anchor.y + 18.0),
        anchor_attr,
        xml_escape(&label.entity_id),
    );
    let _ = writeln!(
        out,
        "<text x=\"{}\" y=\"{}\" text-anchor=\"{}\" fill=\"{}\" font-size=\"10\" font-weight=\"700\">{} · {}</text>",
        fmt_num(text_x),
        fmt_num(label.anchor.y + 33.0),
        anchor_attr,
        color,
        xml_escape(&label.text),
        tier_word(label.color_class),
    );
}

/// Simple tapered trunk polygon derived from the branch fork points: the
/// engine attaches slots partway up the trunk, the adapter fills in the wood.
fn write_trunk(out: &mut String, scene: &SceneLayout) {
    let ground_y = scene.ground.soil.y;
    let cx = scene.ground.soil.x + scene.ground.soil.width / 2.0;
    let top_y = scene
        .branches
        .iter()
        .map(|b| b.geometry.spine.p0.1)
        .fold(ground_y - 240.0, f64::min)
        - 10.0;
    let _ = writeln!(
        out,
        "<path class=\"trunk\" d=\"M {},{} C {},{} {},{} {},{} L {},{} C {},{} {},{} {},{} Z\" fill=\"{}\"/>",
        fmt_num(cx - 56.0),
        fmt_num(ground_y),
        fmt_num(cx - 60.0),
        fmt_num(ground_y - 92.0),
        fmt_num(cx - 26.0),
        fmt_num(ground_y - 178.0),
        fmt_num(cx - 12.0),
        fmt_num(top_y),
        fmt_num(cx + 12.0),
        fmt_num(top_y),
        fmt_num(cx + 28.0),
        fmt_num(ground_y - 176.0),
        fmt_num(cx + 56.0),
        fmt_num(ground_y - 90.0),
        fmt_num(cx + 56.0),
        fmt_num(ground_y),
        TRUNK_FILL,
    );
}

pub fn render_scene_svg(scene: &SceneLayout, options: &SvgRenderOptions) -> String {
    let pad = options.viewbox_padding.max(0.0);
    let vb_min_x = scene.viewport.min_x - pad;
    let vb_min_y = scene.viewport.min_y - pad;
    let vb_w = (scene.viewport.max_x - scene.viewport.min_x) + pad * 2.0;
    let vb_h = (scene.viewport.max_y - scene.viewport.min_y) + pad * 2.0;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">",
        fmt_num(vb_min_x),
        fmt_num(vb_min_y),
        fmt_num(vb_w),
        fmt_num(vb_h),
    );

    if let Some(bg) = &options.background {
        let _ = writeln!(
            out,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            fmt_num(vb_min_x),
            fmt_num(vb_min_y),
            fmt_num(vb_w),
            fmt_num(vb_h),
            xml_escape(bg),
        );
    }

    write_trunk(&mut out, scene);

    // Branch ribbons, least prominent first so slot 0 composites on top.
    for branch in scene.branches.iter().rev() {
        let _ = writeln!(
            out,
            "<path class=\"branch\" data-entity=\"{}\" d=\"{}\" fill=\"{}\"/>",
            xml_escape(&branch.entity_id),
            path_data(&branch.geometry.outline),
            RIBBON_FILL,
        );
        if options.include_spines {
            let s = &branch.geometry.spine;
            let _ = writeln!(
                out,
                "<path class=\"spine\" d=\"M {},{} C {},{} {},{} {},{}\" stroke=\"#ffffff\" stroke-width=\"0.6\" stroke-dasharray=\"3,3\" fill=\"none\"/>",
                fmt_num(s.p0.0),
                fmt_num(s.p0.1),
                fmt_num(s.p1.0),
                fmt_num(s.p1.1),
                fmt_num(s.p2.0),
                fmt_num(s.p2.1),
                fmt_num(s.p3.0),
                fmt_num(s.p3.1),
            );
        }
    }

    // Ornaments in depth order: back leaves behind, fruit and blossoms on top.
    for wanted in [DepthLayer::Back, DepthLayer::Mid, DepthLayer::Front] {
        for item in scene.ornaments.iter().filter(|o| o.ornament.layer == wanted) {
            let o = &item.ornament;
            match o.kind {
                OrnamentKind::Leaf { yellowed } => write_leaf(&mut out, o, yellowed),
                OrnamentKind::Twig => write_twig(&mut out, o),
                OrnamentKind::Blossom => write_blossom(&mut out, o),
                OrnamentKind::Fruit => write_fruit(&mut out, o),
            }
        }
    }

    // Ground stack: underground band, soil line, roots, pebbles, grass.
    let soil = &scene.ground.soil;
    let underground_h = (scene.viewport.max_y - soil.y - soil.height).max(0.0);
    if underground_h > 0.0 {
        let _ = writeln!(
            out,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            fmt_num(soil.x),
            fmt_num(soil.y + soil.height),
            fmt_num(soil.width),
            fmt_num(underground_h),
            UNDERGROUND_FILL,
        );
    }
    let _ = writeln!(
        out,
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
        fmt_num(soil.x),
        fmt_num(soil.y),
        fmt_num(soil.width),
        fmt_num(soil.height),
        SOIL_FILL,
    );
    for root in &scene.ground.roots {
        let _ = writeln!(
            out,
            "<path class=\"root\" d=\"{}\" fill=\"{}\" opacity=\".94\"/>",
            path_data(root),
            ROOT_FILL,
        );
    }
    for p in &scene.ground.pebbles {
        let _ = writeln!(
            out,
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" fill=\"{}\" opacity=\"{}\"/>",
            fmt_num(p.x),
            fmt_num(p.y),
            fmt_num(p.rx),
            fmt_num(p.ry),
            PEBBLE_FILL,
            fmt_num(p.opacity),
        );
    }
    for blade in &scene.ground.grass {
        let _ = writeln!(
            out,
            "<path class=\"grass\" d=\"M {},{} Q {},{} {},{}\" fill=\"{}\" opacity=\".9\"/>",
            fmt_num(blade.left_x),
            fmt_num(soil.y),
            fmt_num(blade.base_x),
            fmt_num(soil.y - blade.height),
            fmt_num(blade.right_x),
            fmt_num(soil.y),
            GRASS_PALETTE[blade.color_index % GRASS_PALETTE.len()],
        );
    }

    if options.include_labels {
        for label in &scene.labels {
            write_label(&mut out, label, options);
        }
        let health = &scene.health;
        let _ = writeln!(
            out,
            "<text x=\"{}\" y=\"{}\" text-anchor=\"start\" fill=\"{}\" font-size=\"12\" font-weight=\"700\">health {}% · expected {}% · {}</text>",
            fmt_num(scene.viewport.min_x + 16.0),
            fmt_num(scene.viewport.min_y + 24.0),
            tier_color(health.tier),
            health.value,
            health.expected,
            tier_word(health.tier),
        );
    }

    out.push_str("</svg>\n");
    out
}
