//! SVG path-data serialization for the core's format-agnostic segments.

use arbora_core::geom::PathSeg;
use std::fmt::Write as _;

/// Formats a coordinate with at most three decimals, trimming trailing zeros.
pub fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    if v.abs() < 0.0005 {
        return "0".to_string();
    }
    let mut r = (v * 1000.0).round() / 1000.0;
    if r.abs() < 0.0005 {
        r = 0.0;
    }
    let mut s = format!("{r:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

/// Serializes path segments into SVG path data (`d` attribute).
pub fn path_data(segments: &[PathSeg]) -> String {
    let mut d = String::new();
    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        match *seg {
            PathSeg::MoveTo { x, y } => {
                let _ = write!(d, "M {},{}", fmt_num(x), fmt_num(y));
            }
            PathSeg::LineTo { x, y } => {
                let _ = write!(d, "L {},{}", fmt_num(x), fmt_num(y));
            }
            PathSeg::QuadTo { cx, cy, x, y } => {
                let _ = write!(d, "Q {},{} {},{}", fmt_num(cx), fmt_num(cy), fmt_num(x), fmt_num(y));
            }
            PathSeg::CurveTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => {
                let _ = write!(
                    d,
                    "C {},{} {},{} {},{}",
                    fmt_num(c1x),
                    fmt_num(c1y),
                    fmt_num(c2x),
                    fmt_num(c2y),
                    fmt_num(x),
                    fmt_num(y)
                );
            }
            PathSeg::Close => d.push('Z'),
        }
    }
    d
}
