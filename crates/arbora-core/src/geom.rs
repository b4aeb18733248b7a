//! Shared geometry primitives: euclid aliases, cubic beziers, vector paths.

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;
pub type Rect = euclid::Rect<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Clamps a progress percentage into `[0, 100]`. Non-finite inputs collapse to `0`.
pub fn clamp_progress(progress: f64) -> f64 {
    if !progress.is_finite() {
        return 0.0;
    }
    progress.clamp(0.0, 100.0)
}

/// A cubic bezier segment with y increasing downwards (SVG convention).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CubicBezier {
    pub p0: (f64, f64),
    pub p1: (f64, f64),
    pub p2: (f64, f64),
    pub p3: (f64, f64),
}

impl CubicBezier {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self {
            p0: (p0.x, p0.y),
            p1: (p1.x, p1.y),
            p2: (p2.x, p2.y),
            p3: (p3.x, p3.y),
        }
    }

    pub fn start(&self) -> Point {
        point(self.p0.0, self.p0.1)
    }

    pub fn end(&self) -> Point {
        point(self.p3.0, self.p3.1)
    }

    /// Evaluates the curve at `t` (clamped to `[0, 1]`).
    pub fn eval(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let (b0, b1, b2, b3) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        point(
            b0 * self.p0.0 + b1 * self.p1.0 + b2 * self.p2.0 + b3 * self.p3.0,
            b0 * self.p0.1 + b1 * self.p1.1 + b2 * self.p2.1 + b3 * self.p3.1,
        )
    }

    /// Derivative at `t` (clamped). The result may be a zero vector for a
    /// degenerate (all-coincident) curve; callers fall back to the chord.
    pub fn tangent(&self, t: f64) -> Vector {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let dx = 3.0 * u * u * (self.p1.0 - self.p0.0)
            + 6.0 * u * t * (self.p2.0 - self.p1.0)
            + 3.0 * t * t * (self.p3.0 - self.p2.0);
        let dy = 3.0 * u * u * (self.p1.1 - self.p0.1)
            + 6.0 * u * t * (self.p2.1 - self.p1.1)
            + 3.0 * t * t * (self.p3.1 - self.p2.1);
        vector(dx, dy)
    }

    /// Unit tangent at `t`, falling back to the start->end chord (or +x) when degenerate.
    pub fn unit_tangent(&self, t: f64) -> Vector {
        let d = self.tangent(t);
        let len = d.length();
        if len > 1e-9 {
            return d / len;
        }
        let chord = self.end() - self.start();
        let clen = chord.length();
        if clen > 1e-9 { chord / clen } else { vector(1.0, 0.0) }
    }

    /// Unit normal at `t` (tangent rotated a quarter turn counter-clockwise in
    /// screen coordinates).
    pub fn unit_normal(&self, t: f64) -> Vector {
        let tangent = self.unit_tangent(t);
        vector(tangent.y, -tangent.x)
    }

    /// Tangent angle at `t`, in degrees.
    pub fn tangent_angle_deg(&self, t: f64) -> f64 {
        let d = self.unit_tangent(t);
        d.y.atan2(d.x).to_degrees()
    }
}

/// One segment of a format-agnostic vector path. Maps 1:1 onto SVG path
/// commands but carries plain coordinates so any backend can consume it.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PathSeg {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadTo { cx: f64, cy: f64, x: f64, y: f64 },
    CurveTo { c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64 },
    Close,
}

impl PathSeg {
    pub fn move_to(p: Point) -> Self {
        Self::MoveTo { x: p.x, y: p.y }
    }

    pub fn line_to(p: Point) -> Self {
        Self::LineTo { x: p.x, y: p.y }
    }

    pub fn quad_to(c: Point, p: Point) -> Self {
        Self::QuadTo {
            cx: c.x,
            cy: c.y,
            x: p.x,
            y: p.y,
        }
    }

    pub fn curve_to(c1: Point, c2: Point, p: Point) -> Self {
        Self::CurveTo {
            c1x: c1.x,
            c1y: c1.y,
            c2x: c2.x,
            c2y: c2.y,
            x: p.x,
            y: p.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_eval_hits_endpoints() {
        let c = CubicBezier::new(
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(20.0, 10.0),
            point(30.0, 10.0),
        );
        assert_eq!(c.eval(0.0), point(0.0, 0.0));
        assert_eq!(c.eval(1.0), point(30.0, 10.0));
        let mid = c.eval(0.5);
        assert!(mid.x > 0.0 && mid.x < 30.0);
    }

    #[test]
    fn unit_tangent_degenerate_curve_falls_back() {
        let c = CubicBezier::new(
            point(5.0, 5.0),
            point(5.0, 5.0),
            point(5.0, 5.0),
            point(5.0, 5.0),
        );
        let t = c.unit_tangent(0.5);
        assert!((t.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn clamp_progress_handles_out_of_range_and_non_finite() {
        assert_eq!(clamp_progress(-5.0), 0.0);
        assert_eq!(clamp_progress(250.0), 100.0);
        assert_eq!(clamp_progress(f64::NAN), 0.0);
        assert_eq!(clamp_progress(55.5), 55.5);
    }
}
