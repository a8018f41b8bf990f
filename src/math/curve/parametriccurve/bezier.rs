use crate::math::curve::curve::ParametricCurve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;

/// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    control_points: [Point2D; 4],
}

impl CubicBezier {
    pub fn new(p0: Point2D, p1: Point2D, p2: Point2D, p3: Point2D) -> CubicBezier {
        CubicBezier { control_points: [p0, p1, p2, p3] }
    }

    pub fn control_points(&self) -> &[Point2D; 4] {
        &self.control_points
    }

    pub fn point(&self, t: f64) -> Point2D {
        let [p0, p1, p2, p3] = self.control_points;
        let inv = 1.0 - t;
        let inv2 = inv * inv;
        let t2 = t * t;
        p0 * (inv2 * inv) + p1 * (3.0 * inv2 * t) + p2 * (3.0 * inv * t2) + p3 * (t2 * t)
    }
}

/// Chain of cubic segments; segment `i` spans u ∈ [i, i+1].
#[derive(Debug, Clone)]
pub struct PolyBezier {
    segments: Vec<CubicBezier>,
}

impl PolyBezier {
    /// Builds `(n - 1) / 3` segments from `n` control points sharing every third point.
    pub fn from_control_points(points: &[Point2D]) -> Option<PolyBezier> {
        if points.len() < 4 || (points.len() - 1) % 3 != 0 {
            return None;
        }
        let segments = points
            .windows(4)
            .step_by(3)
            .map(|w| CubicBezier::new(w[0], w[1], w[2], w[3]))
            .collect();
        Some(PolyBezier { segments })
    }

    pub fn segments(&self) -> &[CubicBezier] {
        &self.segments
    }
}

impl ParametricCurve for PolyBezier {
    fn segment_count(&self) -> usize {
        self.segments.len()
    }

    fn segment_domain(&self, index: usize) -> (f64, f64) {
        (index as f64, (index + 1) as f64)
    }

    fn point_at(&self, u: f64) -> Point2D {
        let last = self.segments.len() - 1;
        let index = if u <= 0.0 {
            0
        } else {
            (u.floor() as usize).min(last)
        };
        self.segments[index].point(u - index as f64)
    }
}
