use crate::math::curve::curve::{
    Curve,
    ParametricCurve
};
use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;
use crate::math::curve::nonparametriccurve::piecewisepolynomial::{
    PiecewisePolynomial,
    PolynomialType
};

/// Planar spline through a list of points, each coordinate interpolated over knots u_i.
#[derive(Debug, Clone)]
pub struct ParametricSpline {
    knots: Vec<f64>,
    x: PiecewisePolynomial,
    y: PiecewisePolynomial,
}

impl ParametricSpline {
    /// Straight segments, knot `i` at u = i.
    pub fn polyline(points: &[Point2D]) -> Option<ParametricSpline> {
        if points.len() < 2 {
            return None;
        }
        let knots = uniform_knots(points.len());
        Self::build(points, knots, |_| PolynomialType::Linear)
    }

    /// Cubic interpolation with clamped end tangents along the first and last segment.
    ///
    /// Knots follow the square root of the chord lengths. When two consecutive points
    /// coincide the spacing falls back to uniform knots.
    pub fn interpolated(points: &[Point2D]) -> Option<ParametricSpline> {
        if points.len() < 2 {
            return None;
        }
        let knots = centripetal_knots(points).unwrap_or_else(|| uniform_knots(points.len()));
        let n = points.len() - 1;
        let h_first = knots[1] - knots[0];
        let h_last = knots[n] - knots[n - 1];
        let start_tangent = (points[1] - points[0]) * (1.0 / h_first);
        let end_tangent = (points[n] - points[n - 1]) * (1.0 / h_last);
        Self::build(points, knots, |coordinate| {
            let (left, right) = match coordinate {
                Coordinate::X => (start_tangent.x(), end_tangent.x()),
                Coordinate::Y => (start_tangent.y(), end_tangent.y()),
            };
            PolynomialType::ClampedCubic { left, right }
        })
    }

    fn build(
        points: &[Point2D],
        knots: Vec<f64>,
        polynomial_type: impl Fn(Coordinate) -> PolynomialType,
    ) -> Option<ParametricSpline> {
        let x_points: Vec<Point2D> = knots
            .iter()
            .zip(points.iter())
            .map(|(&u, pt)| Point2D::new(u, pt.x()))
            .collect();
        let y_points: Vec<Point2D> = knots
            .iter()
            .zip(points.iter())
            .map(|(&u, pt)| Point2D::new(u, pt.y()))
            .collect();
        let x_type = polynomial_type(Coordinate::X);
        let y_type = polynomial_type(Coordinate::Y);
        Some(ParametricSpline {
            x: PiecewisePolynomial::new(x_type, x_points)?,
            y: PiecewisePolynomial::new(y_type, y_points)?,
            knots,
        })
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }
}

#[derive(Clone, Copy)]
enum Coordinate {
    X,
    Y,
}

fn uniform_knots(count: usize) -> Vec<f64> {
    (0..count).map(|i| i as f64).collect()
}

fn centripetal_knots(points: &[Point2D]) -> Option<Vec<f64>> {
    let mut knots = Vec::with_capacity(points.len());
    knots.push(0.0);
    let mut u = 0.0;
    for pair in points.windows(2) {
        let step = pair[0].distance_to(&pair[1]).sqrt();
        if !(step > 0.0) || !step.is_finite() {
            return None;
        }
        u += step;
        knots.push(u);
    }
    Some(knots)
}

impl ParametricCurve for ParametricSpline {
    fn segment_count(&self) -> usize {
        self.knots.len() - 1
    }

    fn segment_domain(&self, index: usize) -> (f64, f64) {
        (self.knots[index], self.knots[index + 1])
    }

    fn point_at(&self, u: f64) -> Point2D {
        Point2D::new(self.x.value(u), self.y.value(u))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::ParametricSpline;
    use crate::math::curve::curve::ParametricCurve;
    use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;

    fn diagonal(count: usize) -> Vec<Point2D> {
        (0..count)
            .map(|i| {
                let v = i as f64 / (count as f64 - 1.0);
                Point2D::new(v, v)
            })
            .collect()
    }

    #[test]
    fn polyline_passes_through_points() {
        let pts = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(0.5, 1.0),
            Point2D::new(1.0, 0.0),
        ];
        let spline = ParametricSpline::polyline(&pts).unwrap();
        assert_eq!(spline.segment_count(), 2);
        assert_eq!(spline.point_at(1.0), pts[1]);
        let mid = spline.point_at(0.5);
        assert_abs_diff_eq!(mid.x(), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(mid.y(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn interpolated_diagonal_stays_on_diagonal() {
        let spline = ParametricSpline::interpolated(&diagonal(5)).unwrap();
        let (start, end) = (spline.segment_domain(0).0, spline.segment_domain(3).1);
        for i in 0..=40 {
            let u = start + (end - start) * i as f64 / 40.0;
            let pt = spline.point_at(u);
            assert_abs_diff_eq!(pt.x(), pt.y(), epsilon = 1e-10);
        }
        assert_abs_diff_eq!(spline.point_at(end).x(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn interpolated_hits_every_point() {
        let pts = vec![
            Point2D::new(0.0, 0.2),
            Point2D::new(0.3, 0.9),
            Point2D::new(0.6, 0.1),
            Point2D::new(1.0, 0.7),
        ];
        let spline = ParametricSpline::interpolated(&pts).unwrap();
        for (i, pt) in pts.iter().enumerate() {
            let got = spline.point_at(spline.knots()[i]);
            assert_abs_diff_eq!(got.x(), pt.x(), epsilon = 1e-10);
            assert_abs_diff_eq!(got.y(), pt.y(), epsilon = 1e-10);
        }
    }

    #[test]
    fn interpolated_tolerates_repeated_points() {
        let pts = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(0.5, 0.5),
            Point2D::new(0.5, 0.5),
            Point2D::new(1.0, 1.0),
        ];
        let spline = ParametricSpline::interpolated(&pts).unwrap();
        assert_eq!(spline.knots(), &[0.0, 1.0, 2.0, 3.0]);
    }
}
