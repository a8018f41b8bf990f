use log::warn;
use nalgebra::{
    DMatrix,
    DVector
};

use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;

// ─────────────────────────────────────────────
// Subpolynomial
// ─────────────────────────────────────────────

/// One segment, coefficients highest order first, expanded around `lhs_x`.
#[derive(Debug, Clone)]
struct Subpolynomial {
    coefs: Vec<f64>,
    lhs_x: f64,
}

impl Subpolynomial {
    fn value(&self, x: f64) -> f64 {
        let dx = x - self.lhs_x;
        self.coefs[1..]
            .iter()
            .fold(self.coefs[0], |acc, &c| f64::mul_add(acc, dx, c))
    }
}

// ─────────────────────────────────────────────
// Linear
// ─────────────────────────────────────────────

fn linear_coefs(points: &[Point2D]) -> Vec<Vec<f64>> {
    points
        .windows(2)
        .map(|pair| vec![Point2D::slope(&pair[0], &pair[1]), pair[0].y()])
        .collect()
}

// ─────────────────────────────────────────────
// ClampedCubic
// ─────────────────────────────────────────────

// Segment i from the second derivatives m[i], m[i + 1] at its ends:
// y_i + b (x - x_i) + m_i / 2 (x - x_i)^2 + (m_{i+1} - m_i) / (6 h_i) (x - x_i)^3
fn cubic_coefs(points: &[Point2D], h: &[f64], m: &[f64]) -> Vec<Vec<f64>> {
    h.iter()
        .enumerate()
        .map(|(i, &step)| {
            let rise = points[i + 1].y() - points[i].y();
            vec![
                (m[i + 1] - m[i]) / (6.0 * step),
                m[i] / 2.0,
                rise / step - step * (2.0 * m[i] + m[i + 1]) / 6.0,
                points[i].y(),
            ]
        })
        .collect()
}

/// Second derivatives at the knots of the C2 spline with end slopes `left` and `right`.
fn clamped_moments(points: &[Point2D], h: &[f64], left: f64, right: f64) -> Option<DVector<f64>> {
    let n = h.len();
    let secant = |i: usize| (points[i + 1].y() - points[i].y()) / h[i];
    let mut mat = DMatrix::<f64>::zeros(n + 1, n + 1);
    let mut rhs = DVector::<f64>::zeros(n + 1);

    mat[(0, 0)] = 2.0 * h[0];
    mat[(0, 1)] = h[0];
    rhs[0] = 6.0 * (secant(0) - left);

    for i in 1..n {
        mat[(i, i - 1)] = h[i - 1];
        mat[(i, i)]     = 2.0 * (h[i - 1] + h[i]);
        mat[(i, i + 1)] = h[i];
        rhs[i] = 6.0 * (secant(i) - secant(i - 1));
    }

    mat[(n, n - 1)] = h[n - 1];
    mat[(n, n)]     = 2.0 * h[n - 1];
    rhs[n] = 6.0 * (right - secant(n - 1));

    mat.lu().solve(&rhs)
}

fn clamped_cubic_coefs(points: &[Point2D], left: f64, right: f64) -> Option<Vec<Vec<f64>>> {
    let h: Vec<f64> = points.windows(2).map(|pair| pair[1].x() - pair[0].x()).collect();
    if h.iter().any(|&step| !(step > 0.0)) {
        return None;
    }
    match clamped_moments(points, &h, left, right) {
        Some(m) => Some(cubic_coefs(points, &h, m.as_slice())),
        None => {
            warn!("clamped cubic: singular moment system for {} knots", points.len());
            None
        }
    }
}

// ─────────────────────────────────────────────
// PolynomialType
// ─────────────────────────────────────────────

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PolynomialType {
    Linear,
    /// First derivative fixed at both ends.
    ClampedCubic {
        left: f64,
        right: f64,
    },
}

// ─────────────────────────────────────────────
// PiecewisePolynomial
// ─────────────────────────────────────────────

/// Interpolant through points with strictly increasing x. Outside the knots the first or
/// last segment is extended.
#[derive(Debug, Clone)]
pub struct PiecewisePolynomial {
    max_x: f64,
    subpolynomial_list: Vec<Subpolynomial>,
}

impl PiecewisePolynomial {
    /// `None` for fewer than two points, or for a clamped cubic whose knots do not increase.
    pub fn new(polynomial_type: PolynomialType, points: Vec<Point2D>) -> Option<PiecewisePolynomial> {
        if points.len() < 2 {
            return None;
        }

        let coef_list = match polynomial_type {
            PolynomialType::Linear => linear_coefs(&points),
            PolynomialType::ClampedCubic { left, right } => {
                clamped_cubic_coefs(&points, left, right)?
            }
        };

        let subpolynomial_list = coef_list
            .into_iter()
            .zip(points.iter())
            .map(|(coefs, pt)| Subpolynomial { coefs, lhs_x: pt.x() })
            .collect();

        Some(PiecewisePolynomial {
            subpolynomial_list,
            max_x: points[points.len() - 1].x(),
        })
    }

    fn find_segment(&self, x: f64) -> usize {
        if x >= self.max_x {
            self.subpolynomial_list.len() - 1
        } else {
            self.subpolynomial_list
                .partition_point(|s| s.lhs_x <= x)
                .saturating_sub(1)
        }
    }
}

impl Curve for PiecewisePolynomial {
    fn value(&self, x: f64) -> f64 {
        self.subpolynomial_list[self.find_segment(x)].value(x)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{
        PiecewisePolynomial,
        PolynomialType
    };
    use crate::math::curve::curve::Curve;
    use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;

    fn points(raw: &[(f64, f64)]) -> Vec<Point2D> {
        raw.iter().map(|&(x, y)| Point2D::new(x, y)).collect()
    }

    #[test]
    fn linear_interpolates_between_knots() {
        let curve = PiecewisePolynomial::new(
            PolynomialType::Linear,
            points(&[(0.0, 0.0), (1.0, 2.0), (3.0, 0.0)]),
        ).unwrap();
        assert_abs_diff_eq!(curve.value(0.5), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(curve.value(1.0), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(curve.value(2.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(curve.value(3.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn clamped_cubic_hits_knots_and_end_slopes() {
        let knots = points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 2.0)]);
        let curve = PiecewisePolynomial::new(
            PolynomialType::ClampedCubic { left: 0.5, right: -1.0 },
            knots.clone(),
        ).unwrap();
        for pt in &knots {
            assert_abs_diff_eq!(curve.value(pt.x()), pt.y(), epsilon = 1e-10);
        }
        let dx = 1e-6;
        assert_abs_diff_eq!((curve.value(dx) - curve.value(0.0)) / dx, 0.5, epsilon = 1e-4);
        assert_abs_diff_eq!((curve.value(3.0) - curve.value(3.0 - dx)) / dx, -1.0, epsilon = 1e-4);
    }

    #[test]
    fn clamped_cubic_reproduces_a_line() {
        let curve = PiecewisePolynomial::new(
            PolynomialType::ClampedCubic { left: 2.0, right: 2.0 },
            points(&[(0.0, 1.0), (0.5, 2.0), (2.0, 5.0)]),
        ).unwrap();
        for i in 0..=20 {
            let x = i as f64 / 10.0;
            assert_abs_diff_eq!(curve.value(x), 1.0 + 2.0 * x, epsilon = 1e-10);
        }
    }

    #[test]
    fn clamped_cubic_rejects_repeated_knots() {
        let curve = PiecewisePolynomial::new(
            PolynomialType::ClampedCubic { left: 0.0, right: 0.0 },
            points(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]),
        );
        assert!(curve.is_none());
    }

    #[test]
    fn too_few_points() {
        assert!(PiecewisePolynomial::new(PolynomialType::Linear, points(&[(0.0, 0.0)])).is_none());
    }

    #[test]
    fn extends_end_segments_outside_the_knots() {
        let curve = PiecewisePolynomial::new(
            PolynomialType::Linear,
            points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 3.0)]),
        ).unwrap();
        assert_abs_diff_eq!(curve.value(-1.0), -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(curve.value(3.0), 5.0, epsilon = 1e-12);
    }
}
