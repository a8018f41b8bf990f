use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;

/// Explicit curve y = f(x).
pub trait Curve {
    fn value(&self, x: f64) -> f64;
}

/// Curve traced by a parameter u, made of consecutive segments.
///
/// Segment `i` covers `segment_domain(i)`; adjacent segments share their end parameter.
pub trait ParametricCurve {
    fn segment_count(&self) -> usize;

    fn segment_domain(&self, index: usize) -> (f64, f64);

    fn point_at(&self, u: f64) -> Point2D;
}
