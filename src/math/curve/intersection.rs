use argmin::core::{
    CostFunction,
    Error,
    Executor,
    State
};
use argmin::solver::brent::BrentRoot;
use log::trace;
use serde::{
    Deserialize,
    Serialize
};

use crate::math::curve::curve::ParametricCurve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;

/// Intersection points whose y differ by less than this are the same point.
pub const SAME_POINT_TOLERANCE: f64 = 1e-9;

/// A root is accepted when x(u) is this close to the requested x.
const RESIDUAL_TOLERANCE: f64 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntersectionSettings {
    /// Brent tolerance on the curve parameter.
    pub tolerance: f64,
    pub max_iterations: u64,
    /// Sign-change samples per segment.
    pub subdivisions: usize,
}

impl Default for IntersectionSettings {
    fn default() -> Self {
        IntersectionSettings {
            tolerance: 1e-12,
            max_iterations: 100,
            subdivisions: 16,
        }
    }
}

/// x(u) - x along a parametric curve.
struct VerticalOffset<'a, C: ?Sized> {
    curve: &'a C,
    x: f64,
}

impl<C> CostFunction for VerticalOffset<'_, C>
where
    C: ParametricCurve + ?Sized,
{
    type Param = f64;
    type Output = f64;

    fn cost(&self, u: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.curve.point_at(*u).x() - self.x)
    }
}

fn solve_bracket<C>(
    curve: &C,
    x: f64,
    lower: f64,
    upper: f64,
    settings: &IntersectionSettings,
) -> Option<f64>
where
    C: ParametricCurve + ?Sized,
{
    let problem = VerticalOffset { curve, x };
    let solver = BrentRoot::new(lower, upper, settings.tolerance);
    let result = Executor::new(problem, solver)
        .configure(|state| state.param(lower).max_iters(settings.max_iterations))
        .run()
        .ok()?;
    let u = *result.state().get_param()?;
    if (curve.point_at(u).x() - x).abs() <= RESIDUAL_TOLERANCE {
        Some(u)
    } else {
        None
    }
}

/// All points where the vertical line through `x` crosses `curve`.
///
/// Segment joints can show up twice.
pub fn vertical_intersections<C>(
    curve: &C,
    x: f64,
    settings: &IntersectionSettings,
) -> Vec<Point2D>
where
    C: ParametricCurve + ?Sized,
{
    let mut hits = Vec::new();
    if !x.is_finite() {
        return hits;
    }
    let steps = settings.subdivisions.max(1);

    for index in 0..curve.segment_count() {
        let (start, end) = curve.segment_domain(index);
        let mut u0 = start;
        let mut f0 = curve.point_at(u0).x() - x;

        for step in 1..=steps {
            let u1 = if step == steps {
                end
            } else {
                start + (end - start) * step as f64 / steps as f64
            };
            let f1 = curve.point_at(u1).x() - x;

            if f0 == 0.0 {
                hits.push(curve.point_at(u0));
            } else if f0 * f1 < 0.0 {
                if let Some(u) = solve_bracket(curve, x, u0, u1, settings) {
                    hits.push(curve.point_at(u));
                }
            }
            u0 = u1;
            f0 = f1;
        }

        if f0 == 0.0 {
            hits.push(curve.point_at(u0));
        }
    }

    trace!("vertical line x = {x}: {} crossing(s)", hits.len());
    hits
}

/// y of the single point of `curve` above `x`.
///
/// NaN when the line misses the curve or crosses it at more than one distinct point.
pub fn evaluate_at_x<C>(curve: &C, x: f64, settings: &IntersectionSettings) -> f64
where
    C: ParametricCurve + ?Sized,
{
    let hits = vertical_intersections(curve, x, settings);
    let first = match hits.first() {
        Some(pt) => pt.y(),
        None => return f64::NAN,
    };
    if hits.iter().all(|pt| (pt.y() - first).abs() <= SAME_POINT_TOLERANCE) {
        first
    } else {
        f64::NAN
    }
}
