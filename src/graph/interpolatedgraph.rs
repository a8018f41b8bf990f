use std::cell::OnceCell;

use crate::graph::controlpoints::ControlPoints;
use crate::graph::graph::{
    Graph,
    GraphKind
};
use crate::graph::grip::Grip;
use crate::math::curve::intersection::{
    evaluate_at_x,
    IntersectionSettings
};
use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;
use crate::math::curve::parametriccurve::parametricspline::ParametricSpline;
use crate::serialization::chunk::Chunk;
use crate::serialization::chunkerror::ChunkError;

/// Smooth cubic spline through the control points.
#[derive(Debug, Clone)]
pub struct InterpolatedGraph {
    points: ControlPoints,
    curve: OnceCell<Option<ParametricSpline>>,
}

impl InterpolatedGraph {
    pub fn new() -> InterpolatedGraph {
        InterpolatedGraph::with_point_count(5)
    }

    pub fn with_point_count(count: usize) -> InterpolatedGraph {
        InterpolatedGraph::from_control_points(ControlPoints::diagonal(count))
    }

    pub fn from_points(points: Vec<Point2D>) -> InterpolatedGraph {
        InterpolatedGraph::from_control_points(ControlPoints::from_points(points))
    }

    fn from_control_points(points: ControlPoints) -> InterpolatedGraph {
        InterpolatedGraph {
            points: points,
            curve: OnceCell::new(),
        }
    }

    pub fn points(&self) -> &[Point2D] {
        self.points.as_slice()
    }

    pub fn curve(&self) -> Option<&ParametricSpline> {
        self.curve
            .get_or_init(|| ParametricSpline::interpolated(self.points.as_slice()))
            .as_ref()
    }
}

impl Default for InterpolatedGraph {
    fn default() -> Self {
        InterpolatedGraph::new()
    }
}

impl Graph for InterpolatedGraph {
    fn kind(&self) -> GraphKind {
        GraphKind::Interpolated
    }

    fn value_at_with(&self, t: f64, settings: &IntersectionSettings) -> f64 {
        if t <= 0.0 {
            return self.points.first_y();
        }
        if t >= 1.0 {
            return self.points.last_y();
        }
        self.curve()
            .map_or(f64::NAN, |curve| evaluate_at_x(curve, t, settings))
    }

    fn grips(&self) -> Vec<Grip> {
        self.points.grips()
    }

    fn apply_grip_edit(&mut self, index: usize, x: f64, y: f64) -> bool {
        match self.points.move_grip(index, x, y) {
            Some(_) => {
                self.clear_caches();
                true
            }
            None => false,
        }
    }

    fn clear_caches(&mut self) {
        self.curve.take();
    }

    fn write(&self, chunk: &mut Chunk) {
        self.points.write(chunk);
    }

    fn read(chunk: &Chunk) -> Result<InterpolatedGraph, ChunkError> {
        let points = ControlPoints::read(chunk, None)?;
        Ok(InterpolatedGraph::from_control_points(points))
    }
}
