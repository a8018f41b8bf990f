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

/// Straight segments through the control points, read along vertical lines.
#[derive(Debug, Clone)]
pub struct PolylineGraph {
    points: ControlPoints,
    curve: OnceCell<Option<ParametricSpline>>,
}

impl PolylineGraph {
    pub fn new() -> PolylineGraph {
        PolylineGraph::with_point_count(5)
    }

    pub fn with_point_count(count: usize) -> PolylineGraph {
        PolylineGraph::from_control_points(ControlPoints::diagonal(count))
    }

    pub fn from_points(points: Vec<Point2D>) -> PolylineGraph {
        PolylineGraph::from_control_points(ControlPoints::from_points(points))
    }

    fn from_control_points(points: ControlPoints) -> PolylineGraph {
        PolylineGraph {
            points: points,
            curve: OnceCell::new(),
        }
    }

    pub fn points(&self) -> &[Point2D] {
        self.points.as_slice()
    }

    pub fn curve(&self) -> Option<&ParametricSpline> {
        self.curve
            .get_or_init(|| ParametricSpline::polyline(self.points.as_slice()))
            .as_ref()
    }
}

impl Default for PolylineGraph {
    fn default() -> Self {
        PolylineGraph::new()
    }
}

impl Graph for PolylineGraph {
    fn kind(&self) -> GraphKind {
        GraphKind::Polyline
    }

    fn value_at_with(&self, t: f64, settings: &IntersectionSettings) -> f64 {
        if t <= 0.0 {
            return self.points.first_y();
        }
        if t >= 1.0 {
            return self.points.last_y();
        }
        match self.curve() {
            Some(curve) => evaluate_at_x(curve, t, settings),
            None => f64::NAN,
        }
    }

    fn grips(&self) -> Vec<Grip> {
        self.points.grips()
    }

    fn apply_grip_edit(&mut self, index: usize, x: f64, y: f64) -> bool {
        if self.points.move_grip(index, x, y).is_none() {
            return false;
        }
        self.clear_caches();
        true
    }

    fn clear_caches(&mut self) {
        self.curve = OnceCell::new();
    }

    fn write(&self, chunk: &mut Chunk) {
        self.points.write(chunk);
    }

    fn read(chunk: &Chunk) -> Result<PolylineGraph, ChunkError> {
        Ok(PolylineGraph::from_control_points(ControlPoints::read(chunk, None)?))
    }
}
