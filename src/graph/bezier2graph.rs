use std::cell::OnceCell;

use log::debug;

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
use crate::math::curve::parametriccurve::bezier::PolyBezier;
use crate::serialization::chunk::Chunk;
use crate::serialization::chunkerror::ChunkError;

pub const POINT_COUNT: usize = 7;

const JOIN: usize = 3;
const LEFT_HANDLE: usize = 2;
const RIGHT_HANDLE: usize = 4;

const DEFAULT_POINTS: [(f64, f64); POINT_COUNT] = [
    (0.0, 0.0),
    (0.0, 0.3),
    (0.2, 0.5),
    (0.5, 0.5),
    (0.8, 0.5),
    (1.0, 0.7),
    (1.0, 1.0),
];

/// Two cubic Bezier segments sharing the join point 3.
///
/// The handles around the join stay collinear through it, so the curve is smooth at the
/// join after every edit.
#[derive(Debug, Clone)]
pub struct Bezier2Graph {
    points: ControlPoints,
    curve: OnceCell<Option<PolyBezier>>,
}

impl Bezier2Graph {
    pub fn new() -> Bezier2Graph {
        let points = DEFAULT_POINTS
            .iter()
            .map(|&(x, y)| Point2D::new(x, y))
            .collect();
        Bezier2Graph::from_control_points(ControlPoints::from_points(points))
    }

    /// `None` unless exactly seven points are given.
    pub fn from_points(points: Vec<Point2D>) -> Option<Bezier2Graph> {
        if points.len() != POINT_COUNT {
            return None;
        }
        Some(Bezier2Graph::from_control_points(ControlPoints::from_points(points)))
    }

    fn from_control_points(points: ControlPoints) -> Bezier2Graph {
        Bezier2Graph {
            points: points,
            curve: OnceCell::new(),
        }
    }

    pub fn points(&self) -> &[Point2D] {
        self.points.as_slice()
    }

    pub fn curve(&self) -> Option<&PolyBezier> {
        self.curve
            .get_or_init(|| PolyBezier::from_control_points(self.points.as_slice()))
            .as_ref()
    }

    // Re-aims `opposite` through the join, away from the handle that was just moved,
    // keeping its own distance to the join.
    fn align_opposite_handle(&mut self, moved: usize, opposite: usize) {
        let (Some(join), Some(handle), Some(other)) = (
            self.points.get(JOIN),
            self.points.get(moved),
            self.points.get(opposite),
        ) else {
            return;
        };
        let length = other.distance_to(&join);
        let direction = (join - handle)
            .normalized()
            .or_else(|| (other - join).normalized());
        if let Some(direction) = direction {
            self.points.set(opposite, join + direction * length);
        }
    }
}

impl Default for Bezier2Graph {
    fn default() -> Self {
        Bezier2Graph::new()
    }
}

impl Graph for Bezier2Graph {
    fn kind(&self) -> GraphKind {
        GraphKind::Bezier2
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
        let Some((old, new)) = self.points.move_grip(index, x, y) else {
            return false;
        };
        match index {
            JOIN => {
                let delta = new - old;
                for handle in [LEFT_HANDLE, RIGHT_HANDLE] {
                    if let Some(pt) = self.points.get(handle) {
                        self.points.set(handle, pt + delta);
                    }
                }
            }
            LEFT_HANDLE => self.align_opposite_handle(LEFT_HANDLE, RIGHT_HANDLE),
            RIGHT_HANDLE => self.align_opposite_handle(RIGHT_HANDLE, LEFT_HANDLE),
            _ => {}
        }
        debug!("bezier grip {index} moved to ({}, {})", new.x(), new.y());
        self.clear_caches();
        true
    }

    fn clear_caches(&mut self) {
        self.curve.take();
    }

    fn write(&self, chunk: &mut Chunk) {
        self.points.write(chunk);
    }

    fn read(chunk: &Chunk) -> Result<Bezier2Graph, ChunkError> {
        let points = ControlPoints::read(chunk, Some(POINT_COUNT))?;
        Ok(Bezier2Graph::from_control_points(points))
    }
}
