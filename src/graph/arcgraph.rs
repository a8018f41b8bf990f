use crate::graph::graph::{
    Graph,
    GraphKind
};
use crate::graph::grip::{
    Grip,
    GripConstraint
};
use crate::math::curve::intersection::IntersectionSettings;
use crate::serialization::chunk::Chunk;
use crate::serialization::chunkerror::ChunkError;

const GRIP_OFFSET: f64 = 0.3;

/// Superellipse arch sqrt(1 - |2t - 1|^p).
///
/// Above 0.5 the arch is convex (0 at both ends, 1 in the middle); below 0.5 it is
/// flipped into a valley. The exponent p grows with the distance of `e` from 0.5.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcGraph {
    e: f64,
}

impl ArcGraph {
    pub fn new() -> ArcGraph {
        ArcGraph { e: 0.55 }
    }

    pub fn with_e(e: f64) -> ArcGraph {
        ArcGraph { e }
    }

    pub fn e(&self) -> f64 {
        self.e
    }

    fn concave(&self) -> bool {
        self.e < 0.5
    }

    fn exponent(&self) -> f64 {
        let e = if self.e <= 0.5 {
            1.0 - self.e / 0.5
        } else {
            (self.e - 0.5) / 0.5
        };
        let e = e * 0.9 + 0.1;
        e.powi(2) * 100.0
    }

    pub fn boundary_value(&self) -> f64 {
        if self.concave() { 1.0 } else { 0.0 }
    }
}

impl Default for ArcGraph {
    fn default() -> Self {
        ArcGraph::new()
    }
}

impl Graph for ArcGraph {
    fn kind(&self) -> GraphKind {
        GraphKind::Arc
    }

    fn value_at_with(&self, t: f64, _settings: &IntersectionSettings) -> f64 {
        if t <= 0.0 || t >= 1.0 {
            return self.boundary_value();
        }
        let u = t * 2.0 - 1.0;
        let r = (1.0 - u.abs().powf(self.exponent())).sqrt();
        if self.concave() { 1.0 - r } else { r }
    }

    fn grips(&self) -> Vec<Grip> {
        vec![Grip::new(GRIP_OFFSET, self.e, GripConstraint::LockX)]
    }

    fn apply_grip_edit(&mut self, index: usize, x: f64, y: f64) -> bool {
        if index != 0 {
            return false;
        }
        self.e = self.grips()[0].constrained_move(x, y).y();
        true
    }

    fn clear_caches(&mut self) {}

    fn write(&self, chunk: &mut Chunk) {
        chunk.set_double("e", self.e);
    }

    fn read(chunk: &Chunk) -> Result<ArcGraph, ChunkError> {
        let e = chunk.get_double("e")?;
        if !e.is_finite() {
            return Err(ChunkError::invalid_value("e", "not a finite number"));
        }
        Ok(ArcGraph { e })
    }
}
