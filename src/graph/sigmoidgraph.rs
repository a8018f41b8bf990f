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

// Logistic window in the exponent; fixed, not persisted.
const T0: f64 = -100.0;
const T1: f64 = 100.0;

const MAX_BASE: f64 = 0.999999;
const GRIP_HEIGHT: f64 = 0.3;

/// Logistic step 1 / (1 + k^(200t - 100)) renormalised so that t = 0 and t = 1 map to the
/// ends of the unit range.
///
/// `e` below 0.5 rises from 0 to 1, above 0.5 falls from 1 to 0. Steepness grows towards
/// `e = 0.5`, where the curve is a hard step; near 0 and 1 it flattens into a line.
#[derive(Debug, Clone, PartialEq)]
pub struct SigmoidGraph {
    e: f64,
}

impl SigmoidGraph {
    pub fn new() -> SigmoidGraph {
        SigmoidGraph { e: 0.15 }
    }

    pub fn with_e(e: f64) -> SigmoidGraph {
        SigmoidGraph { e }
    }

    pub fn e(&self) -> f64 {
        self.e
    }

    fn descending(&self) -> bool {
        self.e > 0.5
    }

    /// k = min(e'^0.25, 0.999999) with e' the distance of e from 0.5 scaled to [0, 1].
    fn base(&self) -> f64 {
        let e = if self.e <= 0.5 {
            1.0 - self.e / 0.5
        } else {
            (self.e - 0.5) / 0.5
        };
        e.powf(0.25).min(MAX_BASE)
    }

    fn raw(base: f64, t: f64) -> f64 {
        1.0 / (1.0 + base.powf(t * (T1 - T0) + T0))
    }

    pub fn start_value(&self) -> f64 {
        if self.descending() { 1.0 } else { 0.0 }
    }

    pub fn end_value(&self) -> f64 {
        if self.descending() { 0.0 } else { 1.0 }
    }
}

impl Default for SigmoidGraph {
    fn default() -> Self {
        SigmoidGraph::new()
    }
}

impl Graph for SigmoidGraph {
    fn kind(&self) -> GraphKind {
        GraphKind::Sigmoid
    }

    fn value_at_with(&self, t: f64, _settings: &IntersectionSettings) -> f64 {
        if t <= 0.0 {
            return self.start_value();
        }
        if t >= 1.0 {
            return self.end_value();
        }
        let base = self.base();
        let mut r = Self::raw(base, t);
        if self.descending() {
            r = 1.0 - r;
        }
        // renormalised against the unflipped ends
        let r0 = Self::raw(base, 0.0);
        let r1 = Self::raw(base, 1.0);
        (r - r0) / (r1 - r0)
    }

    fn grips(&self) -> Vec<Grip> {
        vec![Grip::new(self.e, GRIP_HEIGHT, GripConstraint::LockY)]
    }

    fn apply_grip_edit(&mut self, index: usize, x: f64, y: f64) -> bool {
        if index != 0 {
            return false;
        }
        self.e = self.grips()[0].constrained_move(x, y).x();
        true
    }

    fn clear_caches(&mut self) {}

    fn write(&self, chunk: &mut Chunk) {
        chunk.set_double("e", self.e);
    }

    fn read(chunk: &Chunk) -> Result<SigmoidGraph, ChunkError> {
        let e = chunk.get_double("e")?;
        if !e.is_finite() {
            return Err(ChunkError::invalid_value("e", "not a finite number"));
        }
        Ok(SigmoidGraph { e })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::SigmoidGraph;
    use crate::graph::graph::Graph;
    use crate::serialization::chunk::Chunk;

    #[test]
    fn default_rises_from_zero_to_one() {
        let graph = SigmoidGraph::new();
        assert_eq!(graph.value_at(0.0), 0.0);
        assert_eq!(graph.value_at(1.0), 1.0);
        assert_abs_diff_eq!(graph.value_at(0.5), 0.5, epsilon = 1e-12);
        let mut prev = graph.value_at(0.0);
        for i in 1..=100 {
            let v = graph.value_at(i as f64 / 100.0);
            assert!(v >= prev - 1e-12);
            prev = v;
        }
        assert!(graph.value_at(0.25) < 0.25);
        assert!(graph.value_at(0.75) > 0.75);
    }

    #[test]
    fn matches_closed_form() {
        let graph = SigmoidGraph::with_e(0.3);
        let k: f64 = (1.0_f64 - 0.3 / 0.5).powf(0.25);
        let raw = |t: f64| 1.0 / (1.0 + k.powf(t * 200.0 - 100.0));
        let t = 0.42;
        let expected = (raw(t) - raw(0.0)) / (raw(1.0) - raw(0.0));
        assert_abs_diff_eq!(graph.value_at(t), expected, epsilon = 1e-12);
    }

    #[test]
    fn interior_meets_boundaries() {
        for e in [0.05, 0.3, 0.45, 0.6, 0.9] {
            let graph = SigmoidGraph::with_e(e);
            assert_abs_diff_eq!(graph.value_at(1e-9), graph.value_at(0.0), epsilon = 1e-6);
            assert_abs_diff_eq!(graph.value_at(1.0 - 1e-9), graph.value_at(1.0), epsilon = 1e-6);
        }
    }

    #[test]
    fn upper_half_mirrors_lower_half() {
        let rising = SigmoidGraph::with_e(0.2);
        let falling = SigmoidGraph::with_e(0.8);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            assert_abs_diff_eq!(falling.value_at(t), 1.0 - rising.value_at(t), epsilon = 1e-9);
        }
    }

    #[test]
    fn flattens_to_a_line_at_the_extremes() {
        let rising = SigmoidGraph::with_e(0.0);
        let falling = SigmoidGraph::with_e(1.0);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            assert_abs_diff_eq!(rising.value_at(t), t, epsilon = 1e-6);
            assert_abs_diff_eq!(falling.value_at(t), 1.0 - t, epsilon = 1e-6);
        }
    }

    #[test]
    fn midpoint_is_a_step() {
        let graph = SigmoidGraph::with_e(0.5);
        assert_eq!(graph.value_at(0.25), 0.0);
        assert_eq!(graph.value_at(0.5), 0.5);
        assert_eq!(graph.value_at(0.75), 1.0);
    }

    #[test]
    fn grip_drives_e_horizontally() {
        let mut graph = SigmoidGraph::new();
        assert!(graph.apply_grip_edit(0, 0.7, 0.9));
        assert_eq!(graph.e(), 0.7);
        assert_eq!(graph.grips()[0].y(), 0.3);
        assert!(!graph.apply_grip_edit(1, 0.2, 0.2));
    }

    #[test]
    fn reads_back_e_and_ignores_window_fields() {
        let mut chunk = Chunk::new("graph");
        SigmoidGraph::with_e(0.62).write(&mut chunk);
        chunk.set_double("t0", -100.0);
        chunk.set_double("t1", 100.0);
        assert_eq!(SigmoidGraph::read(&chunk).unwrap(), SigmoidGraph::with_e(0.62));
    }
}
