use serde::{
    Deserialize,
    Serialize
};

use crate::math::remap::remap;

/// A numeric domain `[t0, t1]`. The bounds are not required to be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    t0: f64,
    t1: f64
}

impl Interval {
    pub fn new(t0: f64, t1: f64) -> Interval {
        Interval { t0: t0, t1: t1 }
    }

    pub fn unit() -> Interval {
        Interval::new(0.0, 1.0)
    }

    pub fn t0(&self) -> f64 {
        self.t0
    }

    pub fn t1(&self) -> f64 {
        self.t1
    }

    pub fn length(&self) -> f64 {
        self.t1 - self.t0
    }

    pub fn is_valid(&self) -> bool {
        self.t0.is_finite() && self.t1.is_finite()
    }

    pub fn is_degenerate(&self) -> bool {
        self.t0 == self.t1
    }

    /// Rescales `v` from this interval into `target`.
    pub fn remap_to(&self, v: f64, target: &Interval) -> f64 {
        remap(v, self.t0, self.t1, target.t0, target.t1)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Interval::unit()
    }
}
