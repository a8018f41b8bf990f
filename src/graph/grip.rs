use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GripConstraint {
    Free,
    /// Only moves vertically.
    LockX,
    /// Only moves horizontally.
    LockY,
}

/// Control point exposed for editing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grip {
    x: f64,
    y: f64,
    constraint: GripConstraint,
}

impl Grip {
    pub fn new(x: f64, y: f64, constraint: GripConstraint) -> Grip {
        Grip { x, y, constraint }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn point(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    pub fn constraint(&self) -> GripConstraint {
        self.constraint
    }

    /// Position after a requested move: the locked coordinate is kept and the result
    /// is clamped to the unit square.
    pub fn constrained_move(&self, x: f64, y: f64) -> Point2D {
        let (x, y) = match self.constraint {
            GripConstraint::Free => (x, y),
            GripConstraint::LockX => (self.x, y),
            GripConstraint::LockY => (x, self.y),
        };
        Point2D::new(clamp_unit(x, self.x), clamp_unit(y, self.y))
    }
}

// NaN requests keep the current coordinate.
fn clamp_unit(value: f64, current: f64) -> f64 {
    if value.is_nan() {
        current
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Grip,
        GripConstraint
    };
    use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;

    #[test]
    fn constraints_keep_locked_axis() {
        let free = Grip::new(0.2, 0.3, GripConstraint::Free);
        let lock_x = Grip::new(0.2, 0.3, GripConstraint::LockX);
        let lock_y = Grip::new(0.2, 0.3, GripConstraint::LockY);
        assert_eq!(free.constrained_move(0.6, 0.7), Point2D::new(0.6, 0.7));
        assert_eq!(lock_x.constrained_move(0.6, 0.7), Point2D::new(0.2, 0.7));
        assert_eq!(lock_y.constrained_move(0.6, 0.7), Point2D::new(0.6, 0.3));
    }

    #[test]
    fn moves_are_clamped_to_unit_square() {
        let grip = Grip::new(0.5, 0.5, GripConstraint::Free);
        assert_eq!(grip.constrained_move(-1.0, 3.0), Point2D::new(0.0, 1.0));
        assert_eq!(grip.constrained_move(f64::NAN, 0.25), Point2D::new(0.5, 0.25));
    }
}
