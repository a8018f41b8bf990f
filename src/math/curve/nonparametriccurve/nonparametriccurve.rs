use std::ops::{
    Add,
    Mul,
    Sub
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x: x, y: y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn slope(lhs_pt: &Point2D, rhs_pt: &Point2D) -> f64 {
        (rhs_pt.y - lhs_pt.y) / (rhs_pt.x - lhs_pt.x)
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        (*other - *self).length()
    }

    /// Unit vector in the same direction, `None` for the zero vector.
    pub fn normalized(&self) -> Option<Point2D> {
        let length = self.length();
        if length > 0.0 && length.is_finite() {
            Some(Point2D::new(self.x / length, self.y / length))
        } else {
            None
        }
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2D {
    type Output = Point2D;

    fn mul(self, rhs: f64) -> Point2D {
        Point2D::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::Point2D;

    #[test]
    fn vector_arithmetic() {
        let a = Point2D::new(1.0, 2.0);
        let b = Point2D::new(4.0, 6.0);
        assert_eq!(b - a, Point2D::new(3.0, 4.0));
        assert_eq!(a + b, Point2D::new(5.0, 8.0));
        assert_eq!(a * 2.0, Point2D::new(2.0, 4.0));
        assert_relative_eq!(a.distance_to(&b), 5.0);
        assert_relative_eq!(Point2D::slope(&a, &b), 4.0 / 3.0);
    }

    #[test]
    fn normalized_rejects_zero_vector() {
        assert!(Point2D::new(0.0, 0.0).normalized().is_none());
        let unit = Point2D::new(3.0, 4.0).normalized().unwrap();
        assert_relative_eq!(unit.x(), 0.6);
        assert_relative_eq!(unit.y(), 0.8);
    }
}
