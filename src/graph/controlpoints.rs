use crate::graph::grip::{
    Grip,
    GripConstraint
};
use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;
use crate::serialization::chunk::{
    Chunk,
    Point3D
};
use crate::serialization::chunkerror::ChunkError;

pub const MIN_POINT_COUNT: usize = 3;
/// Largest count offered when choosing a point count.
pub const MAX_POINT_COUNT: usize = 10;

const COUNT_KEY: &str = "count";
const POINT_KEY: &str = "pt";

/// Ordered grip positions of the point-based graphs.
///
/// The first and last point only move vertically.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoints {
    points: Vec<Point2D>,
}

impl ControlPoints {
    /// `count` points on the diagonal from (0, 0) to (1, 1); at least three.
    pub fn diagonal(count: usize) -> ControlPoints {
        let count = count.max(MIN_POINT_COUNT);
        let last = (count - 1) as f64;
        let points = (0..count)
            .map(|i| {
                let v = i as f64 / last;
                Point2D::new(v, v)
            })
            .collect();
        ControlPoints { points: points }
    }

    pub fn from_points(points: Vec<Point2D>) -> ControlPoints {
        ControlPoints { points: points }
    }

    pub fn as_slice(&self) -> &[Point2D] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_y(&self) -> f64 {
        self.points.first().map_or(f64::NAN, |pt| pt.y())
    }

    pub fn last_y(&self) -> f64 {
        self.points.last().map_or(f64::NAN, |pt| pt.y())
    }

    pub fn get(&self, index: usize) -> Option<Point2D> {
        self.points.get(index).copied()
    }

    /// Overwrites a point without any constraint.
    pub fn set(&mut self, index: usize, point: Point2D) {
        if let Some(slot) = self.points.get_mut(index) {
            *slot = point;
        }
    }

    pub fn grips(&self) -> Vec<Grip> {
        let last = self.points.len().saturating_sub(1);
        self.points
            .iter()
            .enumerate()
            .map(|(i, pt)| {
                let constraint = if i == 0 || i == last {
                    GripConstraint::LockX
                } else {
                    GripConstraint::Free
                };
                Grip::new(pt.x(), pt.y(), constraint)
            })
            .collect()
    }

    /// Moves point `index` within its grip constraint and returns (old, new).
    pub fn move_grip(&mut self, index: usize, x: f64, y: f64) -> Option<(Point2D, Point2D)> {
        let grip = self.grips().get(index).copied()?;
        let old = self.points[index];
        let new = grip.constrained_move(x, y);
        self.points[index] = new;
        Some((old, new))
    }

    pub fn write(&self, chunk: &mut Chunk) {
        chunk.set_int32(COUNT_KEY, self.points.len() as i32);
        for (i, pt) in self.points.iter().enumerate() {
            chunk.set_point3d(POINT_KEY, i as i32, Point3D::new(pt.x(), pt.y(), 0.0));
        }
    }

    /// Reads `count` + `pt[i]`. With `fixed_count` a missing count is accepted and any
    /// other count is rejected.
    pub fn read(chunk: &Chunk, fixed_count: Option<usize>) -> Result<ControlPoints, ChunkError> {
        let count = match fixed_count {
            Some(fixed) if !chunk.contains(COUNT_KEY) => fixed,
            _ => {
                let count = chunk.get_int32(COUNT_KEY)?;
                if count < MIN_POINT_COUNT as i32 {
                    return Err(ChunkError::invalid_value(
                        COUNT_KEY,
                        format!("{count} is below the minimum of {MIN_POINT_COUNT}"),
                    ));
                }
                let count = count as usize;
                if count > chunk.len() {
                    return Err(ChunkError::invalid_value(
                        COUNT_KEY,
                        format!("{count} points declared, record holds {} fields", chunk.len()),
                    ));
                }
                if let Some(fixed) = fixed_count {
                    if count != fixed {
                        return Err(ChunkError::invalid_value(
                            COUNT_KEY,
                            format!("expected {fixed} points, found {count}"),
                        ));
                    }
                }
                count
            }
        };

        let mut points = Vec::new();
        for i in 0..count {
            let raw = chunk.get_point3d(POINT_KEY, i as i32)?;
            if !raw.x.is_finite() || !raw.y.is_finite() {
                return Err(ChunkError::invalid_value(
                    &format!("{POINT_KEY}[{i}]"),
                    "coordinates must be finite",
                ));
            }
            points.push(Point2D::new(raw.x, raw.y));
        }
        Ok(ControlPoints { points: points })
    }
}

#[cfg(test)]
mod tests {
    use super::ControlPoints;
    use crate::graph::grip::GripConstraint;
    use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;
    use crate::serialization::chunk::{
        Chunk,
        Point3D
    };
    use crate::serialization::chunkerror::ChunkError;

    #[test]
    fn diagonal_has_at_least_three_points() {
        let points = ControlPoints::diagonal(1);
        assert_eq!(points.len(), 3);
        assert_eq!(points.get(1), Some(Point2D::new(0.5, 0.5)));
        assert_eq!(ControlPoints::diagonal(5).get(3), Some(Point2D::new(0.75, 0.75)));
    }

    #[test]
    fn endpoints_move_vertically_only() {
        let mut points = ControlPoints::diagonal(4);
        let grips = points.grips();
        assert_eq!(grips[0].constraint(), GripConstraint::LockX);
        assert_eq!(grips[1].constraint(), GripConstraint::Free);
        assert_eq!(grips[3].constraint(), GripConstraint::LockX);

        let (old, new) = points.move_grip(3, 0.2, 0.4).unwrap();
        assert_eq!(old, Point2D::new(1.0, 1.0));
        assert_eq!(new, Point2D::new(1.0, 0.4));
        assert_eq!(points.last_y(), 0.4);
        assert!(points.move_grip(4, 0.2, 0.4).is_none());
    }

    #[test]
    fn written_points_read_back() {
        let mut points = ControlPoints::diagonal(4);
        points.move_grip(1, 0.1, 0.9);
        let mut chunk = Chunk::new("graph");
        points.write(&mut chunk);
        assert_eq!(chunk.get_int32("count").unwrap(), 4);
        assert_eq!(chunk.get_point3d("pt", 1).unwrap().z, 0.0);
        assert_eq!(ControlPoints::read(&chunk, None).unwrap(), points);
    }

    #[test]
    fn rejects_short_or_broken_records() {
        let mut chunk = Chunk::new("graph");
        ControlPoints::diagonal(3).write(&mut chunk);
        chunk.set_int32("count", 2);
        assert!(matches!(
            ControlPoints::read(&chunk, None),
            Err(ChunkError::InvalidValue { .. })
        ));

        chunk.set_int32("count", 3);
        chunk.set_point3d("pt", 2, Point3D::new(f64::NAN, 1.0, 0.0));
        assert!(matches!(
            ControlPoints::read(&chunk, None),
            Err(ChunkError::InvalidValue { .. })
        ));

        chunk.set_point3d("pt", 2, Point3D::new(1.0, 1.0, 0.0));
        chunk.set_int32("count", 4);
        assert!(matches!(
            ControlPoints::read(&chunk, None),
            Err(ChunkError::MissingField(_))
        ));
    }

    #[test]
    fn oversized_count_is_rejected() {
        let mut chunk = Chunk::new("graph");
        ControlPoints::diagonal(5).write(&mut chunk);
        chunk.set_int32("count", i32::MAX);
        assert!(matches!(
            ControlPoints::read(&chunk, None),
            Err(ChunkError::InvalidValue { .. })
        ));
    }

    #[test]
    fn fixed_count_accepts_missing_count_only() {
        let mut chunk = Chunk::new("graph");
        for i in 0..3 {
            chunk.set_point3d("pt", i, Point3D::new(0.0, i as f64 / 2.0, 0.0));
        }
        assert_eq!(ControlPoints::read(&chunk, Some(3)).unwrap().len(), 3);
        chunk.set_int32("count", 4);
        assert!(ControlPoints::read(&chunk, Some(3)).is_err());
    }
}
