//! Axis-aligned bounding box

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounds of a point set.
///
/// The empty box keeps `min` at positive and `max` at negative infinity so
/// that expanding it with the first point produces a degenerate box around
/// that point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    /// Create an empty bounding box
    pub fn empty() -> Self {
        Self {
            min: DVec3::splat(f64::INFINITY),
            max: DVec3::splat(f64::NEG_INFINITY),
        }
    }

    /// Create a bounding box from explicit corners
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Compute the bounds of a set of points
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Self {
        let mut bounds = Self::empty();
        for point in points {
            bounds.expand_to_include(point);
        }
        bounds
    }

    /// Grow the bounds to contain the given point
    pub fn expand_to_include(&mut self, point: DVec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// True when no point has been included yet
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Geometric center of the box
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bounds() {
        let bounds = Aabb::empty();
        assert!(bounds.is_empty());
    }

    #[test]
    fn test_from_points() {
        let bounds = Aabb::from_points([
            DVec3::new(1.0, -2.0, 3.0),
            DVec3::new(-1.0, 4.0, 0.0),
            DVec3::new(0.5, 0.0, 5.0),
        ]);
        assert_eq!(bounds.min, DVec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bounds.max, DVec3::new(1.0, 4.0, 5.0));
        assert!(!bounds.is_empty());
    }

    #[test]
    fn test_center_and_size() {
        let bounds = Aabb::new(DVec3::ZERO, DVec3::new(2.0, 4.0, 6.0));
        assert_eq!(bounds.center(), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(bounds.size(), DVec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_expand_single_point() {
        let mut bounds = Aabb::empty();
        bounds.expand_to_include(DVec3::new(1.0, 2.0, 3.0));
        assert!(!bounds.is_empty());
        assert_eq!(bounds.center(), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(bounds.size(), DVec3::ZERO);
    }
}
