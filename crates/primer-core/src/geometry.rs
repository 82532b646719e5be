//! 2D geometry for node layouts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A 2D position assigned to a node by a layout pass or a loaded file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Distance from the origin.
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Mapping from node label to position. Ordered so that serialized output
/// is deterministic.
pub type Layout = BTreeMap<String, Point>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn norm_of_origin_is_zero() {
        assert_eq!(Point::new(0.0, 0.0).norm(), 0.0);
    }
}
