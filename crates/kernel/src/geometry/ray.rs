use serde::{Deserialize, Serialize};

use super::point::Point3d;
use super::vector::Vec3;

/// A half-line from `origin` along `direction`.
///
/// The direction is normalized on construction when possible; a zero
/// direction is kept as-is and simply never intersects anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point3d,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Point3d, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalized().unwrap_or(direction),
        }
    }

    /// Ray starting at `from` and passing through `through`.
    pub fn through(from: Point3d, through: Point3d) -> Self {
        Self::new(from, through - from)
    }

    pub fn at(&self, t: f64) -> Point3d {
        self.origin + self.direction * t
    }
}
