//! Geometry primitives for oriented-box measurement: points, vectors, rays,
//! planes, their intersections, and the renderable [`OrientedBox`] shape.

pub mod geometry;
pub mod obb;

pub use geometry::intersection::{RaySurfaceHit, ray_plane, ray_rectangle, signed_distance_along};
pub use geometry::plane::{Plane, Rectangle};
pub use geometry::point::Point3d;
pub use geometry::ray::Ray;
pub use geometry::vector::Vec3;
pub use obb::{BoxFace, FaceHit, LocalFrame, OrientedBox};

/// Errors raised by kernel constructors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    #[error("degenerate local frame: {what} direction has zero length")]
    DegenerateFrame { what: &'static str },
}

/// Global tolerance configuration for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Points closer than this are considered coincident (meters).
    pub coincidence: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { coincidence: 1e-7 }
    }
}

impl Tolerance {
    pub fn is_zero_length(&self, length: f64) -> bool {
        length.abs() < self.coincidence
    }
}

pub fn default_tolerance() -> Tolerance {
    Tolerance::default()
}
