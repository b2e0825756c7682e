//! The scene services the tool consumes: surface picking, the local frame
//! and geodesic interpolation.

use measure_kernel::{LocalFrame, Plane, Point3d, Ray, Vec3, ray_plane};

use crate::error::ToolError;

/// Synchronous scene queries used by construction and refinement.
pub trait Scene {
    /// Whether the scene uses a 3D-capable spatial reference.
    fn is_three_dimensional(&self) -> bool;

    /// Project a view ray onto the nearest surface, or `None` outside the
    /// usable surface domain.
    fn pick_surface(&self, ray: &Ray) -> Option<Point3d>;

    fn up_at(&self, point: &Point3d) -> Vec3;

    fn north_at(&self, point: &Point3d) -> Vec3;

    /// Geodesic interpolation between two points on the reference surface.
    fn interpolate(&self, a: &Point3d, b: &Point3d, t: f64) -> Point3d {
        a.lerp(b, t)
    }

    fn frame_at(&self, point: &Point3d) -> Result<LocalFrame, ToolError> {
        Ok(LocalFrame::new(self.up_at(point), self.north_at(point))?)
    }
}

/// A horizontal ground plane in a local Cartesian frame (Z up, Y north).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatScene {
    pub ground_elevation: f64,
    /// Half-size of the square domain around the origin that accepts picks.
    pub half_extent: Option<f64>,
    pub three_dimensional: bool,
}

impl FlatScene {
    pub fn new(ground_elevation: f64) -> Self {
        Self {
            ground_elevation,
            half_extent: None,
            three_dimensional: true,
        }
    }

    pub fn bounded(ground_elevation: f64, half_extent: f64) -> Self {
        Self {
            half_extent: Some(half_extent),
            ..Self::new(ground_elevation)
        }
    }

    fn in_domain(&self, p: &Point3d) -> bool {
        self.half_extent
            .is_none_or(|h| p.x.abs() <= h && p.y.abs() <= h)
    }
}

impl Default for FlatScene {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Scene for FlatScene {
    fn is_three_dimensional(&self) -> bool {
        self.three_dimensional
    }

    fn pick_surface(&self, ray: &Ray) -> Option<Point3d> {
        let ground = Plane {
            origin: Point3d::new(0.0, 0.0, self.ground_elevation),
            normal: Vec3::Z,
        };
        let hit = ray_plane(ray, &ground)?;
        self.in_domain(&hit.point).then_some(hit.point)
    }

    fn up_at(&self, _point: &Point3d) -> Vec3 {
        Vec3::Z
    }

    fn north_at(&self, _point: &Point3d) -> Vec3 {
        Vec3::Y
    }
}
