use serde::{Deserialize, Serialize};

use super::point::Point3d;
use super::vector::Vec3;

/// An infinite plane through `origin` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point3d,
    pub normal: Vec3,
}

impl Plane {
    /// Returns `None` when `normal` cannot be normalized.
    pub fn new(origin: Point3d, normal: Vec3) -> Option<Self> {
        Some(Self {
            origin,
            normal: normal.normalized()?,
        })
    }

    /// Plane through `origin` that contains both `a` and `b`.
    pub fn spanned_by(origin: Point3d, a: &Vec3, b: &Vec3) -> Option<Self> {
        Self::new(origin, a.cross(b))
    }

    /// Signed distance from the plane along its normal.
    pub fn distance_to_point(&self, p: &Point3d) -> f64 {
        (*p - self.origin).dot(&self.normal)
    }
}

/// A bounded planar rectangle: `corner + s*edge_u + t*edge_v` for `s, t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub corner: Point3d,
    pub edge_u: Vec3,
    pub edge_v: Vec3,
}

impl Rectangle {
    pub fn new(corner: Point3d, edge_u: Vec3, edge_v: Vec3) -> Self {
        Self {
            corner,
            edge_u,
            edge_v,
        }
    }

    pub fn center(&self) -> Point3d {
        self.corner + self.edge_u * 0.5 + self.edge_v * 0.5
    }

    pub fn plane(&self) -> Option<Plane> {
        Plane::spanned_by(self.corner, &self.edge_u, &self.edge_v)
    }

    /// Rectangle coordinates of a point assumed to lie in its plane.
    pub fn parameters_of(&self, p: &Point3d) -> Option<(f64, f64)> {
        let uu = self.edge_u.length_squared();
        let vv = self.edge_v.length_squared();
        if uu < 1e-30 || vv < 1e-30 {
            return None;
        }
        let d = *p - self.corner;
        Some((d.dot(&self.edge_u) / uu, d.dot(&self.edge_v) / vv))
    }
}
