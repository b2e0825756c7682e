//! Renderable oriented box: an anchor corner, a heading about the local up
//! axis and three extents.
//!
//! Corner indexing (bottom face first, then the same corners raised by the
//! z extent):
//!
//! ```text
//!        7-----6            z
//!       /|    /|            |  y
//!      4-----5 |            | /
//!      | 3---|-2            |/
//!      |/    |/             +----- x
//!      0-----1
//! ```

use nalgebra::{Isometry3, Matrix3, Point3, Rotation3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::KernelError;
use crate::geometry::intersection::{RaySurfaceHit, ray_rectangle};
use crate::geometry::plane::Rectangle;
use crate::geometry::point::Point3d;
use crate::geometry::ray::Ray;
use crate::geometry::vector::Vec3;

/// Local tangent frame at a point of the scene: the up direction and the
/// direction of north, both unit length and mutually orthogonal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalFrame {
    pub up: Vec3,
    pub north: Vec3,
}

impl LocalFrame {
    /// Build a frame, orthogonalizing `north` against `up`.
    pub fn new(up: Vec3, north: Vec3) -> Result<Self, KernelError> {
        let up = up.normalized().ok_or(KernelError::DegenerateFrame { what: "up" })?;
        let north = north
            .reject_from(&up)
            .normalized()
            .ok_or(KernelError::DegenerateFrame { what: "north" })?;
        Ok(Self { up, north })
    }

    /// Z up, Y north: the frame of a flat local Cartesian scene.
    pub fn z_up() -> Self {
        Self {
            up: Vec3::Z,
            north: Vec3::Y,
        }
    }

    pub fn east(&self) -> Vec3 {
        self.north.cross(&self.up)
    }

    /// Heading of `v` in radians, clockwise from north when seen from above.
    pub fn heading_of(&self, v: &Vec3) -> f64 {
        self.north.signed_angle_to(v, &-self.up)
    }

    /// Horizontal unit direction with the given heading.
    pub fn direction_at_heading(&self, heading: f64) -> Vec3 {
        self.north * heading.cos() + self.east() * heading.sin()
    }
}

/// One of the six faces of an [`OrientedBox`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoxFace {
    Bottom,
    Top,
    XMin,
    XMax,
    YMin,
    YMax,
}

impl BoxFace {
    pub const ALL: [BoxFace; 6] = [
        BoxFace::Bottom,
        BoxFace::Top,
        BoxFace::XMin,
        BoxFace::XMax,
        BoxFace::YMin,
        BoxFace::YMax,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn opposite(self) -> Self {
        match self {
            BoxFace::Bottom => BoxFace::Top,
            BoxFace::Top => BoxFace::Bottom,
            BoxFace::XMin => BoxFace::XMax,
            BoxFace::XMax => BoxFace::XMin,
            BoxFace::YMin => BoxFace::YMax,
            BoxFace::YMax => BoxFace::YMin,
        }
    }
}

/// A face hit by a picking ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceHit {
    pub face: BoxFace,
    pub hit: RaySurfaceHit,
}

/// A box positioned at `origin` (corner 0 before the vertical offset) and
/// rotated by `heading` about the frame's up axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedBox {
    pub origin: Point3d,
    pub frame: LocalFrame,
    /// Radians clockwise from north of the box x axis.
    pub heading: f64,
    /// Offset of the bottom face along up, relative to `origin`.
    pub vertical_offset: f64,
    /// Lengths along the box x, y and z axes.
    pub extents: [f64; 3],
}

impl OrientedBox {
    /// Unit box axes `(x, y, z)`; right-handed with `z` the frame up.
    pub fn axes(&self) -> (Vec3, Vec3, Vec3) {
        let x = self.frame.direction_at_heading(self.heading);
        let z = self.frame.up;
        let y = z.cross(&x);
        (x, y, z)
    }

    /// Rigid placement taking box-local coordinates to the scene.
    pub fn placement(&self) -> Isometry3<f64> {
        let (x, y, z) = self.axes();
        let columns: [Vector3<f64>; 3] = [x.into(), y.into(), z.into()];
        let basis = Matrix3::from_columns(&columns);
        let rotation = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(basis));
        let translation = Translation3::new(self.origin.x, self.origin.y, self.origin.z);
        Isometry3::from_parts(translation, rotation)
    }

    pub fn corners(&self) -> [Point3d; 8] {
        let placement = self.placement();
        let [ex, ey, ez] = self.extents;
        let z0 = self.vertical_offset;
        let local = [
            (0.0, 0.0, z0),
            (ex, 0.0, z0),
            (ex, ey, z0),
            (0.0, ey, z0),
            (0.0, 0.0, z0 + ez),
            (ex, 0.0, z0 + ez),
            (ex, ey, z0 + ez),
            (0.0, ey, z0 + ez),
        ];
        local.map(|(x, y, z)| Point3d::from(placement * Point3::new(x, y, z)))
    }

    pub fn face(&self, face: BoxFace) -> Rectangle {
        let c = self.corners();
        let (x, y, z) = self.axes();
        let [ex, ey, ez] = self.extents;
        match face {
            BoxFace::Bottom => Rectangle::new(c[0], x * ex, y * ey),
            BoxFace::Top => Rectangle::new(c[4], x * ex, y * ey),
            BoxFace::XMin => Rectangle::new(c[0], y * ey, z * ez),
            BoxFace::XMax => Rectangle::new(c[1], y * ey, z * ez),
            BoxFace::YMin => Rectangle::new(c[0], x * ex, z * ez),
            BoxFace::YMax => Rectangle::new(c[3], x * ex, z * ez),
        }
    }

    pub fn outward_normal(&self, face: BoxFace) -> Vec3 {
        let (x, y, z) = self.axes();
        match face {
            BoxFace::Bottom => -z,
            BoxFace::Top => z,
            BoxFace::XMin => -x,
            BoxFace::XMax => x,
            BoxFace::YMin => -y,
            BoxFace::YMax => y,
        }
    }

    pub fn center(&self) -> Point3d {
        let c = self.corners();
        c[0].midpoint(&c[6])
    }

    pub fn volume(&self) -> f64 {
        self.extents.iter().map(|e| e.abs()).product()
    }

    /// Nearest face hit by `ray`, if any.
    pub fn pick_face(&self, ray: &Ray, tol: f64) -> Option<FaceHit> {
        BoxFace::ALL
            .iter()
            .filter_map(|&face| ray_rectangle(ray, &self.face(face), tol).map(|hit| FaceHit { face, hit }))
            .min_by(|a, b| a.hit.t.total_cmp(&b.hit.t))
    }
}
