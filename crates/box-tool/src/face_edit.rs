//! Face drag handlers.
//!
//! Faces are numbered in the shape convention (bottom, top, x-, x+, y-, y+).
//! Which box quantity a face controls depends on the sign of depth, because
//! a negative depth swaps the width and depth axes of the shape. The two
//! tables below are the whole mapping.

use measure_kernel::{BoxFace, Plane, Point3d, Vec3, ray_plane, signed_distance_along};
use tracing::debug;

use crate::config::ToolConfig;
use crate::error::ToolError;
use crate::input::Pointer;
use crate::params::BoxParameters;

/// What dragging a face does to the box.
///
/// `Primary` faces contain the anchor: dragging one moves the anchor so the
/// opposite face stays put. `Secondary` faces are the far side of the same
/// pair and only change the extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceBehavior {
    PrimaryWidth,
    SecondaryWidth,
    PrimaryDepth,
    SecondaryDepth,
    Height,
    None,
}

const NON_NEGATIVE_DEPTH: [FaceBehavior; 6] = [
    FaceBehavior::Height,
    FaceBehavior::None,
    FaceBehavior::PrimaryWidth,
    FaceBehavior::SecondaryWidth,
    FaceBehavior::PrimaryDepth,
    FaceBehavior::SecondaryDepth,
];

const NEGATIVE_DEPTH: [FaceBehavior; 6] = [
    FaceBehavior::Height,
    FaceBehavior::None,
    FaceBehavior::PrimaryDepth,
    FaceBehavior::SecondaryDepth,
    FaceBehavior::PrimaryWidth,
    FaceBehavior::SecondaryWidth,
];

pub fn face_behavior(depth: f64, face: BoxFace) -> FaceBehavior {
    if depth < 0.0 {
        NEGATIVE_DEPTH[face.index()]
    } else {
        NON_NEGATIVE_DEPTH[face.index()]
    }
}

/// Edge being dragged along the base plane.
#[derive(Debug, Clone, Copy)]
enum Axis {
    Width,
    Depth,
}

/// Apply one drag event on `face`. Returns `Ok(false)` when the face has no
/// behaviour or the pointer ray misses the drag plane.
pub fn resize_face(
    params: &mut BoxParameters,
    face: BoxFace,
    pointer: &Pointer,
    config: &ToolConfig,
) -> Result<bool, ToolError> {
    let behavior = face_behavior(params.depth, face);
    let changed = match behavior {
        FaceBehavior::PrimaryWidth => resize_edge(params, Axis::Width, true, pointer, config)?,
        FaceBehavior::SecondaryWidth => resize_edge(params, Axis::Width, false, pointer, config)?,
        FaceBehavior::PrimaryDepth => resize_edge(params, Axis::Depth, true, pointer, config)?,
        FaceBehavior::SecondaryDepth => resize_edge(params, Axis::Depth, false, pointer, config)?,
        FaceBehavior::Height => resize_height(params, pointer, config.max_size),
        FaceBehavior::None => false,
    };
    if changed {
        debug!(?face, ?behavior, width = params.width, depth = params.depth, height = params.height, "face resized");
    }
    Ok(changed)
}

fn mid_height(params: &BoxParameters) -> f64 {
    0.5 * (params.placement.bottom_offset(params.height) + params.placement.top_offset(params.height))
}

fn resize_edge(
    params: &mut BoxParameters,
    axis: Axis,
    primary: bool,
    pointer: &Pointer,
    config: &ToolConfig,
) -> Result<bool, ToolError> {
    let up = params.up();
    let (direction, extent) = match axis {
        Axis::Width => (params.orientation, params.width),
        Axis::Depth => (params.complement, params.depth),
    };

    // The face opposite the dragged one stays fixed.
    let half = direction * (0.5 * extent);
    let center = params.base_center() + up * mid_height(params);
    let fixed: Point3d = if primary { center + half } else { center - half };

    let Some(plane) = Plane::new(fixed, up) else {
        return Ok(false);
    };
    let Some(hit) = ray_plane(&pointer.ray, &plane) else {
        return Ok(false);
    };
    let along = signed_distance_along(&fixed, &hit.point, &direction);
    let raw = if primary { -along } else { along };

    let (lo, hi) = match axis {
        Axis::Depth if extent < 0.0 => (-config.max_size, -config.min_extent),
        _ => (config.min_extent, config.max_size),
    };
    let new_extent = raw.clamp(lo, hi);

    if primary {
        params.anchor = params.anchor.offset(&direction, extent - new_extent);
    }
    match axis {
        Axis::Width => params.width = new_extent,
        Axis::Depth => params.depth = new_extent,
    }
    let width_edge = params.base_corners()[1] - params.anchor;
    params.rederive_axes(width_edge, up)?;
    Ok(true)
}

/// Drag the bottom face: the top face stays fixed.
fn resize_height(params: &mut BoxParameters, pointer: &Pointer, max_size: f64) -> bool {
    let up = params.up();
    let old_top = params.placement.top_offset(params.height);
    let top_center = params.base_center() + up * old_top;
    let normal: Vec3 = pointer.camera_right.cross(&up);
    let Some(plane) = Plane::new(top_center, normal) else {
        return false;
    };
    let Some(hit) = ray_plane(&pointer.ray, &plane) else {
        return false;
    };
    let height = signed_distance_along(&hit.point, &top_center, &up).clamp(0.0, max_size);
    params.anchor += up * (old_top - params.placement.top_offset(height));
    params.height = height;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::VerticalPlacement;
    use approx::assert_abs_diff_eq;
    use measure_kernel::Ray;

    fn sample() -> BoxParameters {
        BoxParameters::from_axes(Point3d::ORIGIN, Vec3::X, Vec3::Z, 10.0, 6.0, 4.0).unwrap()
    }

    fn down_at(x: f64, y: f64) -> Pointer {
        Pointer::new(Ray::new(Point3d::new(x, y, 50.0), -Vec3::Z), Vec3::X)
    }

    #[test]
    fn test_lookup_tables() {
        assert_eq!(face_behavior(1.0, BoxFace::XMin), FaceBehavior::PrimaryWidth);
        assert_eq!(face_behavior(0.0, BoxFace::YMax), FaceBehavior::SecondaryDepth);
        assert_eq!(face_behavior(-1.0, BoxFace::XMin), FaceBehavior::PrimaryDepth);
        assert_eq!(face_behavior(-1.0, BoxFace::YMax), FaceBehavior::SecondaryWidth);
        assert_eq!(face_behavior(-1.0, BoxFace::Bottom), FaceBehavior::Height);
        assert_eq!(face_behavior(1.0, BoxFace::Top), FaceBehavior::None);
    }

    #[test]
    fn test_secondary_width_keeps_anchor() {
        let mut p = sample();
        let config = ToolConfig::default();
        assert!(resize_face(&mut p, BoxFace::XMax, &down_at(14.0, 3.0), &config).unwrap());
        assert_abs_diff_eq!(p.width, 14.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.anchor, Point3d::ORIGIN, epsilon = 1e-9);
    }

    #[test]
    fn test_primary_width_moves_anchor() {
        let mut p = sample();
        let config = ToolConfig::default();
        resize_face(&mut p, BoxFace::XMin, &down_at(-2.0, 3.0), &config).unwrap();
        assert_abs_diff_eq!(p.width, 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.anchor, Point3d::new(-2.0, 0.0, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(p.base_corners()[1], Point3d::new(10.0, 0.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_primary_depth_past_opposite_face_is_clamped() {
        let mut p = sample();
        let config = ToolConfig::default();
        resize_face(&mut p, BoxFace::YMin, &down_at(5.0, 20.0), &config).unwrap();
        assert_abs_diff_eq!(p.depth, config.min_extent, epsilon = 1e-12);
        assert_abs_diff_eq!(p.base_corners()[3].y, 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_depth_stays_negative() {
        let mut p = sample();
        p.depth = -6.0;
        let config = ToolConfig::default();
        // x+ is the far depth face when depth is negative.
        resize_face(&mut p, BoxFace::XMax, &down_at(5.0, 3.0), &config).unwrap();
        assert_abs_diff_eq!(p.depth, -config.min_extent, epsilon = 1e-12);
        resize_face(&mut p, BoxFace::XMax, &down_at(5.0, -9.0), &config).unwrap();
        assert_abs_diff_eq!(p.depth, -9.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.anchor, Point3d::ORIGIN, epsilon = 1e-9);
    }

    #[test]
    fn test_height_keeps_top_fixed() {
        let mut p = sample();
        let config = ToolConfig::default();
        // Looking north at the box from the south, aiming below the base.
        let pointer = Pointer::new(Ray::new(Point3d::new(5.0, -100.0, -2.0), Vec3::Y), Vec3::X);
        assert!(resize_face(&mut p, BoxFace::Bottom, &pointer, &config).unwrap());
        assert_abs_diff_eq!(p.height, 6.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.top_face()[0].z, 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.bottom_face()[0].z, -2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_height_centered_keeps_top_fixed() {
        let mut p = sample();
        p.placement = VerticalPlacement::Centered;
        let config = ToolConfig::default();
        let pointer = Pointer::new(Ray::new(Point3d::new(5.0, -100.0, -4.0), Vec3::Y), Vec3::X);
        resize_face(&mut p, BoxFace::Bottom, &pointer, &config).unwrap();
        assert_abs_diff_eq!(p.height, 6.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.top_face()[0].z, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_top_face_is_inert() {
        let mut p = sample();
        let before = p;
        assert!(!resize_face(&mut p, BoxFace::Top, &down_at(1.0, 1.0), &ToolConfig::default()).unwrap());
        assert_eq!(p, before);
    }
}
