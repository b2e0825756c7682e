//! Hover steps of the four-click construction.
//!
//! Each step recomputes one quantity of the model from the current pointer
//! and returns whether anything changed. A pointer ray that misses the
//! construction plane leaves the model untouched.

use measure_kernel::{Plane, Point3d, default_tolerance, ray_plane, signed_distance_along};
use tracing::debug;

use crate::input::Pointer;
use crate::params::{BoxParameters, VerticalPlacement};

/// Horizontal plane through the anchor, normal to the box up axis.
fn base_plane(params: &BoxParameters) -> Option<Plane> {
    Plane::new(params.anchor, params.up())
}

fn hit_base_plane(params: &BoxParameters, pointer: &Pointer) -> Option<Point3d> {
    let plane = base_plane(params)?;
    ray_plane(&pointer.ray, &plane).map(|hit| hit.point)
}

/// CORNER_DEFINED: the pointer sets the width edge, both its direction and
/// its length.
pub fn hover_width(params: &mut BoxParameters, pointer: &Pointer, max_size: f64) -> bool {
    let Some(hit) = hit_base_plane(params, pointer) else {
        return false;
    };
    let span = hit - params.anchor;
    let length = span.length();
    let up = params.up();
    // A pointer on the anchor keeps the previous orientation.
    if !default_tolerance().is_zero_length(length) {
        let orientation = span * (1.0 / length);
        params.orientation = orientation;
        params.complement = up.cross(&orientation);
    }
    params.width = length.clamp(0.0, max_size);
    debug!(width = params.width, "width step");
    true
}

/// WIDTH_DEFINED: signed depth along the complement.
pub fn hover_depth(params: &mut BoxParameters, pointer: &Pointer, max_size: f64) -> bool {
    let Some(hit) = hit_base_plane(params, pointer) else {
        return false;
    };
    params.depth = signed_distance_along(&params.anchor, &hit, &params.complement).clamp(-max_size, max_size);
    debug!(depth = params.depth, "depth step");
    true
}

/// PLANE_DEFINED: height from a vertical plane through the far base corner,
/// facing the camera.
///
/// A pointer below the base plane builds the box downwards. With the
/// `centered` modifier the box extends by the same amount on both sides.
pub fn hover_height(params: &mut BoxParameters, pointer: &Pointer, max_size: f64) -> bool {
    let up = params.up();
    let far_corner = params.base_corners()[2];
    let Some(plane) = Plane::new(far_corner, pointer.camera_right.cross(&up)) else {
        return false;
    };
    let Some(hit) = ray_plane(&pointer.ray, &plane) else {
        return false;
    };
    let rise = signed_distance_along(&far_corner, &hit.point, &up);
    let (height, placement) = if pointer.modifiers.centered {
        (2.0 * rise.abs(), VerticalPlacement::Centered)
    } else if rise >= 0.0 {
        (rise, VerticalPlacement::Above)
    } else {
        (-rise, VerticalPlacement::Below)
    };
    params.height = height.clamp(0.0, max_size);
    params.placement = placement;
    debug!(height = params.height, ?placement, "height step");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use approx::assert_abs_diff_eq;
    use measure_kernel::{LocalFrame, Ray, Vec3};

    fn down_at(x: f64, y: f64) -> Pointer {
        Pointer::new(Ray::new(Point3d::new(x, y, 50.0), -Vec3::Z), Vec3::X)
    }

    /// Looking north along the ground from far south.
    fn level_at(x: f64, z: f64) -> Pointer {
        Pointer::new(Ray::new(Point3d::new(x, -100.0, z), Vec3::Y), Vec3::X)
    }

    fn corner() -> BoxParameters {
        BoxParameters::at_corner(Point3d::ORIGIN, &LocalFrame::z_up())
    }

    #[test]
    fn test_width_sets_direction_and_length() {
        let mut p = corner();
        assert!(hover_width(&mut p, &down_at(0.0, 3.0), 100.0));
        assert_abs_diff_eq!(p.width, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.orientation, Vec3::Y, epsilon = 1e-12);
        assert_abs_diff_eq!(p.complement, -Vec3::X, epsilon = 1e-12);
    }

    #[test]
    fn test_width_clamped() {
        let mut p = corner();
        hover_width(&mut p, &down_at(500.0, 0.0), 100.0);
        assert_abs_diff_eq!(p.width, 100.0);
    }

    #[test]
    fn test_width_ignores_parallel_ray() {
        let mut p = corner();
        let pointer = Pointer::new(Ray::new(Point3d::new(0.0, 0.0, 5.0), Vec3::X), Vec3::Y);
        assert!(!hover_width(&mut p, &pointer, 100.0));
        assert_eq!(p, corner());
    }

    #[test]
    fn test_depth_is_signed() {
        let mut p = corner();
        hover_width(&mut p, &down_at(4.0, 0.0), 100.0);
        hover_depth(&mut p, &down_at(1.0, -2.5), 100.0);
        assert_abs_diff_eq!(p.depth, -2.5, epsilon = 1e-12);
        hover_depth(&mut p, &down_at(1.0, -500.0), 100.0);
        assert_abs_diff_eq!(p.depth, -100.0);
    }

    #[test]
    fn test_height_above_and_below() {
        let mut p = corner();
        hover_width(&mut p, &down_at(4.0, 0.0), 100.0);
        hover_depth(&mut p, &down_at(4.0, 2.0), 100.0);

        assert!(hover_height(&mut p, &level_at(2.0, 3.0), 100.0));
        assert_abs_diff_eq!(p.height, 3.0, epsilon = 1e-9);
        assert_eq!(p.placement, VerticalPlacement::Above);

        hover_height(&mut p, &level_at(2.0, -1.5), 100.0);
        assert_abs_diff_eq!(p.height, 1.5, epsilon = 1e-9);
        assert_eq!(p.placement, VerticalPlacement::Below);
    }

    #[test]
    fn test_height_centered_doubles() {
        let mut p = corner();
        hover_width(&mut p, &down_at(4.0, 0.0), 100.0);
        hover_depth(&mut p, &down_at(4.0, 2.0), 100.0);
        let pointer = level_at(2.0, 1.0).with_modifiers(Modifiers {
            centered: true,
            ..Modifiers::default()
        });
        hover_height(&mut p, &pointer, 100.0);
        assert_abs_diff_eq!(p.height, 2.0, epsilon = 1e-9);
        assert_eq!(p.placement, VerticalPlacement::Centered);
        assert_abs_diff_eq!(p.top_face()[0].z, 1.0, epsilon = 1e-9);
    }
}
