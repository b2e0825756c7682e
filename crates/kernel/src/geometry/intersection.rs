use super::plane::{Plane, Rectangle};
use super::point::Point3d;
use super::ray::Ray;
use super::vector::Vec3;

/// Result of a ray-surface intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySurfaceHit {
    pub point: Point3d,
    pub t: f64,
    /// Surface normal facing back towards the ray origin.
    pub normal: Vec3,
}

// ─── Ray-Plane Intersection ─────────────────────────────────────────────────

/// Forward intersection of a ray with an infinite plane.
///
/// Parallel rays and hits behind the ray origin yield `None`.
pub fn ray_plane(ray: &Ray, plane: &Plane) -> Option<RaySurfaceHit> {
    let denom = ray.direction.dot(&plane.normal);
    if denom.abs() < 1e-15 {
        return None;
    }
    let t = (plane.origin - ray.origin).dot(&plane.normal) / denom;
    if t < 0.0 || !t.is_finite() {
        return None;
    }
    Some(RaySurfaceHit {
        point: ray.at(t),
        t,
        normal: if denom < 0.0 {
            plane.normal
        } else {
            -plane.normal
        },
    })
}

// ─── Ray-Rectangle Intersection ─────────────────────────────────────────────

/// Intersect a ray with a bounded rectangle. `tol` widens the rectangle in
/// parameter space so hits exactly on an edge are not lost to rounding.
pub fn ray_rectangle(ray: &Ray, rect: &Rectangle, tol: f64) -> Option<RaySurfaceHit> {
    let plane = rect.plane()?;
    let hit = ray_plane(ray, &plane)?;
    let (s, t) = rect.parameters_of(&hit.point)?;
    let inside = (-tol..=1.0 + tol).contains(&s) && (-tol..=1.0 + tol).contains(&t);
    inside.then_some(hit)
}

// ─── Distances ──────────────────────────────────────────────────────────────

/// Signed distance from `from` to `to` measured along the unit `direction`.
pub fn signed_distance_along(from: &Point3d, to: &Point3d, direction: &Vec3) -> f64 {
    (*to - *from).dot(direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ground() -> Plane {
        Plane {
            origin: Point3d::ORIGIN,
            normal: Vec3::Z,
        }
    }

    #[test]
    fn test_ray_plane_hit() {
        let ray = Ray::new(Point3d::new(1.0, 2.0, 10.0), -Vec3::Z);
        let hit = ray_plane(&ray, &ground()).unwrap();
        assert_abs_diff_eq!(hit.t, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hit.point, Point3d::new(1.0, 2.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(hit.normal, Vec3::Z, epsilon = 1e-12);
    }

    #[test]
    fn test_ray_plane_parallel_or_behind() {
        let parallel = Ray::new(Point3d::new(0.0, 0.0, 1.0), Vec3::X);
        assert!(ray_plane(&parallel, &ground()).is_none());

        let away = Ray::new(Point3d::new(0.0, 0.0, 1.0), Vec3::Z);
        assert!(ray_plane(&away, &ground()).is_none());
    }

    #[test]
    fn test_ray_rectangle_inside_and_outside() {
        let rect = Rectangle::new(Point3d::ORIGIN, Vec3::X * 2.0, Vec3::Y * 2.0);
        let inside = Ray::new(Point3d::new(1.0, 1.0, 5.0), -Vec3::Z);
        assert!(ray_rectangle(&inside, &rect, 1e-9).is_some());

        let outside = Ray::new(Point3d::new(3.0, 1.0, 5.0), -Vec3::Z);
        assert!(ray_rectangle(&outside, &rect, 1e-9).is_none());
    }

    #[test]
    fn test_signed_distance_along() {
        let d = signed_distance_along(&Point3d::new(0.0, 0.0, 5.0), &Point3d::new(3.0, 0.0, 1.0), &Vec3::Z);
        assert_abs_diff_eq!(d, -4.0, epsilon = 1e-12);
    }
}
