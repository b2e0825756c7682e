//! Assertion helpers with diagnostic output.
//!
//! Each returns `Err(HarnessError::AssertionFailed)` describing expected vs
//! actual, tagged with a caller-supplied context string.

use box_measure::Measurement;
use measure_kernel::Point3d;

use crate::helpers::HarnessError;

pub fn assert_close(actual: f64, expected: f64, tol: f64, ctx: &str) -> Result<(), HarnessError> {
    if (actual - expected).abs() <= tol {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{}] expected {:.6}, got {:.6} (tol={})", ctx, expected, actual, tol),
        })
    }
}

pub fn assert_points_close(actual: &Point3d, expected: &Point3d, tol: f64, ctx: &str) -> Result<(), HarnessError> {
    let distance = actual.distance_to(expected);
    if distance <= tol {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected ({:.6}, {:.6}, {:.6}), got ({:.6}, {:.6}, {:.6}), off by {:.3e}",
                ctx, expected.x, expected.y, expected.z, actual.x, actual.y, actual.z, distance,
            ),
        })
    }
}

/// Both corner lists describe the same box, in any order.
pub fn assert_same_corners(actual: &[Point3d], expected: &[Point3d], tol: f64, ctx: &str) -> Result<(), HarnessError> {
    if actual.len() != expected.len() {
        return Err(HarnessError::AssertionFailed {
            detail: format!("[{}] expected {} corners, got {}", ctx, expected.len(), actual.len()),
        });
    }
    for (i, p) in expected.iter().enumerate() {
        if !actual.iter().any(|q| q.distance_to(p) <= tol) {
            return Err(HarnessError::AssertionFailed {
                detail: format!("[{}] corner {} at {:?} has no match in {:?}", ctx, i, p, actual),
            });
        }
    }
    Ok(())
}

/// Width, depth, height, area and volume all match.
pub fn assert_dimensions(
    m: &Measurement,
    width: f64,
    depth: f64,
    height: f64,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    assert_close(m.width, width, tol, &format!("{ctx}: width"))?;
    assert_close(m.depth, depth, tol, &format!("{ctx}: depth"))?;
    assert_close(m.height, height, tol, &format!("{ctx}: height"))?;
    assert_close(m.area, width * depth, tol, &format!("{ctx}: area"))?;
    assert_close(m.volume, width * depth * height, tol, &format!("{ctx}: volume"))
}
