//! Rotation and translation deltas from an external handle manipulator.

use measure_kernel::Vec3;

use crate::error::ToolError;
use crate::params::BoxParameters;

/// Turns absolute rotation angles into incremental rotations.
///
/// A tracker is created with a zero baseline each time rotate mode is
/// entered, so the first angle received is measured from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationTracker {
    last_angle: f64,
}

impl RotationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_angle(&self) -> f64 {
        self.last_angle
    }

    /// Rotate `params` so that its total rotation since the baseline equals
    /// `angle` (radians, counter-clockwise about up).
    pub fn apply(&mut self, params: &mut BoxParameters, angle: f64) -> Result<(), ToolError> {
        let delta = self.last_angle - angle;
        rotate_about_center(params, -delta)?;
        self.last_angle = angle;
        Ok(())
    }
}

/// Spin the box in place about the vertical axis through its base centroid.
pub fn rotate_about_center(params: &mut BoxParameters, angle: f64) -> Result<(), ToolError> {
    let up = params.up();
    let pivot = params.base_center();
    let arm = (params.anchor - pivot).rotated_about(&up, angle);
    params.anchor = pivot + arm;
    let orientation = params.orientation.rotated_about(&up, angle);
    params.rederive_axes(orientation, up)
}

/// Rigid translation; orientation and extents are untouched.
pub fn translate(params: &mut BoxParameters, offset: &Vec3) {
    params.anchor += *offset;
}
