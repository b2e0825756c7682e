//! The minimal parametrization of an oriented box and its conversion to and
//! from the renderable [`OrientedBox`] shape.
//!
//! The box occupies `anchor + [0, width] * orientation + [0, depth] * complement`
//! in its base plane (the depth interval is `[depth, 0]` when depth is
//! negative), extruded along `up = orientation x complement` according to
//! the [`VerticalPlacement`].

use std::f64::consts::FRAC_PI_2;

use measure_kernel::{LocalFrame, OrientedBox, Point3d, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::ToolError;

/// Edge length below which a shape edge is treated as collapsed.
const DEGENERATE_EXTENT: f64 = 1e-9;

/// Where the box sits relative to its base plane. `height` is always the full
/// vertical extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalPlacement {
    #[default]
    Above,
    Below,
    Centered,
}

impl VerticalPlacement {
    /// Offset of the bottom face from the base plane for a given height.
    pub fn bottom_offset(self, height: f64) -> f64 {
        match self {
            VerticalPlacement::Above => 0.0,
            VerticalPlacement::Below => -height,
            VerticalPlacement::Centered => -0.5 * height,
        }
    }

    pub fn top_offset(self, height: f64) -> f64 {
        self.bottom_offset(height) + height
    }
}

/// Canonical box state shared by construction, editing and refinement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxParameters {
    /// One physical corner of the box, in the base plane.
    pub anchor: Point3d,
    /// Unit direction of the width edge.
    pub orientation: Vec3,
    /// Unit direction of the depth edge, `up x orientation`.
    pub complement: Vec3,
    pub width: f64,
    /// Signed until standardization.
    pub depth: f64,
    pub height: f64,
    pub placement: VerticalPlacement,
}

impl BoxParameters {
    /// A zero-sized box at `anchor`, with the width edge pointing east.
    pub fn at_corner(anchor: Point3d, frame: &LocalFrame) -> Self {
        let orientation = frame.east();
        Self {
            anchor,
            orientation,
            complement: frame.up.cross(&orientation),
            width: 0.0,
            depth: 0.0,
            height: 0.0,
            placement: VerticalPlacement::Above,
        }
    }

    /// Build from an arbitrary width direction; it is projected into the
    /// plane normal to `up` before normalization.
    pub fn from_axes(
        anchor: Point3d,
        width_direction: Vec3,
        up: Vec3,
        width: f64,
        depth: f64,
        height: f64,
    ) -> Result<Self, ToolError> {
        let mut params = Self {
            anchor,
            orientation: Vec3::X,
            complement: Vec3::Y,
            width,
            depth,
            height,
            placement: VerticalPlacement::Above,
        };
        params.rederive_axes(width_direction, up)?;
        Ok(params)
    }

    /// Normal of the base plane.
    pub fn up(&self) -> Vec3 {
        self.orientation.cross(&self.complement)
    }

    /// Recompute both in-plane directions from a width direction.
    pub fn rederive_axes(&mut self, width_direction: Vec3, up: Vec3) -> Result<(), ToolError> {
        let up = up
            .normalized()
            .ok_or(ToolError::MissingGeometry { what: "up direction" })?;
        let orientation = width_direction
            .reject_from(&up)
            .normalized()
            .ok_or(ToolError::MissingGeometry { what: "width direction" })?;
        self.orientation = orientation;
        self.complement = up.cross(&orientation);
        Ok(())
    }

    pub fn area(&self) -> f64 {
        self.width.abs() * self.depth.abs()
    }

    pub fn volume(&self) -> f64 {
        self.area() * self.height.abs()
    }

    /// Length of the base (and top) diagonal.
    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.depth)
    }

    /// Corners of the base plane rectangle in winding order:
    /// anchor, width end, far corner, depth end.
    pub fn base_corners(&self) -> [Point3d; 4] {
        let w = self.orientation * self.width;
        let d = self.complement * self.depth;
        [self.anchor, self.anchor + w, self.anchor + w + d, self.anchor + d]
    }

    /// Centroid of the base rectangle.
    pub fn base_center(&self) -> Point3d {
        self.anchor + self.orientation * (0.5 * self.width) + self.complement * (0.5 * self.depth)
    }

    pub fn bottom_face(&self) -> [Point3d; 4] {
        let offset = self.up() * self.placement.bottom_offset(self.height);
        self.base_corners().map(|p| p + offset)
    }

    pub fn top_face(&self) -> [Point3d; 4] {
        let offset = self.up() * self.placement.top_offset(self.height);
        self.base_corners().map(|p| p + offset)
    }

    /// All eight corners: bottom face then top face, same winding.
    pub fn corners(&self) -> [Point3d; 8] {
        let bottom = self.bottom_face();
        let top = self.top_face();
        [
            bottom[0], bottom[1], bottom[2], bottom[3], top[0], top[1], top[2], top[3],
        ]
    }

    pub fn is_standardized(&self) -> bool {
        self.depth >= 0.0
    }

    /// Make depth non-negative without changing the solid: the anchor moves
    /// to the corner at the far end of the depth edge and the directions are
    /// derived again from the width edge that starts there.
    #[instrument(level = "debug", skip(self), fields(depth = self.depth))]
    pub fn standardize(&mut self) -> Result<(), ToolError> {
        if self.is_standardized() {
            return Ok(());
        }
        let up = self.up();
        let new_anchor = self.anchor + self.complement * self.depth;
        let width_end = new_anchor + self.orientation * self.width;
        self.anchor = new_anchor;
        self.depth = -self.depth;
        if self.width > 0.0 {
            self.rederive_axes(width_end - new_anchor, up)?;
        }
        debug!(depth = self.depth, "standardized box");
        Ok(())
    }

    pub fn standardized(mut self) -> Result<Self, ToolError> {
        self.standardize()?;
        Ok(self)
    }

    /// Convert to the renderable shape, using `north` at the anchor as the
    /// heading reference.
    ///
    /// The shape's axes are right-handed about up. With a non-negative depth
    /// the box x axis is the width direction. With a negative depth the box
    /// extends along `-complement`, which is the width direction turned a
    /// quarter clockwise, so the heading gains 90 degrees and the x and y
    /// extents swap.
    pub fn to_shape(&self, north: &Vec3) -> Result<OrientedBox, ToolError> {
        let frame = LocalFrame::new(self.up(), *north)?;
        let heading = frame.heading_of(&self.orientation);
        let (heading, extents) = if self.depth >= 0.0 {
            (heading, [self.width, self.depth, self.height])
        } else {
            (heading + FRAC_PI_2, [-self.depth, self.width, self.height])
        };
        Ok(OrientedBox {
            origin: self.anchor,
            frame,
            heading,
            vertical_offset: self.placement.bottom_offset(self.height),
            extents,
        })
    }

    /// Recover parameters from a shape's corners, anchored at corner 0.
    ///
    /// Up is the shape frame's up, so negative extents describe the same
    /// solid: a negative x or y extent becomes a negative depth that is then
    /// standardized, and a negative z extent places the box below corner 0.
    #[instrument(level = "debug", skip_all)]
    pub fn from_shape(shape: &OrientedBox) -> Result<Self, ToolError> {
        let c = shape.corners();
        let width_edge = c[1] - c[0];
        let depth_edge = c[3] - c[0];
        let height_edge = c[4] - c[0];

        let width = width_edge.length();
        if width < DEGENERATE_EXTENT {
            return Err(ToolError::DegenerateShape {
                reason: "box has no width".to_string(),
            });
        }
        let up = shape.frame.up.normalized().ok_or_else(|| ToolError::DegenerateShape {
            reason: "frame has no up direction".to_string(),
        })?;

        let mut params = Self::from_axes(c[0], width_edge, up, width, 0.0, 0.0)?;
        params.depth = depth_edge.dot(&params.complement);
        let rise = height_edge.dot(&up);
        params.height = rise.abs();
        params.placement = if rise < 0.0 {
            VerticalPlacement::Below
        } else {
            VerticalPlacement::Above
        };
        params.standardized()
    }
}
