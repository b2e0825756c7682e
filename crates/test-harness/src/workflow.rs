//! BoxSession: fluent API for scripting box measurements in tests.
//!
//! Drives [`BoxTool`] through the same hover and click gestures a user
//! would make, so every step exercises the real state machine.

use box_measure::{
    BoxParameters, BoxTool, CreationState, FlatScene, Modifiers, Pointer, RefinementOutcome, ToolConfig,
};
use measure_kernel::{BoxFace, Point3d};

use crate::helpers::*;

/// A scripted session on a flat scene, with a recording observer attached.
pub struct BoxSession {
    pub tool: BoxTool<FlatScene>,
    pub observer: RecordingObserver,
}

impl BoxSession {
    /// Ground at elevation 0, default configuration.
    pub fn flat() -> Result<Self, HarnessError> {
        Self::with_config(FlatScene::default(), ToolConfig::default())
    }

    pub fn with_config(scene: FlatScene, config: ToolConfig) -> Result<Self, HarnessError> {
        let mut tool = BoxTool::activate(scene, config)?;
        let observer = RecordingObserver::new();
        tool.subscribe(observer.clone());
        Ok(Self { tool, observer })
    }

    pub fn params(&self) -> Result<BoxParameters, HarnessError> {
        self.tool
            .parameters()
            .copied()
            .ok_or_else(|| HarnessError::AssertionFailed {
                detail: format!("no box in state {}", self.tool.state()),
            })
    }

    /// Hover then click, and require the click to land in `expected`.
    pub fn gesture(&mut self, pointer: &Pointer, expected: CreationState) -> Result<&mut Self, HarnessError> {
        self.tool.on_hover(pointer)?;
        self.tool.on_click(pointer)?;
        self.expect_state(expected)?;
        Ok(self)
    }

    pub fn expect_state(&self, expected: CreationState) -> Result<(), HarnessError> {
        let actual = self.tool.state();
        if actual == expected {
            Ok(())
        } else {
            Err(HarnessError::UnexpectedState {
                expected: expected.to_string(),
                actual: actual.to_string(),
            })
        }
    }

    // ── Construction Steps ──────────────────────────────────────────────

    pub fn corner(&mut self, x: f64, y: f64) -> Result<&mut Self, HarnessError> {
        self.gesture(&look_down_at(x, y), CreationState::CornerDefined)
    }

    pub fn width_to(&mut self, x: f64, y: f64) -> Result<&mut Self, HarnessError> {
        self.gesture(&look_down_at(x, y), CreationState::WidthDefined)
    }

    pub fn depth_to(&mut self, x: f64, y: f64) -> Result<&mut Self, HarnessError> {
        self.gesture(&look_down_at(x, y), CreationState::PlaneDefined)
    }

    /// Aim at elevation `z` on the vertical plane through the far base
    /// corner, viewed from the south.
    pub fn height_to(&mut self, z: f64) -> Result<&mut Self, HarnessError> {
        let pointer = self.height_pointer(z, Modifiers::default())?;
        self.gesture(&pointer, CreationState::VolumeDefined)
    }

    /// Same as [`Self::height_to`] with the centered modifier held.
    pub fn centered_height_to(&mut self, z: f64) -> Result<&mut Self, HarnessError> {
        let modifiers = Modifiers {
            centered: true,
            ..Modifiers::default()
        };
        let pointer = self.height_pointer(z, modifiers)?;
        self.gesture(&pointer, CreationState::VolumeDefined)
    }

    fn height_pointer(&self, z: f64, modifiers: Modifiers) -> Result<Pointer, HarnessError> {
        let far = self.params()?.base_corners()[2];
        Ok(look_north_at(far.x, far.y, z).with_modifiers(modifiers))
    }

    /// Four clicks: corner, width end, depth end, then height above the base.
    pub fn build_box(
        &mut self,
        corner: (f64, f64),
        width_end: (f64, f64),
        depth_end: (f64, f64),
        height: f64,
    ) -> Result<&mut Self, HarnessError> {
        self.corner(corner.0, corner.1)?;
        self.width_to(width_end.0, width_end.1)?;
        self.depth_to(depth_end.0, depth_end.1)?;
        let base = self.params()?.anchor.z;
        self.height_to(base + height)
    }

    // ── Editing ─────────────────────────────────────────────────────────

    /// Click the face under `pointer` to enter a resize of that face.
    pub fn grab_face(&mut self, pointer: &Pointer, face: BoxFace) -> Result<&mut Self, HarnessError> {
        self.tool.on_click(pointer)?;
        self.expect_state(CreationState::FaceResizing { face })?;
        Ok(self)
    }

    /// Click a face with the manipulate modifier held.
    pub fn grab_for_rotation(&mut self, x: f64, y: f64) -> Result<&mut Self, HarnessError> {
        let pointer = look_down_at(x, y).with_modifiers(Modifiers {
            manipulate: true,
            ..Modifiers::default()
        });
        self.tool.on_click(&pointer)?;
        self.expect_state(CreationState::ResizeRotate)?;
        Ok(self)
    }

    /// Click to return to the finalized idle-edit state.
    pub fn release(&mut self) -> Result<&mut Self, HarnessError> {
        self.tool.on_click(&look_down_at(0.0, 0.0))?;
        self.expect_state(CreationState::VolumeDefined)?;
        Ok(self)
    }

    // ── Refinement ──────────────────────────────────────────────────────

    /// Run a refinement to completion on the current thread. Returns the
    /// outcome and every progress value reported.
    pub fn refine(&mut self, viewpoint: &mut TerrainViewpoint) -> Result<(RefinementOutcome, Vec<f64>), HarnessError> {
        let mut progress = Vec::new();
        let outcome = pollster::block_on(self.tool.refine_volume(viewpoint, |p| progress.push(p)))?;
        Ok((outcome, progress))
    }

    pub fn base_center(&self) -> Result<Point3d, HarnessError> {
        Ok(self.params()?.base_center())
    }
}
