//! The interactive box tool: routes pointer gestures through the creation
//! state machine and owns the box model, its refinement grid and listeners.

use measure_kernel::{BoxFace, OrientedBox, Vec3};
use tracing::{debug, info, instrument};

use crate::config::ToolConfig;
use crate::construction::{hover_depth, hover_height, hover_width};
use crate::error::ToolError;
use crate::face_edit;
use crate::input::Pointer;
use crate::manipulate::{RotationTracker, translate};
use crate::measurement::{Measurement, MeasurementReport, MetricFormatter, UnitFormatter};
use crate::observer::MeasurementObserver;
use crate::params::BoxParameters;
use crate::refine::{
    AbortHandle, EmptyVolumeGrid, RefinementOutcome, RefinementState, ViewpointService, VolumeSampler,
};
use crate::scene::Scene;
use crate::state::CreationState;

pub struct BoxTool<S: Scene> {
    scene: S,
    config: ToolConfig,
    state: CreationState,
    params: Option<BoxParameters>,
    grid: EmptyVolumeGrid,
    rotation: RotationTracker,
    abort: AbortHandle,
    formatter: Box<dyn UnitFormatter>,
    observers: Vec<Box<dyn MeasurementObserver>>,
}

impl<S: Scene> BoxTool<S> {
    /// Engage the tool on `scene`. Fails before any state exists if the
    /// scene is not 3D or the configuration is invalid.
    #[instrument(level = "info", skip_all)]
    pub fn activate(scene: S, config: ToolConfig) -> Result<Self, ToolError> {
        if !scene.is_three_dimensional() {
            return Err(ToolError::SceneNotThreeDimensional);
        }
        let config = config.validated()?;
        info!(grid_resolution = config.grid_resolution, "box tool activated");
        Ok(Self {
            scene,
            config,
            state: CreationState::Idle,
            params: None,
            grid: EmptyVolumeGrid::default(),
            rotation: RotationTracker::new(),
            abort: AbortHandle::new(),
            formatter: Box::new(MetricFormatter::default()),
            observers: Vec::new(),
        })
    }

    pub fn with_formatter(mut self, formatter: impl UnitFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn subscribe(&mut self, observer: impl MeasurementObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Start from an existing box instead of the click sequence.
    pub fn seed(&mut self, shape: &OrientedBox) -> Result<(), ToolError> {
        if self.state != CreationState::Idle {
            return Err(ToolError::InvalidState {
                operation: "seed",
                state: self.state,
            });
        }
        self.params = Some(BoxParameters::from_shape(shape)?);
        self.grid = EmptyVolumeGrid::default();
        self.set_state(CreationState::VolumeDefined);
        self.notify_update();
        Ok(())
    }

    pub fn state(&self) -> CreationState {
        self.state
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn parameters(&self) -> Option<&BoxParameters> {
        self.params.as_ref()
    }

    pub fn empty_volume(&self) -> &EmptyVolumeGrid {
        &self.grid
    }

    pub fn can_refine(&self) -> bool {
        self.state.can_refine()
    }

    /// Handle for cancelling a running refinement from elsewhere.
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    pub fn measurement(&self) -> Measurement {
        match &self.params {
            Some(params) => Measurement::of(params, &self.grid, self.can_refine()),
            None => Measurement::default(),
        }
    }

    pub fn report(&self) -> MeasurementReport {
        MeasurementReport::new(self.measurement(), self.formatter.as_ref())
    }

    /// The renderable shape of the current box.
    pub fn shape(&self) -> Result<OrientedBox, ToolError> {
        let params = self.require_params()?;
        params.to_shape(&self.scene.north_at(&params.anchor))
    }

    /// Pointer moved. Returns whether the model changed.
    pub fn on_hover(&mut self, pointer: &Pointer) -> Result<bool, ToolError> {
        let max_size = self.config.max_size;
        let changed = match self.state {
            CreationState::Idle => match self.scene.pick_surface(&pointer.ray) {
                Some(corner) => {
                    let frame = self.scene.frame_at(&corner)?;
                    self.params = Some(BoxParameters::at_corner(corner, &frame));
                    true
                }
                None => false,
            },
            CreationState::CornerDefined => hover_width(self.params_mut("hover width")?, pointer, max_size),
            CreationState::WidthDefined => hover_depth(self.params_mut("hover depth")?, pointer, max_size),
            CreationState::PlaneDefined => hover_height(self.params_mut("hover height")?, pointer, max_size),
            CreationState::FaceResizing { face } => return self.resize(face, pointer),
            CreationState::VolumeDefined | CreationState::ResizeRotate => false,
        };
        if changed {
            self.notify_update();
        }
        Ok(changed)
    }

    /// Pointer clicked. Returns the state after the click.
    pub fn on_click(&mut self, pointer: &Pointer) -> Result<CreationState, ToolError> {
        match self.state {
            CreationState::Idle => {
                if self.params.is_some() {
                    self.set_state(CreationState::CornerDefined);
                }
            }
            CreationState::CornerDefined => {
                if self.require_params()?.width > 0.0 {
                    self.set_state(CreationState::WidthDefined);
                }
            }
            CreationState::WidthDefined => {
                if self.require_params()?.depth != 0.0 {
                    self.set_state(CreationState::PlaneDefined);
                }
            }
            CreationState::PlaneDefined => {
                if self.require_params()?.height > 0.0 {
                    self.finish_construction()?;
                }
            }
            CreationState::VolumeDefined => {
                let shape = self.shape()?;
                match shape.pick_face(&pointer.ray, self.config.pick_tolerance) {
                    Some(hit) if pointer.modifiers.manipulate => {
                        debug!(face = ?hit.face, "manipulating box");
                        self.rotation = RotationTracker::new();
                        self.set_state(CreationState::ResizeRotate);
                    }
                    Some(hit) => self.set_state(CreationState::FaceResizing { face: hit.face }),
                    None => {
                        let report = self.report();
                        for observer in &mut self.observers {
                            observer.on_end(&report, &shape);
                        }
                        self.reset();
                    }
                }
            }
            CreationState::FaceResizing { .. } | CreationState::ResizeRotate => {
                self.set_state(CreationState::VolumeDefined);
            }
        }
        Ok(self.state)
    }

    fn finish_construction(&mut self) -> Result<(), ToolError> {
        let params = self.params_mut("finish construction")?;
        params.standardize()?;
        self.grid = EmptyVolumeGrid::default();
        self.set_state(CreationState::VolumeDefined);
        let shape = self.shape()?;
        let report = self.report();
        for observer in &mut self.observers {
            observer.on_ready(&report, &shape);
        }
        self.notify_update();
        Ok(())
    }

    /// Drag face `face_index` (shape numbering) toward the pointer.
    pub fn resize_face(&mut self, face_index: usize, pointer: &Pointer) -> Result<bool, ToolError> {
        let face = BoxFace::from_index(face_index).ok_or(ToolError::InvalidFace { index: face_index })?;
        self.resize(face, pointer)
    }

    fn resize(&mut self, face: BoxFace, pointer: &Pointer) -> Result<bool, ToolError> {
        self.require_finalized("resize face")?;
        let config = self.config.clone();
        let params = self.params_mut("resize face")?;
        let changed = face_edit::resize_face(params, face, pointer, &config)?;
        if changed {
            self.grid = EmptyVolumeGrid::default();
            self.notify_update();
        }
        Ok(changed)
    }

    /// Absolute rotation angle (radians, counter-clockwise about up) since
    /// rotate mode was entered.
    pub fn rotate_to(&mut self, angle: f64) -> Result<(), ToolError> {
        self.require_state(CreationState::ResizeRotate, "rotate")?;
        let mut tracker = self.rotation;
        tracker.apply(self.params_mut("rotate")?, angle)?;
        self.rotation = tracker;
        self.notify_update();
        Ok(())
    }

    pub fn translate_by(&mut self, offset: &Vec3) -> Result<(), ToolError> {
        self.require_state(CreationState::ResizeRotate, "translate")?;
        translate(self.params_mut("translate")?, offset);
        self.notify_update();
        Ok(())
    }

    /// Discard the box from any state.
    pub fn restart(&mut self) {
        self.reset();
        self.notify_update();
    }

    fn reset(&mut self) {
        self.params = None;
        self.grid = EmptyVolumeGrid::default();
        self.rotation = RotationTracker::new();
        self.set_state(CreationState::Idle);
    }

    /// A sampler over the current box, for hosts that drive refinement
    /// themselves.
    pub fn sampler(&self) -> Result<VolumeSampler<'_, S>, ToolError> {
        let params = *self.require_params()?;
        Ok(VolumeSampler::new(&self.scene, params, self.config.grid_resolution).with_abort(self.abort.clone()))
    }

    /// Replace the empty-volume grid by sampling `viewpoint`.
    ///
    /// Holding `&mut self` for the whole run keeps gestures from reaching
    /// the model while sampling. An abort through [`Self::abort_handle`]
    /// leaves the previous grid in place, even when it arrives during the
    /// last sample.
    ///
    /// The abort handle is the only supported way to cancel. Dropping the
    /// returned future before it completes leaves the viewpoint wherever the
    /// scan last moved it, because `restore_view` never runs.
    #[instrument(level = "info", skip_all)]
    pub async fn refine_volume<V: ViewpointService>(
        &mut self,
        viewpoint: &mut V,
        progress: impl FnMut(f64),
    ) -> Result<RefinementOutcome, ToolError> {
        self.require_state(CreationState::VolumeDefined, "refine volume")?;
        self.abort.reset();
        let finished = self.sampler()?.run(viewpoint, progress).await;
        match finished {
            RefinementState::Completed { grid } => {
                self.grid = grid;
                let refined_volume = self.measurement().refined_volume;
                info!(refined_volume, "refined volume updated");
                self.notify_update();
                Ok(RefinementOutcome::Completed { refined_volume })
            }
            _ => Ok(RefinementOutcome::Aborted),
        }
    }

    fn set_state(&mut self, next: CreationState) {
        if next != self.state {
            info!(from = %self.state, to = %next, "state transition");
            self.state = next;
        }
    }

    fn notify_update(&mut self) {
        let report = self.report();
        for observer in &mut self.observers {
            observer.on_update(&report);
        }
    }

    fn require_params(&self) -> Result<&BoxParameters, ToolError> {
        self.params
            .as_ref()
            .ok_or(ToolError::MissingGeometry { what: "box corner" })
    }

    fn params_mut(&mut self, operation: &'static str) -> Result<&mut BoxParameters, ToolError> {
        let state = self.state;
        self.params
            .as_mut()
            .ok_or(ToolError::InvalidState { operation, state })
    }

    fn require_state(&self, expected: CreationState, operation: &'static str) -> Result<(), ToolError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ToolError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    fn require_finalized(&self, operation: &'static str) -> Result<(), ToolError> {
        if self.state.is_finalized() {
            Ok(())
        } else {
            Err(ToolError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }
}
