//! Interactive oriented-box measurement.
//!
//! A box is defined with four clicks (corner, width, depth, height), then
//! edited by dragging its faces or by rotating and translating it. Its gross
//! volume can be refined by sampling the surface under its top face through
//! an external viewpoint service.
//!
//! [`BoxTool`] is the entry point. The scene and the viewpoint are supplied
//! by the host through the [`Scene`] and [`ViewpointService`] traits, and
//! results are delivered to [`MeasurementObserver`]s.

pub mod config;
pub mod construction;
pub mod controller;
pub mod error;
pub mod face_edit;
pub mod input;
pub mod manipulate;
pub mod measurement;
pub mod observer;
pub mod params;
pub mod refine;
pub mod scene;
pub mod state;

pub use config::ToolConfig;
pub use controller::BoxTool;
pub use error::{ProbeError, ToolError};
pub use face_edit::{FaceBehavior, face_behavior};
pub use input::{Modifiers, Pointer};
pub use manipulate::RotationTracker;
pub use measurement::{Measurement, MeasurementLabels, MeasurementReport, MetricFormatter, UnitFormatter};
pub use observer::MeasurementObserver;
pub use params::{BoxParameters, VerticalPlacement};
pub use refine::{
    AbortHandle, EmptyVolumeGrid, GridCell, RefinementOutcome, RefinementState, ScanOrder, ViewpointService,
    VolumeSampler,
};
pub use scene::{FlatScene, Scene};
pub use state::CreationState;
