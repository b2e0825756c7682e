//! Helper functions: error type, pointer builders, mock collaborators.

use std::cell::RefCell;
use std::rc::Rc;

use box_measure::{AbortHandle, MeasurementObserver, MeasurementReport, Pointer, ProbeError, ToolError, ViewpointService};
use measure_kernel::{OrientedBox, Point3d, Ray, Vec3};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("expected state {expected}, got {actual}")]
    UnexpectedState { expected: String, actual: String },

    #[error("tool error: {0}")]
    Tool(#[from] ToolError),
}

/// Install a test-friendly `tracing` subscriber once per process.
/// Filtering follows `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ── Pointer Builders ────────────────────────────────────────────────────────

/// Camera straight above `(x, y)` looking down, right axis east.
pub fn look_down_at(x: f64, y: f64) -> Pointer {
    Pointer::new(Ray::through(Point3d::new(x, y, 1000.0), Point3d::new(x, y, 0.0)), Vec3::X)
}

/// Camera far south of `(x, y, z)` looking north, right axis east.
pub fn look_north_at(x: f64, y: f64, z: f64) -> Pointer {
    Pointer::new(Ray::through(Point3d::new(x, y - 1000.0, z), Point3d::new(x, y, z)), Vec3::X)
}

// ── Recording Observer ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Update(MeasurementReport),
    Ready { report: MeasurementReport, shape: OrientedBox },
    End { report: MeasurementReport, shape: OrientedBox },
}

/// Observer that appends every notification to a shared log.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    log: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    pub fn ready_count(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|n| matches!(n, Notification::Ready { .. }))
            .count()
    }

    pub fn last_update(&self) -> Option<MeasurementReport> {
        self.log.borrow().iter().rev().find_map(|n| match n {
            Notification::Update(report) => Some(report.clone()),
            _ => None,
        })
    }
}

impl MeasurementObserver for RecordingObserver {
    fn on_update(&mut self, report: &MeasurementReport) {
        self.log.borrow_mut().push(Notification::Update(report.clone()));
    }

    fn on_ready(&mut self, report: &MeasurementReport, shape: &OrientedBox) {
        self.log.borrow_mut().push(Notification::Ready {
            report: report.clone(),
            shape: *shape,
        });
    }

    fn on_end(&mut self, report: &MeasurementReport, shape: &OrientedBox) {
        self.log.borrow_mut().push(Notification::End {
            report: report.clone(),
            shape: *shape,
        });
    }
}

// ── Terrain Viewpoint ───────────────────────────────────────────────────────

type Elevation = Box<dyn Fn(f64, f64) -> Option<f64>>;

/// Scripted viewpoint over a height field `z = f(x, y)` (Z up).
///
/// Records every relocation target and the save/restore pairing, and can
/// raise an abort or probe failures at chosen points in the scan.
pub struct TerrainViewpoint {
    elevation: Elevation,
    center: Option<Point3d>,
    next_token: u32,
    /// Targets passed to `relocate_above`, in call order.
    pub visits: Vec<Point3d>,
    pub saved: Vec<u32>,
    pub restored: Vec<u32>,
    abort_after: Option<(usize, AbortHandle)>,
    failing_relocations: Vec<usize>,
    failing_ground_queries: bool,
}

impl TerrainViewpoint {
    pub fn new(elevation: impl Fn(f64, f64) -> Option<f64> + 'static) -> Self {
        Self {
            elevation: Box::new(elevation),
            center: None,
            next_token: 1,
            visits: Vec::new(),
            saved: Vec::new(),
            restored: Vec::new(),
            abort_after: None,
            failing_relocations: Vec::new(),
            failing_ground_queries: false,
        }
    }

    /// Level ground at `z`.
    pub fn flat(z: f64) -> Self {
        Self::new(move |_, _| Some(z))
    }

    /// Raise `handle` once `visits` relocations have happened.
    pub fn abort_after(mut self, visits: usize, handle: AbortHandle) -> Self {
        self.abort_after = Some((visits, handle));
        self
    }

    /// Fail the relocation with this zero-based call index.
    pub fn failing_relocation(mut self, index: usize) -> Self {
        self.failing_relocations.push(index);
        self
    }

    pub fn failing_ground_queries(mut self) -> Self {
        self.failing_ground_queries = true;
        self
    }
}

impl ViewpointService for TerrainViewpoint {
    type ViewState = u32;

    async fn save_view(&mut self) -> u32 {
        let token = self.next_token;
        self.next_token += 1;
        self.saved.push(token);
        token
    }

    async fn restore_view(&mut self, state: u32) {
        self.restored.push(state);
    }

    async fn relocate_above(&mut self, target: &Point3d) -> Result<(), ProbeError> {
        let index = self.visits.len();
        self.visits.push(*target);
        if let Some((after, handle)) = &self.abort_after {
            if self.visits.len() >= *after {
                handle.abort();
            }
        }
        if self.failing_relocations.contains(&index) {
            self.center = None;
            return Err(ProbeError::Relocation {
                reason: format!("camera flight {index} interrupted"),
            });
        }
        self.center = Some(*target);
        Ok(())
    }

    async fn ground_below_center(&mut self) -> Result<Option<Point3d>, ProbeError> {
        if self.failing_ground_queries {
            return Err(ProbeError::GroundQuery {
                reason: "depth buffer unavailable".to_string(),
            });
        }
        Ok(self
            .center
            .and_then(|c| (self.elevation)(c.x, c.y).map(|z| Point3d::new(c.x, c.y, z))))
    }
}
