//! The refinement scan: drives an external viewpoint across the top face
//! and measures how far the surface lies below each sample point.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use measure_kernel::{Point3d, Vec3, signed_distance_along};
use tracing::{debug, info, instrument, warn};

use super::grid::{EmptyVolumeGrid, sample_points};
use super::scan::ScanOrder;
use super::state::{RefinementEffect, RefinementEvent, RefinementState};
use crate::error::ProbeError;
use crate::params::BoxParameters;
use crate::scene::Scene;

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle(Arc<AtomicBool>);

impl AbortHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub(crate) fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The exclusive viewpoint used for sampling.
///
/// Only one relocation is ever in flight. `save_view` and `restore_view`
/// bracket a whole run.
#[allow(async_fn_in_trait)]
pub trait ViewpointService {
    type ViewState;

    async fn save_view(&mut self) -> Self::ViewState;

    async fn restore_view(&mut self, state: Self::ViewState);

    /// Move the viewpoint so `target` is directly below its center.
    async fn relocate_above(&mut self, target: &Point3d) -> Result<(), ProbeError>;

    /// The surface point under the view center, if any.
    async fn ground_below_center(&mut self) -> Result<Option<Point3d>, ProbeError>;
}

/// One refinement run over a snapshot of the box.
#[derive(Debug)]
pub struct VolumeSampler<'a, S: Scene + ?Sized> {
    scene: &'a S,
    params: BoxParameters,
    resolution: usize,
    abort: AbortHandle,
}

impl<'a, S: Scene + ?Sized> VolumeSampler<'a, S> {
    pub fn new(scene: &'a S, params: BoxParameters, resolution: usize) -> Self {
        Self {
            scene,
            params,
            resolution,
            abort: AbortHandle::new(),
        }
    }

    pub fn with_abort(mut self, abort: AbortHandle) -> Self {
        self.abort = abort;
        self
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// Run the scan. The view is saved first and restored before returning,
    /// whether the run completes or is aborted. Returns `Completed` or
    /// `Aborted`.
    ///
    /// Cancel through [`AbortHandle`]. Dropping the future mid-run skips
    /// `restore_view`, since the restore is itself asynchronous.
    #[instrument(level = "info", skip_all, fields(resolution = self.resolution))]
    pub async fn run<V: ViewpointService>(
        &self,
        viewpoint: &mut V,
        mut progress: impl FnMut(f64),
    ) -> RefinementState {
        let saved = viewpoint.save_view().await;
        let outcome = self.scan(viewpoint, &mut progress).await;
        viewpoint.restore_view(saved).await;
        outcome
    }

    async fn scan<V: ViewpointService>(
        &self,
        viewpoint: &mut V,
        progress: &mut impl FnMut(f64),
    ) -> RefinementState {
        let n = self.resolution;
        let points = sample_points(self.scene, &self.params, n);
        let up = self.params.up();
        let max_value = self.params.diagonal();
        let mut grid = EmptyVolumeGrid::zeros(n);

        let (mut state, _) = RefinementState::Idle.transition(RefinementEvent::Start);
        for cell in ScanOrder::serpentine(n) {
            if self.abort.is_aborted() {
                info!(row = cell.row, col = cell.col, "refinement aborted");
                return state.transition(RefinementEvent::AbortRequested).0;
            }
            let point = points[cell.row][cell.col];
            let empty = measure_depth(viewpoint, &point, &up, max_value).await;
            if self.abort.is_aborted() {
                info!(row = cell.row, col = cell.col, "refinement aborted during sample");
                return state.transition(RefinementEvent::AbortRequested).0;
            }
            grid.set(cell.row, cell.col, empty);

            if cell.row_end {
                let (next, effect) = state.transition(RefinementEvent::RowFinished {
                    rows_done: cell.row + 1,
                    rows_total: n,
                });
                state = next;
                if let Some(RefinementEffect::ReportProgress(percent)) = effect {
                    progress(percent);
                }
            }
        }
        // The last progress callback may itself abort.
        if self.abort.is_aborted() {
            info!("refinement aborted after the last row");
            return state.transition(RefinementEvent::AbortRequested).0;
        }
        info!(total = grid.total_empty_height(), "refinement complete");
        state.transition(RefinementEvent::Finished { grid }).0
    }
}

/// Empty height below one sample point. Probe failures and misses count as
/// zero; a non-finite distance counts as the full diagonal.
async fn measure_depth<V: ViewpointService>(
    viewpoint: &mut V,
    point: &Point3d,
    up: &Vec3,
    max_value: f64,
) -> f64 {
    if let Err(error) = viewpoint.relocate_above(point).await {
        warn!(%error, "sample skipped");
        return 0.0;
    }
    match viewpoint.ground_below_center().await {
        Ok(Some(ground)) => {
            let depth = signed_distance_along(&ground, point, up);
            if depth.is_finite() {
                depth.clamp(0.0, max_value)
            } else {
                max_value
            }
        }
        Ok(None) => {
            debug!(?point, "no surface below sample");
            0.0
        }
        Err(error) => {
            warn!(%error, "sample skipped");
            0.0
        }
    }
}
