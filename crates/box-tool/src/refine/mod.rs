//! Volume refinement: sample the surface under the top face on an N x N
//! grid and subtract the empty space from the gross volume.

pub mod grid;
pub mod sampler;
pub mod scan;
pub mod state;

pub use grid::{EmptyVolumeGrid, sample_points};
pub use sampler::{AbortHandle, ViewpointService, VolumeSampler};
pub use scan::{GridCell, ScanOrder};
pub use state::{RefinementEffect, RefinementEvent, RefinementState};

/// Result of a refinement request, as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefinementOutcome {
    /// The new grid is in place and the box's refined volume is this value.
    Completed { refined_volume: f64 },
    /// The previous grid, and with it the refined volume, is unchanged.
    Aborted,
}

impl RefinementOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RefinementOutcome::Completed { .. })
    }
}
