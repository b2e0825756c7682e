//! Lifecycle of a single refinement run as a pure transition function.

use super::grid::EmptyVolumeGrid;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RefinementState {
    #[default]
    Idle,
    Sampling {
        /// Percent of rows completed, 0 to 100.
        progress: f64,
    },
    Completed {
        grid: EmptyVolumeGrid,
    },
    Aborted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RefinementEvent {
    Start,
    RowFinished { rows_done: usize, rows_total: usize },
    AbortRequested,
    Finished { grid: EmptyVolumeGrid },
}

/// Side effects the driver must carry out after a transition.
///
/// Publishing or discarding the grid is not an effect: the final state
/// carries the grid only when it is `Completed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefinementEffect {
    ReportProgress(f64),
}

impl RefinementState {
    pub fn is_sampling(&self) -> bool {
        matches!(self, RefinementState::Sampling { .. })
    }

    pub fn progress(&self) -> Option<f64> {
        match self {
            RefinementState::Sampling { progress } => Some(*progress),
            RefinementState::Completed { .. } => Some(100.0),
            _ => None,
        }
    }

    /// Events that make no sense in the current state leave it unchanged.
    pub fn transition(self, event: RefinementEvent) -> (Self, Option<RefinementEffect>) {
        use RefinementEffect as Fx;
        use RefinementEvent as Ev;
        use RefinementState as St;

        match (self, event) {
            (_, Ev::Start) => (St::Sampling { progress: 0.0 }, None),
            (St::Sampling { .. }, Ev::RowFinished { rows_done, rows_total }) => {
                let progress = if rows_total == 0 {
                    100.0
                } else {
                    100.0 * rows_done as f64 / rows_total as f64
                };
                (St::Sampling { progress }, Some(Fx::ReportProgress(progress)))
            }
            (St::Sampling { .. }, Ev::AbortRequested) => (St::Aborted, None),
            (St::Sampling { .. }, Ev::Finished { grid }) => (St::Completed { grid }, None),
            (state, _) => (state, None),
        }
    }
}
