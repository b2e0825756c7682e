use measure_kernel::KernelError;

use crate::state::CreationState;

/// Errors surfaced to the embedding application.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ToolError {
    #[error("scene does not use a 3D-capable spatial reference")]
    SceneNotThreeDimensional,

    #[error("{operation} is not valid in state {state}")]
    InvalidState {
        operation: &'static str,
        state: CreationState,
    },

    #[error("required geometry missing: {what}")]
    MissingGeometry { what: &'static str },

    #[error("face index {index} out of range (a box has 6 faces)")]
    InvalidFace { index: usize },

    #[error("degenerate box shape: {reason}")]
    DegenerateShape { reason: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),
}

/// Failure of a single viewpoint probe during volume refinement.
///
/// These never abort a refinement run; the affected cell is sampled as zero.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProbeError {
    #[error("viewpoint relocation failed: {reason}")]
    Relocation { reason: String },

    #[error("ground query failed: {reason}")]
    GroundQuery { reason: String },
}
