use std::fmt;

use measure_kernel::BoxFace;

/// Progress of the interactive box definition.
///
/// `Idle` is both the initial state and the state after a restart or a
/// dismissed box. The three finalized states share the same valid box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreationState {
    #[default]
    Idle,
    CornerDefined,
    WidthDefined,
    PlaneDefined,
    VolumeDefined,
    FaceResizing { face: BoxFace },
    ResizeRotate,
}

impl CreationState {
    /// True once the fourth click has produced a standardized box.
    pub fn is_finalized(&self) -> bool {
        matches!(
            self,
            CreationState::VolumeDefined
                | CreationState::FaceResizing { .. }
                | CreationState::ResizeRotate
        )
    }

    /// Refinement may only start from the idle-edit state.
    pub fn can_refine(&self) -> bool {
        matches!(self, CreationState::VolumeDefined)
    }
}

impl fmt::Display for CreationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreationState::Idle => write!(f, "IDLE"),
            CreationState::CornerDefined => write!(f, "CORNER_DEFINED"),
            CreationState::WidthDefined => write!(f, "WIDTH_DEFINED"),
            CreationState::PlaneDefined => write!(f, "PLANE_DEFINED"),
            CreationState::VolumeDefined => write!(f, "VOLUME_DEFINED"),
            CreationState::FaceResizing { face } => write!(f, "FACE_RESIZING({face:?})"),
            CreationState::ResizeRotate => write!(f, "RESIZE_ROTATE"),
        }
    }
}
