use measure_kernel::{Ray, Vec3};

/// Keyboard modifiers held during a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Height step: extend symmetrically above and below the base plane.
    pub centered: bool,
    /// Click on a face: enter rotate/translate instead of face resizing.
    pub manipulate: bool,
}

/// A pointer event: the view ray under the cursor plus the camera's right
/// axis, which orients the vertical planes used for height picking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub ray: Ray,
    pub camera_right: Vec3,
    pub modifiers: Modifiers,
}

impl Pointer {
    pub fn new(ray: Ray, camera_right: Vec3) -> Self {
        Self {
            ray,
            camera_right,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
