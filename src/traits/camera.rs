use crate::camera::CameraState;
use glam::DVec3;

/// Camera owned by the window; the interactor reads and overwrites its state
pub trait Camera {
    fn state(&self) -> CameraState;

    fn set_state(&mut self, state: CameraState);

    fn focal_point(&self) -> DVec3 {
        self.state().focal_point
    }

    /// Frame the whole scene, keeping the current view direction
    fn reset_to_bounds(&mut self);

    /// Restore the initial camera
    fn reset_to_default(&mut self);
}
