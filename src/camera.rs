use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

/// Full camera state, read and written wholesale by transitions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub position: DVec3,
    pub focal_point: DVec3,
    pub view_up: DVec3,
    /// Vertical view angle in degrees
    pub view_angle: f64,
}

impl CameraState {
    pub fn new(position: DVec3, focal_point: DVec3, view_up: DVec3, view_angle: f64) -> Self {
        Self {
            position,
            focal_point,
            view_up,
            view_angle,
        }
    }

    /// Vector from the camera position to the focal point
    pub fn direction_of_projection(&self) -> DVec3 {
        self.focal_point - self.position
    }

    pub fn distance(&self) -> f64 {
        self.direction_of_projection().length()
    }

    /// Same state with every vector mapped through `m`
    pub fn transformed(&self, m: &DMat3) -> Self {
        Self {
            position: *m * self.position,
            focal_point: *m * self.focal_point,
            view_up: *m * self.view_up,
            view_angle: self.view_angle,
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: DVec3::new(0.0, 0.0, 1.0),
            focal_point: DVec3::ZERO,
            view_up: DVec3::Y,
            view_angle: 30.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_and_distance() {
        let state = CameraState::new(DVec3::new(0.0, 0.0, 5.0), DVec3::ZERO, DVec3::Y, 30.0);
        assert_eq!(state.direction_of_projection(), DVec3::new(0.0, 0.0, -5.0));
        assert_eq!(state.distance(), 5.0);
    }

    #[test]
    fn test_transformed_keeps_view_angle() {
        let state = CameraState::default();
        let m = DMat3::from_cols(DVec3::X, DVec3::Z, -DVec3::Y);
        let t = state.transformed(&m);
        assert_eq!(t.view_angle, state.view_angle);
        assert_eq!(t.view_up, m * DVec3::Y);
    }
}
