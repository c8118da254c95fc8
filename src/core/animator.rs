//! Timed camera transitions.
//!
//! A transition is a function from an eased ratio in `[0, 1]` to a full
//! camera state. The animator samples it against wall-clock time, blocking
//! the calling thread, and always finishes on `interpolate(1.0)`. Transitions
//! cannot be cancelled once started.

use super::clock::Clock;
use crate::camera::CameraState;
use crate::math::{ease_in_out, from_spherical, lerp, to_spherical, SphericalCoord};
use crate::options::Options;
use crate::traits::Window;
use glam::{DMat3, DVec3};
use std::f64::consts::PI;

/// Smallest polar angle a snapped camera may reach
pub const GIMBAL_EPSILON: f64 = 1e-5;
/// Angles closer than this count as already snapped
pub const ANGLE_EPSILON: f64 = 1e-6;
/// The up vector blends this many times faster than position and focus,
/// settling before them so the roll wobble stays hidden
pub const UP_BLEND_SPEEDUP: f64 = 5.0;

/// Drives eased camera transitions of a fixed duration
#[derive(Debug, Clone, Copy)]
pub struct CameraAnimator {
    duration_ms: u64,
}

impl CameraAnimator {
    pub fn new(duration_ms: u64) -> Self {
        Self { duration_ms }
    }

    /// Run `interpolate` from start to end, setting the camera and rendering
    /// on every tick. Returns the number of states applied.
    pub fn animate<F>(&self, window: &mut dyn Window, options: &Options, interpolate: F) -> usize
    where
        F: Fn(f64) -> CameraState,
    {
        let mut ticks = 0;

        if self.duration_ms > 0 {
            // Key presses arriving meanwhile are handled after the transition
            let duration = self.duration_ms as f64;
            let clock = Clock::new();
            let mut elapsed = clock.elapsed_ms();
            while elapsed < duration {
                window.camera_mut().set_state(interpolate(ease_in_out(elapsed / duration)));
                window.render(options);
                ticks += 1;
                elapsed = clock.elapsed_ms();
            }
        }

        window.camera_mut().set_state(interpolate(1.0));
        window.render(options);
        log::trace!("Camera transition done in {} ticks", ticks + 1);
        ticks + 1
    }
}

/// Change of basis into a frame where the environment up vector is +Z
#[derive(Debug, Clone, Copy)]
pub struct UpBasis {
    pub to_up: DMat3,
    pub from_up: DMat3,
}

impl UpBasis {
    pub fn new(up: DVec3, right: DVec3) -> Self {
        let forward = right.cross(up);
        let to_up = DMat3::from_cols(right, forward, up).transpose();
        Self {
            to_up,
            from_up: to_up.inverse(),
        }
    }
}

/// Round azimuth and polar angle to the nearest multiple of `snap_angle`.
///
/// The polar angle is kept away from the poles. When the input is already
/// snapped, the azimuth advances one increment so repeated snaps orbit.
pub fn snap_spherical(current: SphericalCoord, snap_angle: f64) -> SphericalCoord {
    let mut snapped = SphericalCoord::new(
        current.radius,
        (current.azimuth / snap_angle).round() * snap_angle,
        (current.polar / snap_angle).round() * snap_angle,
    );
    snapped.polar = snapped.polar.clamp(GIMBAL_EPSILON, PI - GIMBAL_EPSILON);

    if (snapped.azimuth - current.azimuth).abs() < ANGLE_EPSILON
        && (snapped.polar - current.polar).abs() < ANGLE_EPSILON
    {
        snapped.azimuth += snap_angle;
    }
    snapped
}

/// Build the orbit-snap transition for the window's current camera.
///
/// Resets the camera to the scene bounds to find the target focal point; the
/// first sample of the returned transition restores the starting state.
pub fn orbit_snap_transition(window: &mut dyn Window, snap_angle_deg: f64) -> impl Fn(f64) -> CameraState {
    let basis = UpBasis::new(window.environment_up(), window.environment_right());

    let state0 = window.camera().state();
    let zup0 = state0.transformed(&basis.to_up);
    let spherical0 = to_spherical(zup0.position, zup0.focal_point);
    let spherical1 = snap_spherical(spherical0, snap_angle_deg.to_radians());

    window.camera_mut().reset_to_bounds();
    let focal1 = basis.to_up * window.camera().focal_point();
    let up1 = DVec3::Z;

    move |ratio| {
        let focal_point = lerp(zup0.focal_point, focal1, ratio, false);
        let position = from_spherical(lerp(spherical0, spherical1, ratio, false), focal_point);
        let view_up = lerp(zup0.view_up, up1, ratio * UP_BLEND_SPEEDUP, true);
        CameraState::new(position, focal_point, view_up, zup0.view_angle).transformed(&basis.from_up)
    }
}

/// Build the transition bringing `picked` to the center of the view.
///
/// The focal point moves onto the picked point. With `free_translation` the
/// camera moves by the same vector; otherwise it only moves within its
/// current viewing plane.
pub fn pick_recenter_transition(
    state0: CameraState,
    picked: DVec3,
    free_translation: bool,
) -> impl Fn(f64) -> CameraState {
    let focal_offset = picked - state0.focal_point;
    let mut position_offset = focal_offset;
    if !free_translation {
        let view = state0.direction_of_projection();
        position_offset -= focal_offset.project_onto(view);
    }

    move |ratio| {
        CameraState::new(
            state0.position + position_offset * ratio,
            state0.focal_point + focal_offset * ratio,
            state0.view_up,
            state0.view_angle,
        )
    }
}
