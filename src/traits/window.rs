use super::camera::Camera;
use crate::image::Image;
use crate::options::Options;
use glam::DVec3;

/// How a coloring cycle advances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleType {
    /// Switch between point and cell data
    Field,
    /// Next data array
    ArrayIndex,
    /// Next component of the current array
    Component,
}

/// Coloring selection as reported by the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoringState {
    pub use_cell: bool,
    pub array_name: String,
    pub component: i64,
}

/// Renderer able to color geometry by data arrays
pub trait Coloring {
    fn cycle_scalars(&mut self, cycle: CycleType);

    fn coloring_state(&self) -> ColoringState;
}

/// Window and renderer collaborator
pub trait Window {
    /// Render one frame with the current options
    fn render(&mut self, options: &Options);

    /// Render offscreen and read the result back
    fn render_to_image(&mut self, options: &Options, include_ui: bool) -> Image;

    fn camera(&self) -> &dyn Camera;

    fn camera_mut(&mut self) -> &mut dyn Camera;

    fn environment_up(&self) -> DVec3;

    fn environment_right(&self) -> DVec3;

    /// World position of the cell under the screen position, if any
    fn pick_cell(&mut self, x: i32, y: i32) -> Option<DVec3>;

    /// World position of the point under the screen position, if any
    fn pick_point(&mut self, x: i32, y: i32) -> Option<DVec3>;

    /// `None` when the renderer has no coloring support
    fn coloring(&mut self) -> Option<&mut dyn Coloring>;

    /// Push options that can change between frames to the renderer
    fn update_dynamic_options(&mut self, options: &Options);

    fn print_coloring_description(&self, level: log::Level);

    fn print_scene_description(&self, level: log::Level);

    /// Start a platform repeating timer and return its handle
    fn create_repeating_timer(&mut self, interval_ms: u64) -> i32;

    fn destroy_timer(&mut self, platform_id: i32);
}
