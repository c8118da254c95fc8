//! In-memory collaborators: a window that renders a synthetic image, a file
//! queue loader, an animation flag and a recording interaction style. Used by
//! the binary and the test-suite.

use crate::camera::CameraState;
use crate::config::InteractorConfig;
use crate::core::{FixedHz, Interactor, InteractorContext};
use crate::image::Image;
use crate::math::{distance_to_ray, intersect_aabb, AABB};
use crate::options::{Options, LIGHT_INTENSITY};
use crate::traits::{
    AnimationManager, Camera, Coloring, ColoringState, CycleType, InteractorStyle, LoadFile, Loader, Window,
};
use glam::DVec3;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Brightest albedo of the synthetic ramp
pub const DEFAULT_ALBEDO: f64 = 0.35;

/// Camera that frames a fixed set of bounds
#[derive(Debug, Clone)]
pub struct HeadlessCamera {
    state: CameraState,
    initial: CameraState,
    bounds: Option<AABB>,
}

impl HeadlessCamera {
    pub fn new(state: CameraState) -> Self {
        Self {
            state,
            initial: state,
            bounds: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Option<AABB>) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn bounds(&self) -> Option<AABB> {
        self.bounds
    }
}

impl Camera for HeadlessCamera {
    fn state(&self) -> CameraState {
        self.state
    }

    fn set_state(&mut self, state: CameraState) {
        self.state = state;
    }

    fn reset_to_bounds(&mut self) {
        let Some(bounds) = self.bounds else {
            return;
        };
        let mut direction = self.state.direction_of_projection().normalize_or_zero();
        if direction == DVec3::ZERO {
            direction = DVec3::NEG_Z;
        }
        let half_angle = (self.state.view_angle.to_radians() * 0.5).max(1e-3);
        let distance = bounds.radius().max(1e-6) / half_angle.sin();
        self.state.focal_point = bounds.center();
        self.state.position = bounds.center() - direction * distance;
    }

    fn reset_to_default(&mut self) {
        self.state = self.initial;
    }
}

/// Coloring by a list of named arrays with their component counts
#[derive(Debug, Clone, Default)]
pub struct HeadlessColoring {
    arrays: Vec<(String, usize)>,
    use_cell: bool,
    array_index: Option<usize>,
    component: i64,
}

impl HeadlessColoring {
    pub fn new(arrays: Vec<(String, usize)>) -> Self {
        Self {
            arrays,
            use_cell: false,
            array_index: None,
            component: -1,
        }
    }

    fn describe(&self) -> String {
        let state = self.coloring_state();
        if state.array_name.is_empty() {
            return "Not coloring".to_string();
        }
        let field = if state.use_cell { "cell" } else { "point" };
        match state.component {
            -1 => format!("Coloring by {field} array {} (magnitude)", state.array_name),
            c => format!("Coloring by {field} array {} (component {c})", state.array_name),
        }
    }
}

impl Coloring for HeadlessColoring {
    fn cycle_scalars(&mut self, cycle: CycleType) {
        match cycle {
            CycleType::Field => self.use_cell = !self.use_cell,
            CycleType::ArrayIndex => {
                self.array_index = match self.array_index {
                    _ if self.arrays.is_empty() => None,
                    Some(i) if i + 1 < self.arrays.len() => Some(i + 1),
                    Some(_) => None,
                    None => Some(0),
                };
                self.component = -1;
            }
            CycleType::Component => {
                let components = self
                    .array_index
                    .and_then(|i| self.arrays.get(i))
                    .map_or(0, |(_, n)| *n as i64);
                self.component = if self.component + 1 < components {
                    self.component + 1
                } else {
                    -1
                };
            }
        }
    }

    fn coloring_state(&self) -> ColoringState {
        ColoringState {
            use_cell: self.use_cell,
            array_name: self
                .array_index
                .and_then(|i| self.arrays.get(i))
                .map(|(name, _)| name.clone())
                .unwrap_or_default(),
            component: self.component,
        }
    }
}

/// Counters shared between a `HeadlessWindow` and whoever observes it
#[derive(Debug, Default)]
pub struct WindowStats {
    pub renders: Cell<usize>,
    pub offscreen_renders: Cell<usize>,
    pub dynamic_updates: Cell<usize>,
    pub last_frame_options: RefCell<Option<Options>>,
}

impl WindowStats {
    pub fn renders(&self) -> usize {
        self.renders.get()
    }

    pub fn offscreen_renders(&self) -> usize {
        self.offscreen_renders.get()
    }
}

#[derive(Debug, Default)]
struct TimerTable {
    timers: BTreeMap<i32, FixedHz>,
    last_id: i32,
}

/// Repeating platform timers driven by `advance`; clones share the same table
#[derive(Debug, Clone, Default)]
pub struct HeadlessTimers {
    table: Rc<RefCell<TimerTable>>,
}

impl HeadlessTimers {
    fn create(&self, interval_ms: u64) -> i32 {
        let mut table = self.table.borrow_mut();
        table.last_id += 1;
        let id = table.last_id;
        table.timers.insert(id, FixedHz::from_interval_ms(interval_ms));
        id
    }

    fn destroy(&self, platform_id: i32) {
        self.table.borrow_mut().timers.remove(&platform_id);
    }

    /// Advance platform time, returning the handle of every timer tick due
    pub fn advance(&self, delta_seconds: f64) -> Vec<i32> {
        let mut due = Vec::new();
        for (id, timer) in self.table.borrow_mut().timers.iter_mut() {
            for _ in 0..timer.tick(delta_seconds) {
                due.push(*id);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.table.borrow().timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.borrow().timers.is_empty()
    }
}

pub struct HeadlessWindow {
    width: u32,
    height: u32,
    camera: HeadlessCamera,
    boxes: Vec<AABB>,
    environment_up: DVec3,
    environment_right: DVec3,
    albedo: f64,
    coloring: Option<HeadlessColoring>,
    timers: HeadlessTimers,
    stats: Rc<WindowStats>,
}

impl HeadlessWindow {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            camera: HeadlessCamera::new(CameraState::default()),
            boxes: Vec::new(),
            environment_up: DVec3::Y,
            environment_right: DVec3::X,
            albedo: DEFAULT_ALBEDO,
            coloring: None,
            timers: HeadlessTimers::default(),
            stats: Rc::new(WindowStats::default()),
        }
    }

    /// Two boxes side by side, viewed from +Z
    pub fn demo() -> Self {
        Self::new(320, 240)
            .with_boxes(vec![
                AABB::around(DVec3::ZERO, DVec3::ONE),
                AABB::around(DVec3::new(2.0, 0.0, 0.0), DVec3::splat(0.5)),
            ])
            .with_camera(CameraState::new(
                DVec3::new(0.0, 0.0, 6.0),
                DVec3::ZERO,
                DVec3::Y,
                30.0,
            ))
            .with_arrays(vec![("Density".to_string(), 1), ("Velocity".to_string(), 3)])
    }

    pub fn with_boxes(mut self, boxes: Vec<AABB>) -> Self {
        self.camera = self.camera.with_bounds(AABB::enclosing(&boxes));
        self.boxes = boxes;
        self
    }

    /// Replace both the current and the default camera
    pub fn with_camera(mut self, state: CameraState) -> Self {
        self.camera = HeadlessCamera::new(state).with_bounds(self.camera.bounds());
        self
    }

    pub fn with_environment(mut self, up: DVec3, right: DVec3) -> Self {
        self.environment_up = up;
        self.environment_right = right;
        self
    }

    pub fn with_albedo(mut self, albedo: f64) -> Self {
        self.albedo = albedo;
        self
    }

    pub fn with_arrays(mut self, arrays: Vec<(String, usize)>) -> Self {
        self.coloring = Some(HeadlessColoring::new(arrays));
        self
    }

    pub fn stats(&self) -> Rc<WindowStats> {
        Rc::clone(&self.stats)
    }

    /// Handle on the platform timers, for driving them from outside
    pub fn timers(&self) -> HeadlessTimers {
        self.timers.clone()
    }

    /// Perspective ray through the center of pixel (x, y), y pointing down
    fn pixel_ray(&self, x: i32, y: i32) -> (DVec3, DVec3) {
        let state = self.camera.state();
        let forward = state.direction_of_projection().normalize_or_zero();
        let right = forward.cross(state.view_up).normalize_or_zero();
        let up = right.cross(forward);

        let tan_half = (state.view_angle.to_radians() * 0.5).tan();
        let aspect = self.width as f64 / self.height as f64;
        let sx = (2.0 * (x as f64 + 0.5) / self.width as f64 - 1.0) * tan_half * aspect;
        let sy = (1.0 - 2.0 * (y as f64 + 0.5) / self.height as f64) * tan_half;

        (state.position, (forward + right * sx + up * sy).normalize_or_zero())
    }
}

impl Window for HeadlessWindow {
    fn render(&mut self, options: &Options) {
        self.stats.renders.set(self.stats.renders.get() + 1);
        *self.stats.last_frame_options.borrow_mut() = Some(options.clone());
        log::trace!("Frame {}", self.stats.renders.get());
    }

    fn render_to_image(&mut self, options: &Options, _include_ui: bool) -> Image {
        self.stats.offscreen_renders.set(self.stats.offscreen_renders.get() + 1);
        let intensity = options.get_as_double(LIGHT_INTENSITY).unwrap_or(1.0);
        let span = (self.width - 1).max(1) as f64;

        let row: Vec<u8> = (0..self.width)
            .flat_map(|x| {
                let v = (x as f64 / span * self.albedo * intensity * 255.0).round().clamp(0.0, 255.0) as u8;
                [v, v, v, 255]
            })
            .collect();
        Image::new(self.width, self.height, row.repeat(self.height as usize))
    }

    fn camera(&self) -> &dyn Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut dyn Camera {
        &mut self.camera
    }

    fn environment_up(&self) -> DVec3 {
        self.environment_up
    }

    fn environment_right(&self) -> DVec3 {
        self.environment_right
    }

    fn pick_cell(&mut self, x: i32, y: i32) -> Option<DVec3> {
        let (origin, dir) = self.pixel_ray(x, y);
        self.boxes
            .iter()
            .filter_map(|b| intersect_aabb(origin, dir, b.min, b.max))
            .min_by(f64::total_cmp)
            .map(|t| origin + dir * t)
    }

    fn pick_point(&mut self, x: i32, y: i32) -> Option<DVec3> {
        let (origin, dir) = self.pixel_ray(x, y);
        let tolerance = AABB::enclosing(&self.boxes)?.radius() * 0.05;
        self.boxes
            .iter()
            .flat_map(|b| b.corners())
            .filter_map(|corner| distance_to_ray(origin, dir, corner).map(|d| (d, corner)))
            .filter(|(d, _)| *d <= tolerance)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, corner)| corner)
    }

    fn coloring(&mut self) -> Option<&mut dyn Coloring> {
        self.coloring.as_mut().map(|c| c as &mut dyn Coloring)
    }

    fn update_dynamic_options(&mut self, options: &Options) {
        self.stats.dynamic_updates.set(self.stats.dynamic_updates.get() + 1);
        log::trace!("Dynamic options updated ({} entries)", options.iter().count());
    }

    fn print_coloring_description(&self, level: log::Level) {
        match &self.coloring {
            Some(coloring) => log::log!(level, "{}", coloring.describe()),
            None => log::log!(level, "Coloring not supported"),
        }
    }

    fn print_scene_description(&self, level: log::Level) {
        let state = self.camera.state();
        log::log!(level, "{} boxes", self.boxes.len());
        if let Some(bounds) = AABB::enclosing(&self.boxes) {
            log::log!(level, "Bounds: {} .. {}", bounds.min, bounds.max);
        }
        log::log!(
            level,
            "Camera: position {} focal point {} view up {} angle {}",
            state.position,
            state.focal_point,
            state.view_up,
            state.view_angle
        );
    }

    fn create_repeating_timer(&mut self, interval_ms: u64) -> i32 {
        self.timers.create(interval_ms)
    }

    fn destroy_timer(&mut self, platform_id: i32) {
        self.timers.destroy(platform_id);
    }
}

#[derive(Debug, Default)]
struct FileQueue {
    files: Vec<String>,
    current: Option<usize>,
    loaded: Vec<String>,
}

/// Loader over a queue of paths; clones share the same queue
#[derive(Debug, Clone, Default)]
pub struct QueueLoader {
    queue: Rc<RefCell<FileQueue>>,
}

impl QueueLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> Vec<String> {
        self.queue.borrow().files.clone()
    }

    pub fn current_file(&self) -> Option<String> {
        let queue = self.queue.borrow();
        queue.current.map(|i| queue.files[i].clone())
    }

    /// Every file loaded so far, in order
    pub fn loaded(&self) -> Vec<String> {
        self.queue.borrow().loaded.clone()
    }
}

impl Loader for QueueLoader {
    fn add_file(&mut self, path: &str) -> usize {
        let mut queue = self.queue.borrow_mut();
        queue.files.push(path.to_string());
        queue.files.len() - 1
    }

    fn load_file(&mut self, which: LoadFile) -> bool {
        let mut queue = self.queue.borrow_mut();
        let n = queue.files.len();
        if n == 0 {
            return false;
        }
        let current = queue.current.unwrap_or(0);
        let index = match which {
            LoadFile::Previous => (current + n - 1) % n,
            LoadFile::Next => (current + 1) % n,
            LoadFile::Current => current,
            LoadFile::First => 0,
            LoadFile::Last => n - 1,
        };
        queue.current = Some(index);
        let file = queue.files[index].clone();
        log::info!("Loading {file}");
        queue.loaded.push(file);
        true
    }
}

/// Animation playback flag; clones share the same state
#[derive(Debug, Clone, Default)]
pub struct PlaybackAnimation {
    playing: Rc<Cell<bool>>,
    stops: Rc<Cell<usize>>,
}

impl PlaybackAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.get()
    }
}

impl AnimationManager for PlaybackAnimation {
    fn start_animation(&mut self) {
        self.playing.set(true);
    }

    fn stop_animation(&mut self) {
        self.playing.set(false);
        self.stops.set(self.stops.get() + 1);
    }

    fn is_playing(&self) -> bool {
        self.playing.get()
    }
}

#[derive(Debug, Default)]
struct StyleState {
    middle_downs: usize,
    middle_ups: usize,
    movement_disabled: bool,
}

/// Interaction style that records what was forwarded to it; clones share state
#[derive(Debug, Clone, Default)]
pub struct HeadlessStyle {
    state: Rc<RefCell<StyleState>>,
}

impl HeadlessStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn middle_downs(&self) -> usize {
        self.state.borrow().middle_downs
    }

    pub fn middle_ups(&self) -> usize {
        self.state.borrow().middle_ups
    }

    pub fn is_movement_disabled(&self) -> bool {
        self.state.borrow().movement_disabled
    }
}

impl InteractorStyle for HeadlessStyle {
    fn on_middle_button_down(&mut self) {
        self.state.borrow_mut().middle_downs += 1;
    }

    fn on_middle_button_up(&mut self) {
        self.state.borrow_mut().middle_ups += 1;
    }

    fn set_camera_movement_disabled(&mut self, disabled: bool) {
        self.state.borrow_mut().movement_disabled = disabled;
    }
}

/// An interactor wired to headless collaborators, with handles to observe them
pub struct HeadlessViewer {
    pub interactor: Interactor,
    pub stats: Rc<WindowStats>,
    pub timers: HeadlessTimers,
    pub loader: QueueLoader,
    pub animation: PlaybackAnimation,
    pub style: HeadlessStyle,
}

impl HeadlessViewer {
    pub fn new(window: HeadlessWindow) -> Self {
        Self::with_settings(window, Options::default(), InteractorConfig::default())
    }

    pub fn with_settings(window: HeadlessWindow, options: Options, config: InteractorConfig) -> Self {
        let stats = window.stats();
        let timers = window.timers();
        let loader = QueueLoader::new();
        let animation = PlaybackAnimation::new();
        let style = HeadlessStyle::new();

        let ctx = InteractorContext::new(
            Box::new(window),
            Box::new(loader.clone()),
            Box::new(animation.clone()),
            Box::new(style.clone()),
        )
        .with_options(options)
        .with_config(config);

        Self {
            interactor: Interactor::new(ctx),
            stats,
            timers,
            loader,
            animation,
            style,
        }
    }

    pub fn renders(&self) -> usize {
        self.stats.renders()
    }

    /// Advance platform time and deliver due ticks; returns callbacks run
    pub fn advance(&mut self, delta_seconds: f64) -> usize {
        self.timers
            .advance(delta_seconds)
            .into_iter()
            .map(|platform_id| self.interactor.on_timer(platform_id))
            .sum()
    }

    pub fn camera_state(&self) -> CameraState {
        self.interactor.context().window.camera().state()
    }
}
