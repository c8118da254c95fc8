//! Routes input events to the host callbacks, key bindings and built-in
//! behaviours, and exposes the public interactor surface.

use super::context::{default_key_action, default_key_bindings, InteractorContext};
use super::event::{normalize_key_sym, InputEvent, Modifiers};
use super::key_bindings::{KeyBindingTable, KeyCombo};
use super::recorder::EventRecorder;
use super::timer::{TimerId, TimerRegistry};
use crate::error::{InteractorError, Result};
use crate::options::Options;
use crate::traits::LoadFile;
use std::path::{Path, PathBuf};

/// Host key handler; returning true suppresses the default handling
pub type KeyPressCallback = Box<dyn FnMut(char, &str) -> bool>;

/// Host drop handler; returning true suppresses the default handling
pub type DropFilesCallback = Box<dyn FnMut(&[String]) -> bool>;

/// Observer notified of every event before it is handled
pub type EventObserver = Box<dyn FnMut(&InputEvent)>;

pub struct Interactor {
    ctx: InteractorContext,
    bindings: KeyBindingTable<InteractorContext>,
    key_press_callback: Option<KeyPressCallback>,
    drop_files_callback: Option<DropFilesCallback>,
    observers: Vec<EventObserver>,
    timers: TimerRegistry,
    recorder: EventRecorder,
    middle_button_down: (i32, i32),
}

impl Interactor {
    pub fn new(ctx: InteractorContext) -> Self {
        Self::with_bindings(ctx, default_key_bindings())
    }

    pub fn with_bindings(ctx: InteractorContext, bindings: KeyBindingTable<InteractorContext>) -> Self {
        Self {
            ctx,
            bindings,
            key_press_callback: None,
            drop_files_callback: None,
            observers: Vec::new(),
            timers: TimerRegistry::new(),
            recorder: EventRecorder::new(),
            middle_button_down: (0, 0),
        }
    }

    pub fn context(&self) -> &InteractorContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut InteractorContext {
        &mut self.ctx
    }

    pub fn options(&self) -> &Options {
        &self.ctx.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.ctx.options
    }

    pub fn bindings(&self) -> &KeyBindingTable<InteractorContext> {
        &self.bindings
    }

    pub fn set_key_press_callback<F>(&mut self, callback: F)
    where
        F: FnMut(char, &str) -> bool + 'static,
    {
        self.key_press_callback = Some(Box::new(callback));
    }

    pub fn set_drop_files_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&[String]) -> bool + 'static,
    {
        self.drop_files_callback = Some(Box::new(callback));
    }

    /// Register an observer of the raw event stream
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&InputEvent) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Handle one event. Events arriving after `stop` are ignored.
    pub fn dispatch(&mut self, event: InputEvent) {
        if self.ctx.is_done() {
            log::trace!("Interactor stopped, ignoring {event:?}");
            return;
        }

        for observer in &mut self.observers {
            observer(&event);
        }
        if let Err(e) = self.recorder.record_event(&event) {
            log::error!("Cannot record event: {e}");
        }

        match event {
            InputEvent::KeyPress { code, sym, modifiers } => self.on_key_press(code, &sym, modifiers),
            InputEvent::DropFiles { paths } => self.on_drop_files(paths),
            InputEvent::MiddleButtonPress { x, y } => self.on_middle_button_press(x, y),
            InputEvent::MiddleButtonRelease { x, y, modifiers } => {
                self.on_middle_button_release(x, y, modifiers)
            }
        }

        if self.ctx.is_done() {
            self.teardown();
        }
    }

    fn on_key_press(&mut self, code: char, sym: &str, modifiers: Modifiers) {
        let code = code.to_ascii_uppercase();
        let sym = normalize_key_sym(sym);

        if let Some(callback) = &mut self.key_press_callback {
            if callback(code, &sym) {
                return;
            }
        }

        self.ctx.modifiers = modifiers;
        let combo = KeyCombo::new(modifiers, &sym);
        if let Some(binding) = self.bindings.get(&combo) {
            log::debug!("{combo}: {}", binding.description);
            (binding.action)(&mut self.ctx);
            return;
        }

        if !default_key_action(&mut self.ctx, code, &sym) {
            log::trace!("Unhandled key {combo}");
        }
    }

    fn on_drop_files(&mut self, paths: Vec<String>) {
        if let Some(callback) = &mut self.drop_files_callback {
            if callback(&paths) {
                return;
            }
        }
        if paths.is_empty() {
            return;
        }

        self.ctx.animation.stop_animation();
        for path in &paths {
            let index = self.ctx.loader.add_file(path);
            log::debug!("Queued {path} at {index}");
        }
        if !self.ctx.loader.load_file(LoadFile::Last) {
            log::warn!("Dropped files could not be loaded");
        }
        self.ctx.render();
    }

    fn on_middle_button_press(&mut self, x: i32, y: i32) {
        self.middle_button_down = (x, y);
        self.ctx.style.on_middle_button_down();
    }

    fn on_middle_button_release(&mut self, x: i32, y: i32, modifiers: Modifiers) {
        let (x0, y0) = self.middle_button_down;
        let (dx, dy) = (i64::from(x) - i64::from(x0), i64::from(y) - i64::from(y0));
        let tolerance = i64::from(self.ctx.config.drag_distance_tolerance);

        let travel = dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy));
        if travel < tolerance * tolerance {
            let picked = self
                .ctx
                .window
                .pick_cell(x0, y0)
                .or_else(|| self.ctx.window.pick_point(x0, y0));
            match picked {
                Some(picked) => {
                    log::debug!("Recentering on {picked}");
                    self.ctx.recenter_on(picked, modifiers.shift);
                }
                None => log::debug!("Nothing picked at ({x0}, {y0})"),
            }
        }

        self.ctx.style.on_middle_button_up();
    }

    /// Start a repeating timer owned by this interactor
    pub fn create_timer_callback<F>(&mut self, interval_ms: u64, callback: F) -> TimerId
    where
        F: FnMut() + 'static,
    {
        let platform_id = self.ctx.window.create_repeating_timer(interval_ms);
        let id = self.timers.insert(platform_id, Box::new(callback));
        log::debug!("Timer {id:?} every {interval_ms} ms (platform {platform_id})");
        id
    }

    /// Remove a timer; false when the id is unknown
    pub fn remove_timer_callback(&mut self, id: TimerId) -> bool {
        match self.timers.remove(id) {
            Some(platform_id) => {
                self.ctx.window.destroy_timer(platform_id);
                true
            }
            None => false,
        }
    }

    /// Deliver a platform timer tick; returns the number of callbacks run
    pub fn on_timer(&mut self, platform_id: i32) -> usize {
        self.timers.fire(platform_id)
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    pub fn enable_camera_movement(&mut self) {
        self.ctx.style.set_camera_movement_disabled(false);
    }

    pub fn disable_camera_movement(&mut self) {
        self.ctx.style.set_camera_movement_disabled(true);
    }

    /// Push dynamic options to the renderer and begin accepting events
    pub fn start(&mut self) {
        self.ctx.window.update_dynamic_options(&self.ctx.options);
        self.ctx.set_running();
        log::info!("Interactor started");
    }

    pub fn stop(&mut self) {
        self.ctx.request_stop();
        self.teardown();
    }

    pub fn is_running(&self) -> bool {
        self.ctx.is_running()
    }

    pub fn is_done(&self) -> bool {
        self.ctx.is_done()
    }

    fn teardown(&mut self) {
        for platform_id in self.timers.drain() {
            self.ctx.window.destroy_timer(platform_id);
        }
        if let Err(e) = self.recorder.off() {
            log::error!("Cannot finish recording: {e}");
        }
        log::info!("Interactor stopped");
    }

    /// Replay a recorded interaction. False when the file is missing or
    /// invalid, or when the replay stopped the interactor.
    pub fn play_interaction(&mut self, path: impl AsRef<Path>) -> bool {
        match self.try_play_interaction(path.as_ref()) {
            Ok(count) => {
                log::info!("Played {count} events");
                true
            }
            Err(e) => {
                log::error!("Cannot play interaction: {e}");
                false
            }
        }
    }

    fn try_play_interaction(&mut self, path: &Path) -> Result<usize> {
        if !path.exists() {
            return Err(InteractorError::RecordFileMissing(path.to_path_buf()));
        }

        self.recorder.off()?;
        self.recorder.clear();
        self.recorder.set_file_name(std::fs::canonicalize(path)?);

        self.ctx.window.update_dynamic_options(&self.ctx.options);
        let events = self.recorder.play()?;
        let count = events.len();
        for event in events {
            self.dispatch(event);
            if self.ctx.is_done() {
                return Err(InteractorError::Stopped);
            }
        }
        Ok(count)
    }

    /// Record every following event to `path`, replacing any previous
    /// recording. False when the path is empty or cannot be written.
    pub fn record_interaction(&mut self, path: impl AsRef<Path>) -> bool {
        match self.try_record_interaction(path.as_ref()) {
            Ok(_) => true,
            Err(e) => {
                log::error!("Cannot record interaction: {e}");
                false
            }
        }
    }

    fn try_record_interaction(&mut self, path: &Path) -> Result<PathBuf> {
        if path.as_os_str().is_empty() {
            return Err(InteractorError::EmptyRecordPath);
        }
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        self.recorder.off()?;
        self.recorder.clear();
        self.recorder.set_file_name(&path);
        self.recorder.on();
        self.recorder.record()?;
        Ok(path)
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    /// Flush and close the current recording
    pub fn finish_recording(&mut self) -> Result<()> {
        self.recorder.off()
    }

    pub fn toggle_animation(&mut self) {
        self.ctx.animation.toggle_animation();
    }

    pub fn start_animation(&mut self) {
        self.ctx.animation.start_animation();
    }

    pub fn stop_animation(&mut self) {
        self.ctx.animation.stop_animation();
    }

    pub fn is_playing_animation(&self) -> bool {
        self.ctx.animation.is_playing()
    }
}
