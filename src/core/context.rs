//! State reachable from key actions, and the built-in actions themselves.

use super::animator::{orbit_snap_transition, pick_recenter_transition, CameraAnimator};
use super::event::Modifiers;
use super::key_bindings::KeyBindingTable;
use super::light::{nudge_intensity, LightCalibrator};
use crate::config::InteractorConfig;
use crate::options::{Options, LIGHT_INTENSITY, SCIVIS_ARRAY_NAME, SCIVIS_CELLS, SCIVIS_COMPONENT};
use crate::traits::{AnimationManager, CycleType, InteractorStyle, LoadFile, Loader, Window};
use glam::DVec3;

/// Key symbol that stops the interactor
pub const EXIT_HOTKEY_SYM: &str = "Escape";

/// Single-key toggles of the default key table, by upper-cased key code
pub const DEFAULT_TOGGLES: &[(char, &str)] = &[
    ('B', "ui.bar"),
    ('P', "render.effect.translucency-support"),
    ('Q', "render.effect.ambient-occlusion"),
    ('A', "render.effect.anti-aliasing"),
    ('T', "render.effect.tone-mapping"),
    ('E', "render.show-edges"),
    ('X', "interactor.axis"),
    ('G', "render.grid"),
    ('N', "ui.filename"),
    ('M', "ui.metadata"),
    ('R', "render.raytracing.enable"),
    ('D', "render.raytracing.denoise"),
    ('V', "model.volume.enable"),
    ('I', "model.volume.inverse"),
    ('O', "model.point-sprites.enable"),
    ('U', "render.background.blur"),
    ('K', "interactor.trackball"),
    ('H', "ui.cheatsheet"),
];

/// Option flipped by `code` in the default key table
pub fn toggle_for_key(code: char) -> Option<&'static str> {
    DEFAULT_TOGGLES
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, name)| *name)
}

/// Everything an action can touch: options and the external collaborators
pub struct InteractorContext {
    pub options: Options,
    pub window: Box<dyn Window>,
    pub loader: Box<dyn Loader>,
    pub animation: Box<dyn AnimationManager>,
    pub style: Box<dyn InteractorStyle>,
    pub config: InteractorConfig,
    /// Modifiers of the event being handled
    pub modifiers: Modifiers,
    running: bool,
    done: bool,
}

impl InteractorContext {
    pub fn new(
        window: Box<dyn Window>,
        loader: Box<dyn Loader>,
        animation: Box<dyn AnimationManager>,
        style: Box<dyn InteractorStyle>,
    ) -> Self {
        Self {
            options: Options::default(),
            window,
            loader,
            animation,
            style,
            config: InteractorConfig::default(),
            modifiers: Modifiers::NONE,
            running: false,
            done: false,
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn with_config(mut self, config: InteractorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn render(&mut self) {
        self.window.render(&self.options);
    }

    pub fn animator(&self) -> CameraAnimator {
        CameraAnimator::new(self.config.transition_duration_ms)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub(crate) fn set_running(&mut self) {
        self.running = true;
        self.done = false;
    }

    /// Ask the interactor to stop; timers are torn down once the current
    /// event has been handled
    pub fn request_stop(&mut self) {
        self.running = false;
        self.done = true;
    }

    /// Flip a boolean option, logging type errors instead of failing
    pub fn toggle_option(&mut self, name: &str) {
        match self.options.toggle(name) {
            Ok(value) => log::debug!("{name} = {value}"),
            Err(e) => log::warn!("Cannot toggle {name}: {e}"),
        }
    }

    /// Advance the renderer coloring; false when coloring is not supported
    pub fn cycle_coloring(&mut self, cycle: CycleType) -> bool {
        let Some(coloring) = self.window.coloring() else {
            return false;
        };
        coloring.cycle_scalars(cycle);
        self.window.print_coloring_description(log::Level::Debug);
        true
    }

    /// Copy the renderer coloring selection back into the options, since one
    /// cycle can change several of them at once
    pub fn sync_coloring_options(&mut self) {
        let Some(state) = self.window.coloring().map(|c| c.coloring_state()) else {
            return;
        };
        let results = [
            self.options.set(SCIVIS_CELLS, state.use_cell),
            self.options.set(SCIVIS_ARRAY_NAME, state.array_name),
            self.options.set(SCIVIS_COMPONENT, state.component),
        ];
        for e in results.into_iter().filter_map(|r| r.err()) {
            log::warn!("Cannot synchronise coloring options: {e}");
        }
    }

    /// Move the light intensity one band step up or down
    pub fn nudge_light(&mut self, down: bool) {
        let intensity = match self.options.get_as_double(LIGHT_INTENSITY) {
            Ok(intensity) => intensity,
            Err(e) => {
                log::warn!("Cannot read light intensity: {e}");
                return;
            }
        };
        let next = nudge_intensity(intensity, down);
        match self.options.set(LIGHT_INTENSITY, next) {
            Ok(()) => log::debug!("{LIGHT_INTENSITY} = {next}"),
            Err(e) => log::warn!("Cannot set light intensity: {e}"),
        }
    }

    pub fn calibrate_light(&mut self) {
        let calibrator = LightCalibrator::new(self.config.light_calibration.clone());
        if let Err(e) = calibrator.calibrate(self.window.as_mut(), &mut self.options) {
            log::error!("Light calibration failed: {e}");
        }
    }

    /// Animate the camera to the next snapped orbit angle
    pub fn orbit_snap(&mut self) {
        let interpolate = orbit_snap_transition(self.window.as_mut(), self.config.snap_angle_deg);
        self.animator().animate(self.window.as_mut(), &self.options, interpolate);
    }

    /// Animate the camera so `picked` becomes the focal point
    pub fn recenter_on(&mut self, picked: DVec3, free_translation: bool) {
        let state0 = self.window.camera().state();
        let interpolate = pick_recenter_transition(state0, picked, free_translation);
        self.animator().animate(self.window.as_mut(), &self.options, interpolate);
    }

    /// Stop the scene animation, then load a queue entry
    pub fn load_file(&mut self, which: LoadFile) {
        self.animation.stop_animation();
        if !self.loader.load_file(which) {
            log::warn!("Nothing loaded for {which:?}");
        }
    }
}

/// Bindings installed on every interactor unless the host provides its own
pub fn default_key_bindings() -> KeyBindingTable<InteractorContext> {
    KeyBindingTable::<InteractorContext>::builder()
        .bind("L", "Increase light intensity", |ctx| {
            ctx.nudge_light(false);
            ctx.render();
        })
        .bind("shift+L", "Decrease light intensity", |ctx| {
            ctx.nudge_light(true);
            ctx.render();
        })
        .bind("ctrl+L", "Calibrate light intensity on the rendered exposure", |ctx| {
            ctx.calibrate_light();
            ctx.render();
        })
        .build()
}

/// Legacy single-key behaviours, used when neither the host callback nor a
/// binding handled the key. Returns true when the key did something.
pub fn default_key_action(ctx: &mut InteractorContext, code: char, sym: &str) -> bool {
    let mut check_coloring = false;
    let mut render = false;

    match code {
        'C' | 'S' | 'Y' => {
            let cycle = match code {
                'C' => CycleType::Field,
                'S' => CycleType::ArrayIndex,
                _ => CycleType::Component,
            };
            check_coloring = ctx.cycle_coloring(cycle);
            render = check_coloring;
        }
        'Z' => {
            ctx.toggle_option("ui.fps");
            // The first frame does not have the fps overlay laid out yet
            ctx.render();
            ctx.render();
        }
        '?' => {
            ctx.window.print_coloring_description(log::Level::Info);
            ctx.window.print_scene_description(log::Level::Info);
        }
        _ => {
            if let Some(name) = toggle_for_key(code) {
                ctx.toggle_option(name);
                render = true;
            } else {
                match sym {
                    EXIT_HOTKEY_SYM => ctx.request_stop(),
                    "Return" => {
                        ctx.window.camera_mut().reset_to_default();
                        render = true;
                    }
                    "Space" => ctx.animation.toggle_animation(),
                    "Tab" => {
                        ctx.orbit_snap();
                        render = true;
                    }
                    "Left" | "Right" | "Up" | "Home" | "End" => {
                        let which = match sym {
                            "Left" => LoadFile::Previous,
                            "Right" => LoadFile::Next,
                            "Up" => LoadFile::Current,
                            "Home" => LoadFile::First,
                            _ => LoadFile::Last,
                        };
                        ctx.load_file(which);
                        render = true;
                    }
                    _ => return false,
                }
            }
        }
    }

    if check_coloring {
        ctx.sync_coloring_options();
    }
    if render {
        ctx.render();
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_for_key() {
        assert_eq!(toggle_for_key('G'), Some("render.grid"));
        assert_eq!(toggle_for_key('X'), Some("interactor.axis"));
        assert_eq!(toggle_for_key('L'), None);
        assert_eq!(toggle_for_key('Z'), None);
    }

    #[test]
    fn test_default_toggles_are_known_options() {
        let options = Options::default();
        for (_, name) in DEFAULT_TOGGLES {
            assert!(options.contains(name), "{name}");
        }
    }

    #[test]
    fn test_default_bindings() {
        use super::super::key_bindings::KeyCombo;
        let table = default_key_bindings();
        assert_eq!(table.len(), 3);
        assert!(table.contains(&KeyCombo::parse("L")));
        assert!(table.contains(&KeyCombo::parse("shift+L")));
        assert!(table.contains(&KeyCombo::parse("ctrl+L")));
    }
}
