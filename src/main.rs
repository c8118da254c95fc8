use anyhow::{bail, Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::{Duration, Instant};
use view_interactor::cli::Cli;
use view_interactor::core::{key_press_from_spec, WinitInputAdapter};
use view_interactor::headless::{HeadlessViewer, HeadlessWindow};
use view_interactor::{InputEvent, InteractorConfig, Options};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

// === Constants ===

const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 600;
const TIMER_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Winit application forwarding window input to the headless viewer
struct App {
    window: Option<Arc<Window>>,
    viewer: HeadlessViewer,
    adapter: WinitInputAdapter,
    last_tick: Instant,
}

impl App {
    fn new(viewer: HeadlessViewer) -> Self {
        Self {
            window: None,
            viewer,
            adapter: WinitInputAdapter::new(),
            last_tick: Instant::now(),
        }
    }

    fn dispatch(&mut self, input: InputEvent) {
        if self.viewer.interactor.is_done() {
            return;
        }
        self.viewer.interactor.dispatch(input);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("View Interactor")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {e}");
                    event_loop.exit();
                    return;
                }
            };
            self.window = Some(window);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let WindowEvent::CloseRequested = event {
            self.viewer.interactor.stop();
            event_loop.exit();
            return;
        }

        for input in self.adapter.process_event(&event) {
            self.dispatch(input);
        }
        if self.viewer.interactor.is_done() {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(drop) = self.adapter.flush_dropped_files() {
            self.dispatch(drop);
            if self.viewer.interactor.is_done() {
                event_loop.exit();
                return;
            }
        }

        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f64();
        self.last_tick = now;

        let fired = self.viewer.advance(delta);
        if fired > 0 {
            log::trace!("{fired} timer callbacks");
        }
        event_loop.set_control_flow(ControlFlow::wait_duration(TIMER_POLL_INTERVAL));
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => InteractorConfig::from_json_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => InteractorConfig::default(),
    };
    let mut options = Options::default();
    if let Some(path) = &cli.options {
        options
            .merge_json_file(path)
            .with_context(|| format!("Failed to read options {}", path.display()))?;
    }

    let mut viewer = HeadlessViewer::with_settings(HeadlessWindow::demo(), options, config);
    for (combo, description) in viewer.interactor.bindings().describe() {
        log::debug!("{combo}: {description}");
    }
    viewer.interactor.start();

    if let Some(path) = &cli.record {
        if !viewer.interactor.record_interaction(path) {
            bail!("Cannot record interaction to {}", path.display());
        }
    }

    for spec in &cli.keys {
        if viewer.interactor.is_done() {
            break;
        }
        viewer.interactor.dispatch(key_press_from_spec(spec));
    }

    if let Some(path) = &cli.play {
        if !viewer.interactor.play_interaction(path) {
            bail!("Playing {} failed", path.display());
        }
    }

    if cli.window && !viewer.interactor.is_done() {
        let event_loop = EventLoop::new()?;
        let mut app = App::new(viewer);
        log::info!("Press ? for a scene description, Escape to quit");
        event_loop.run_app(&mut app)?;
        viewer = app.viewer;
    }

    viewer.interactor.finish_recording()?;
    log::info!("{} frames rendered", viewer.renders());

    if cli.print_options {
        println!("{}", serde_json::to_string_pretty(viewer.interactor.options())?);
    }

    Ok(())
}
