//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`] and maps its events
//! onto the three entry points of [`OrbitalSystem`]: the idle callback runs
//! `on_update`, plain redraws run `on_display`, and typed keys run
//! `on_keyboard` with the last cursor position.

use std::sync::Arc;

use solar_config::Config;
use solar_input::{CursorState, TypedKeys};
use solar_render::{SceneRenderer, SceneSettings, init_render_context_blocking};
use solar_system::{CameraController, FrameSink, OrbitalSystem, Projection, solar_system_builder};
use tracing::{debug, error, info, instrument};
use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::game_loop::GameLoop;

/// Returns [`WindowAttributes`] for the configured size, position and title.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    let (x, y) = config.window.position;
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
        .with_position(winit::dpi::LogicalPosition::new(x as f64, y as f64))
}

/// The stock solar system with camera, projection and render settings taken
/// from `config`.
pub fn build_system(config: &Config) -> OrbitalSystem {
    let mut projection = Projection {
        fov_y_degrees: config.projection.fov_y_degrees,
        near: config.projection.near,
        far: config.projection.far,
        ..Projection::default()
    };
    if config.projection.aspect_from_window {
        projection.set_aspect_ratio(config.window.width, config.window.height);
    }

    let builder = OrbitalSystem::builder()
        .camera(CameraController::new(config.camera.step, config.camera.rest_distance))
        .projection(projection)
        .clear_color(config.render.clear_color)
        .orbit_segments(config.render.orbit_segments);
    solar_system_builder(builder).build()
}

/// How body updates are paced against redraws.
pub enum Pacing {
    /// One update per idle callback.
    Idle,
    /// Fixed-rate updates, as many per redraw as wall time allows.
    Fixed(GameLoop),
}

impl Pacing {
    pub fn from_config(config: &Config) -> Self {
        match config.simulation.tick_rate_hz {
            0 => Self::Idle,
            rate => Self::Fixed(GameLoop::new(rate)),
        }
    }
}

/// Run one redraw: advance the bodies as `pacing` dictates, then present.
///
/// `idle` marks a redraw requested by the idle callback. Other redraws (window
/// exposure, resizes) only repaint the current state.
pub fn drive_frame<S: FrameSink + ?Sized>(
    system: &mut OrbitalSystem,
    pacing: &mut Pacing,
    idle: bool,
    days_per_tick: f64,
    sink: &mut S,
) {
    match pacing {
        Pacing::Idle if idle => system.on_update(days_per_tick, sink),
        Pacing::Idle => system.on_display(sink),
        Pacing::Fixed(game_loop) => {
            for _ in 0..game_loop.tick() {
                system.advance(days_per_tick);
            }
            system.on_display(sink);
        }
    }
}

/// Application state owned by the winit event loop.
pub struct AppState {
    pub window: Option<Arc<Window>>,
    pub renderer: Option<SceneRenderer>,
    pub system: OrbitalSystem,
    pub config: Config,
    pub pacing: Pacing,
    pub keys: TypedKeys,
    pub cursor: CursorState,
    /// Set by the idle callback, consumed by the next redraw.
    idle_pending: bool,
}

impl AppState {
    pub fn new(config: Config, system: OrbitalSystem) -> Self {
        Self {
            window: None,
            renderer: None,
            pacing: Pacing::from_config(&config),
            system,
            config,
            keys: TypedKeys::new(),
            cursor: CursorState::new(),
            idle_pending: false,
        }
    }

    /// Forward every queued character to the system with the cursor position.
    pub fn dispatch_keys(&mut self) {
        let (x, y) = self.cursor.pixel();
        for key in self.keys.drain() {
            self.system.on_keyboard(key, x, y);
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(width, height);
        }
        if self.config.projection.aspect_from_window {
            self.system.projection_mut().set_aspect_ratio(width, height);
        }
    }

    fn redraw(&mut self) {
        let idle = std::mem::take(&mut self.idle_pending);
        if let Some(renderer) = &mut self.renderer {
            drive_frame(
                &mut self.system,
                &mut self.pacing,
                idle,
                self.config.simulation.days_per_tick,
                renderer,
            );
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(window_attributes_from_config(&self.config)) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let settings = SceneSettings {
            sphere_slices: self.config.render.sphere_slices,
            sphere_stacks: self.config.render.sphere_stacks,
        };
        let renderer = init_render_context_blocking(window.clone(), self.config.window.vsync)
            .map_err(|e| e.to_string())
            .and_then(|context| SceneRenderer::new(context, &settings).map_err(|e| e.to_string()));
        match renderer {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        }

        let size = window.inner_size();
        if self.config.projection.aspect_from_window {
            self.system.projection_mut().set_aspect_ratio(size.width, size.height);
        }
        info!("Window ready: {}x{}", size.width, size.height);

        self.window = Some(window);
        event_loop.set_control_flow(ControlFlow::Poll);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested after {} ticks, shutting down", self.system.ticks());
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::KeyboardInput { event, .. } => {
                self.keys.process_event(&event);
                self.dispatch_keys();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::CursorEntered { .. } => self.cursor.on_cursor_entered(),
            WindowEvent::CursorLeft { .. } => self.cursor.on_cursor_left(),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    /// The idle callback: schedule an update-and-redraw.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            self.idle_pending = true;
            window.request_redraw();
        }
    }
}

/// Create an event loop and run the orrery until its window closes.
#[instrument(skip_all)]
pub fn run_with_config(config: Config, system: OrbitalSystem) -> Result<(), EventLoopError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config, system);
    debug!("Starting event loop with {} bodies", app.system.len());
    event_loop.run_app(&mut app)
}
