//! Galaxy: procedural spiral galaxy point clouds with a live-tunable debug panel.

mod config;
mod controller;
mod events;
mod panel;
mod render;
mod scene;

use anyhow::Result;
use engine_core::Time;
use glam::Vec3;
use input::InputState;
use procgen::{Family, GalaxyParameters, RandSource, RandomSource};
use renderer::{GpuPointCloud, OrbitCamera, Renderer};
use std::collections::HashMap;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use config::ViewerConfig;
use controller::RegenerationController;
use panel::DebugPanel;
use scene::GalaxyScene;

/// Initial camera position; the camera looks at the origin.
const CAMERA_START: Vec3 = Vec3::new(-2.0, 3.0, 7.0);
/// Spiral disk rotation in radians per second (negative = clockwise from above).
const SPIRAL_ROTATION_SPEED: f32 = -0.1;
const BURST_ROTATION_SPEED: f32 = -0.2;

/// GPU copy of a scene object, tagged with the generation it was uploaded from.
struct UploadedCloud {
    generation: u64,
    cloud: GpuPointCloud,
}

/// Viewer state: scene, generator controller, camera and GPU resources.
pub struct ViewerState {
    time: Time,
    input: InputState,

    renderer: Renderer,
    camera: OrbitCamera,

    scene: GalaxyScene,
    controller: RegenerationController,
    panel: DebugPanel,
    uploaded: HashMap<Family, UploadedCloud>,

    title: String,
    running: bool,
}

impl ViewerState {
    async fn new(window: Arc<Window>, config: &ViewerConfig) -> Result<Self> {
        let renderer = Renderer::new(window, config.vsync).await?;

        let mut camera = OrbitCamera::from_position(CAMERA_START, Vec3::ZERO);
        let (width, height) = renderer.dimensions();
        camera.set_aspect(width, height);

        let rng: Box<dyn RandomSource> = match config.seed {
            Some(seed) => {
                log::info!("Using seed {seed}");
                Box::new(RandSource::seeded(seed))
            }
            None => Box::new(RandSource::thread()),
        };
        let params = GalaxyParameters::with_policies(config.policies());
        log::info!("Generator variant: {:?}", config.policies());

        let mut scene = GalaxyScene::new();
        let mut controller = RegenerationController::new(params, rng);
        controller.regenerate_all(&mut scene);

        let mut state = Self {
            time: Time::new(),
            input: InputState::new(),
            renderer,
            camera,
            scene,
            controller,
            panel: DebugPanel::new(),
            uploaded: HashMap::new(),
            title: String::new(),
            running: true,
        };
        state.refresh_title();
        Ok(state)
    }

    /// Advance one frame: camera, animation.
    fn update(&mut self) {
        self.input.begin_frame();
        self.time.update();

        let drag = self.input.orbit_drag();
        let (_, height) = self.renderer.dimensions();
        self.camera.rotate(drag.x, drag.y, height as f32);
        self.camera.zoom(self.input.scroll());
        self.camera.update();

        if self.time.frame_count() % 600 == 0 {
            log::debug!("{:.0} fps", self.time.fps());
        }

        let elapsed = self.time.elapsed_seconds();
        self.scene.set_rotation_y(Family::Spiral, elapsed * SPIRAL_ROTATION_SPEED);
        self.scene.set_rotation_y(Family::Burst, elapsed * BURST_ROTATION_SPEED);
    }

    fn render(&mut self) -> Result<()> {
        render::run(self)
    }

    /// Show the panel line in the window title (only when it changed).
    fn refresh_title(&mut self) {
        let title = format!("Galaxy | {}", self.panel.status_line(self.controller.params()));
        if title != self.title {
            self.renderer.window.set_title(&title);
            log::debug!("{title}");
            self.title = title;
        }
    }
}

/// Application handler for winit.
struct App {
    config: ViewerConfig,
    state: Option<ViewerState>,
}

impl App {
    fn new(config: ViewerConfig) -> Self {
        Self { config, state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            let window_attrs = Window::default_attributes()
                .with_title("Galaxy")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window_width,
                    self.config.window_height,
                ));

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let state = pollster::block_on(ViewerState::new(window.clone(), &self.config));
            match state {
                Ok(s) => {
                    self.state = Some(s);
                    window.request_redraw();
                }
                Err(e) => {
                    log::error!("Failed to initialize viewer: {}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) || !state.running {
                event_loop.exit();
            }
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let Some(state) = &mut self.state {
            state.handle_device_event(event);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║                         Galaxy                           ║");
    println!("╠══════════════════════════════════════════════════════════╣");
    println!("║  CAMERA:                                                 ║");
    println!("║    Left drag  - Orbit          │  Scroll - Zoom          ║");
    println!("║  PANEL:                                                  ║");
    println!("║    Tab        - Next folder    │  Up/Down - Select       ║");
    println!("║    Left/Right - Adjust value   │  Shift  - x10 step      ║");
    println!("║    Release the arrow key to regenerate                   ║");
    println!("║    Escape     - Quit                                     ║");
    println!("╚══════════════════════════════════════════════════════════╝");

    let config = ViewerConfig::load();
    log::info!("Starting Galaxy viewer");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
