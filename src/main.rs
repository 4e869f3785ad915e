use clap::Parser;
use glam::Vec3;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use first_person_controls::cli::Cli;
use first_person_controls::core::{FrameClock, WinitInput};
use first_person_controls::{Camera, ControllerSettings, FirstPersonController};

// === Constants ===

const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 600;
const TITLE_UPDATE_INTERVAL: u64 = 30;
const START_POSITION: Vec3 = Vec3::new(0.0, 1.7, 5.0);

// === Type Aliases ===

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

struct App {
    window: Option<Arc<Window>>,
    input: WinitInput,
    controller: FirstPersonController<Camera>,
    clock: FrameClock,
}

impl App {
    fn new(settings: ControllerSettings) -> Self {
        let input = WinitInput::new();
        let host = input.host();

        let mut controller =
            FirstPersonController::new(Camera::at(START_POSITION), &host, Some(input.element().clone()))
                .with_settings(settings);
        controller.look_at(Vec3::ZERO);

        Self {
            window: None,
            input,
            controller,
            clock: FrameClock::new(),
        }
    }

    fn show_pose(&self, window: &Window) {
        let camera = self.controller.camera();
        let p = camera.position;
        let f = camera.forward();

        window.set_title(&format!(
            "First-person controls | pos ({:.2}, {:.2}, {:.2}) | lat {:.1} lon {:.1} | {:.0} fps",
            p.x,
            p.y,
            p.z,
            self.controller.latitude(),
            self.controller.longitude(),
            self.clock.average_fps(),
        ));
        log::debug!("camera at {:?} facing {:?}", p, f);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("First-person controls")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            self.window = Some(window);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::RedrawRequested => {
                let delta = self.clock.tick();
                self.controller.update(delta);

                if let Some(window) = &self.window {
                    if self.clock.frames() % TITLE_UPDATE_INTERVAL == 0 {
                        self.show_pose(window);
                    }
                }
            }
            other => {
                for event in self.input.process_window_event(&other) {
                    if event.default_prevented() {
                        log::trace!("Suppressed {:?}", event.kind());
                    }
                }
                if let Some(window) = &self.window {
                    self.input.apply_pointer_lock(window);
                }
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        self.input.process_device_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.controller.dispose();
        log::info!("Exiting after {} frames", self.clock.frames());
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = cli.settings()?;
    log::info!("Controller settings: {:?}", settings);

    let event_loop = EventLoop::new()?;
    let mut app = App::new(settings);

    println!("First-person controls - hold a mouse button to look, WASD/arrows to move, R/F up/down, Shift to sprint, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
